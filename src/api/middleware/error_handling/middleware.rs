use std::sync::Arc;

use axum::{extract::Request, response::Response};

use super::config::ErrorHandlingConfig;
use super::responder::ErrorResponder;
use super::utils::RequestContext;
use crate::domain::RawError;

/// Error handling middleware layer
///
/// Must be the outermost error stage: any [`RawError`] a handler left in the
/// response extensions is rendered here and goes no further.
#[derive(Clone)]
pub struct ErrorHandlingLayer {
    responder: Arc<ErrorResponder>,
}

impl ErrorHandlingLayer {
    pub fn new(responder: Arc<ErrorResponder>) -> Self {
        Self { responder }
    }
}

impl<S> tower::Layer<S> for ErrorHandlingLayer
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Service = ErrorHandlingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorHandlingService {
            inner,
            responder: Arc::clone(&self.responder),
        }
    }
}

/// Error handling service wrapper
#[derive(Clone)]
pub struct ErrorHandlingService<S> {
    inner: S,
    responder: Arc<ErrorResponder>,
}

impl<S> tower::Service<Request> for ErrorHandlingService<S>
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    S::Response: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let responder = Arc::clone(&self.responder);

        Box::pin(async move {
            let ctx = RequestContext::new(req.method().clone(), req.uri().clone());

            let mut response = inner.call(req).await?;

            // Only responses that carry a handler error are rewritten
            match response.extensions_mut().remove::<RawError>() {
                Some(err) => Ok(responder.respond(err, &ctx)),
                None => Ok(response),
            }
        })
    }
}

/// Create error handling middleware
pub fn create_error_handling_middleware(config: ErrorHandlingConfig) -> ErrorHandlingLayer {
    ErrorHandlingLayer::new(Arc::new(ErrorResponder::new(config)))
}
