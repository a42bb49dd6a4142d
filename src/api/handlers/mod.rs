pub mod fallback;
pub mod health;

pub use fallback::not_found_handler;
pub use health::health_handler;
