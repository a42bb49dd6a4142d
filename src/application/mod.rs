pub mod classifiers;

pub use classifiers::{classify, project, ClassifierRules, ErrorRecord};
