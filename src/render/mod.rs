// Render module - turns sync outcomes into log lines

pub mod outcome;

pub use outcome::{describe, log_outcome};
