pub mod completion;
pub mod config;
mod error;
pub mod gemini;

pub use completion::{Assistant, Role, Turn};
pub use config::ChatConfig;
pub use error::CompletionError;
