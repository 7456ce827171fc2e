//! Turn-by-turn chat pipeline: prompt assembly and completion orchestration.

pub mod orchestrator;
pub mod prompt;

pub use orchestrator::{ChatEngine, CompletionResult, IngestStats};
pub use prompt::PromptPolicy;
