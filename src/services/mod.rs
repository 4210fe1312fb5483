//! External collaborators

pub mod analysis;
pub mod gemini;

pub use analysis::AnalysisProvider;
pub use gemini::{build_prompt, GeminiClient};
