//! Gemini generateContent integration

pub mod client;
pub mod prompt;

pub use client::GeminiClient;
pub use prompt::build_prompt;
