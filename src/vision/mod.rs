//! Visual reasoning: answer the transcribed question about the image.

pub mod openai;
pub mod reasoner;

pub use openai::OpenAiReasoner;
pub use reasoner::{MockReasoner, VisualReasoner};
