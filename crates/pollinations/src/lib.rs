//! Client for the Pollinations OpenAI-compatible text endpoint.
//!
//! Used to rewrite image prompts: either enhancing free text into a full
//! style-guided prompt or restructuring it into bare keyword tags. Replies
//! from the model arrive with conversational noise ("Here are the tags:",
//! surrounding quotes); [`cleanup`] scrubs that off before the text is
//! returned to callers.

pub mod cleanup;
pub mod client;
pub mod messages;

pub use client::{PollinationsClient, PollinationsError};
pub use messages::PromptAction;
