//! Client for the fal.ai synchronous image-generation endpoint.
//!
//! Wraps `POST https://fal.run/{model_id}`: one blocking call per
//! generation, one outcome. Queue submission, status polling, and
//! streaming live inside the provider and are not surfaced here.

pub mod client;

pub use client::{FalClient, FalError, GenerationOutput, RunResult};
