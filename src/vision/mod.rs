mod client;

pub use client::{ChatCompletionsClient, VisionClient, VisionError, ANALYSIS_PROMPT};
