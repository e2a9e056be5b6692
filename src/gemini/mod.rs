// Gemini API access.
//
// `types` mirrors the generateContent wire format; `client` owns the
// HTTP round trip and the mapping of upstream failures into the
// pipeline error taxonomy.

pub mod client;
pub mod types;

pub use client::GeminiClient;
