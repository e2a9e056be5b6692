// Versículo: Instagram post generation for Bible themes, backed by Gemini.
//
// This is the library root. Each module corresponds to one stage of the
// path from a typed theme to the on-screen carousel.

pub mod carousel;
pub mod config;
pub mod error;
pub mod gemini;
pub mod posts;
pub mod web;
