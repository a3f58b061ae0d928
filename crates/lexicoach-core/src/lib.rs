//! lexicoach-core — Answer evaluation and error-classification engine.
//!
//! This crate holds the full evaluation pipeline: text normalization, the
//! in-memory reference store, exact matching, the trained error classifier,
//! and feedback resolution. The HTTP server and CLI are thin callers of
//! [`engine::Evaluator::evaluate`].

pub mod classifier;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod resolver;
pub mod store;
