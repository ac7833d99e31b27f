#![deny(missing_docs)]

//! Core library for the docsum document summarization server.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Text extraction for PDF, DOCX, and plain-text uploads.
pub mod extraction;
/// Structured logging and tracing setup.
pub mod logging;
/// Summarization metrics helpers.
pub mod metrics;
/// Document summarization pipeline.
pub mod processing;
/// Chunk summarization clients and prompts.
pub mod summarization;
