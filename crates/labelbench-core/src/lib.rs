//! Core of the labelbench workspace: dataset generation, LLM-backed
//! classifiers, and the accuracy evaluator that compares them.

pub mod classify;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod model;
pub mod providers;
pub mod report;

pub use errors::BenchError;
