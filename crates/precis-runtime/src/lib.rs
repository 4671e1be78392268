//! Precis Runtime — the summarization service and its background worker.
//!
//! `SummaryService` owns the engine and its one-time load; the worker
//! serializes requests so the engine handles one document at a time.

pub mod service;
pub mod worker;

pub use service::{Readiness, SummaryService, MIN_INPUT_WORDS};
pub use worker::{start_worker, submit, SummaryRequest, SummarySender};
