// Matching engine: key-phrase extraction, category scanners, fallback matchers,
// score aggregation, ranking and filtering.
// Everything below `handlers` and `cache` is pure and synchronous.

pub mod aggregate;
pub mod cache;
pub mod categories;
pub mod engine;
pub mod handlers;
pub mod patterns;
pub mod phrases;
pub mod ranking;
pub mod words;
