//! Network-facing half of the pipeline: wire types, the SSE stream
//! ingest/accumulator, and the HTTP client for both endpoints.

pub mod client;
pub mod sse;
pub mod types;
