//! # HTTP Middleware
//!
//! Cross-cutting request wrappers applied around the router in
//! `lib.rs`. Execution order (outermost → innermost):
//!
//! ```text
//! TraceLayer → RequestLog → CatchPanic → CORS → Handler
//! ```
//!
//! Each stage either forwards to the next or terminates the response
//! itself (CORS preflight, panic fallback).

pub mod cors;
pub mod recovery;
pub mod request_log;
