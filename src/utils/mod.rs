//! Utility functions and helpers for basic-api.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and the injectable [`logging::Logger`] handle.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
