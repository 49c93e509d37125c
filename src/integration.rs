//! Integration layer
//!
//! This module wires the Elm core to the terminal:
//! - Runtime (message queues, command execution)
//! - Event loop runner
//! - Render and resize coalescing

pub mod app_runner;
pub mod coalescer;
pub mod runtime;
