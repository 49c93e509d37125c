//! Infrastructure layer
//!
//! This module handles external integrations and services:
//! - TUI foundation
//! - CLI argument processing and configuration
//! - Query services and switch-latest task tracking
//! - Outside-click listeners and preference persistence

pub mod cli;
pub mod config;
pub mod listeners;
pub mod preferences;
pub mod query;
pub mod search;
pub mod tui;
