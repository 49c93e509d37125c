//! Presentation layer
//!
//! This module contains UI components and widgets:
//! - Field components and the settings page
//! - Reusable widgets
//! - Configuration (styles, keybindings)

pub mod components;
pub mod config;
pub mod widgets;
