//! # formfields - terminal form widgets
//!
//! Form field widgets for line-of-business terminal applications, built with
//! Rust and Ratatui: a decimal input composed of an integer and a fractional
//! part, a debounced search-and-select autocomplete, and a settings page that
//! toggles a shared display preference.
//!
//! ## Architecture Overview
//!
//! This crate is organized around the Elm architecture pattern:
//!
//! - **Model** (`state`): Application state
//! - **Message** (`msg`): Events that can change the state
//! - **Update** (`update`): Pure functions that transform state
//! - **Command** (`cmd`): Side effects (timers, queries, store writes)
//! - **View** (`components`): UI rendering based on current state
//!
//! ## Example Usage
//!
//! ```rust
//! use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
//! use formfields::{
//!     core::msg::decimal::DecimalMsg, translate_raw_to_domain, update, AppState, Msg, RawMsg,
//! };
//!
//! let mut state = AppState::default();
//! for c in "12.5".chars() {
//!     let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
//!     for msg in translate_raw_to_domain(RawMsg::Key(key), &state) {
//!         state = update(msg, state).0;
//!     }
//! }
//! assert_eq!(state.form.amount.value(), Some("12.50"));
//!
//! let (state, _commands) = update(Msg::Decimal(DecimalMsg::Blur), state);
//! assert_eq!(state.form.amount.parts().fractional, "50");
//! ```
//!
//! ## Modules
//!
//! - [`core`] - State, messages, update and command execution
//! - [`domain`] - Field state machines
//! - [`infrastructure`] - Terminal, config, query services
//! - [`integration`] - Runtime and event loop
//! - [`presentation`] - Components, widgets, styles and keybindings


pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod presentation;
pub mod utils;

// Re-exports for convenience
pub use crate::core::{
    cmd::Cmd, msg::Msg, raw_msg::RawMsg, state::AppState, translator::translate_raw_to_domain,
    update::update,
};

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
