//! Domain logic
//!
//! This module contains the field state machines and their helpers:
//! - Decimal composition
//! - Autocomplete search and selection
//! - Shared display preferences and shortcut claims

pub mod autocomplete;
pub mod contact;
pub mod control;
pub mod decimal;
pub mod format;
pub mod navigation;
pub mod preferences;
pub mod shortcuts;
pub mod text;
pub mod ui;
