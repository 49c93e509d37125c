//! Reusable UI widgets
//!
//! Stateless building blocks rendered by the components.

pub mod dropdown;
pub mod status_bar;
pub mod tab_bar;
pub mod toggle;
