//! Core domain types and logic.

pub mod price;
pub mod indicator;
pub mod signal;
pub mod selection;
pub mod report;
pub mod sample;
pub mod config_validation;
pub mod error;
