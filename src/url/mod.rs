//! URL handling module
//!
//! This module provides URL normalization for work items pulled from the
//! queue and domain-syntax validation for the submission boundary.

mod domain;
mod normalize;

pub use domain::is_valid_domain;
pub use normalize::normalize_url;
