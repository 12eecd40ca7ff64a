//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`string::preview`]: single-line text previews for logs

pub mod error;
pub mod string;
