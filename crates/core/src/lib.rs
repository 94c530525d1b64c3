//! `dashgate-core` — identifiers and errors shared across the workspace.
//!
//! This crate contains **pure** primitives (no IO, no logging setup).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{OrganizationId, PageId, UserId};
