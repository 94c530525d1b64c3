//! `dashgate-navigation` — page-access resolution for the dashboard shell.
//!
//! Data flows one way:
//!
//! ```text
//! session payload ──► NavigationMap::build ──┬──► resolve_landing  (after login / bootstrap)
//!                                            └──► PageGuard        (every render)
//! ```
//!
//! Everything here is synchronous and total. The only fallible operations are
//! loading a [`DeploymentConfig`] and accepting a failed session handoff.

pub mod config;
pub mod guard;
pub mod landing;
pub mod map;
pub mod presets;
pub mod shell;

pub use config::{ConfigError, DeploymentConfig, DeploymentConfigBuilder};
pub use guard::{GuardDecision, PageGuard};
pub use landing::{Landing, LandingSource, resolve_landing, resolve_landing_page};
pub use map::{NavEntry, NavigationMap, build_navigation_map};
pub use shell::{AppShell, Handoff, Session, ShellView};
