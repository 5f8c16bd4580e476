//! # plan-guard-domain
//!
//! Data model shared by every validator and normalizer:
//!
//! - **Values** - `PlanValue` (absent / unknown / known)
//! - **Paths** - `AttributePath`, `SiblingView`
//! - **Findings** - `Finding`, `Severity`, `FindingKind`, `Diagnostics`
//! - **Traits** - `ValidateAttributes`, `Normalize`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - Pure data and traits with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use plan_guard_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod finding;
pub mod path;
pub mod traits;
pub mod value;

pub use finding::{Diagnostics, Finding, FindingKind, Severity};
pub use path::{AttributePath, PathStep, SiblingView};
pub use traits::{Normalize, Normalized, ValidateAttributes};
pub use value::{PlanValue, UNKNOWN_MARKER};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
