//! # plan-guard-rules
//!
//! The validation and normalization core:
//!
//! - **Pattern catalog** - named, anchored grammars compiled once
//! - **Format validators** - one pattern or length bound per check
//! - **Cross-field validators** - duplicate mappings, conditional port equality
//! - **Plan normalizers** - JSON canonicalizer, empty-collection default
//!
//! Every function here is pure over its inputs and safe to call from many
//! threads at once.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod cross_field;
pub mod formats;
pub mod normalize;
pub mod patterns;

pub use cross_field::{
    CredentialMapping, DUPLICATE_MAPPING, MCP_PROTOCOL, PortAssociation, requested_port_matches,
    unique_mappings,
};
pub use normalize::{EmptyCollection, MalformedJson, canonical_json, canonicalize_json, empty_default};
pub use patterns::{Pattern, PatternError, verify_catalog};

/// Returns the rules crate version.
#[must_use]
pub const fn rules_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_crate_compiles() {
        assert!(!rules_crate_version().is_empty());
    }
}
