//! Cross-field validators.
//!
//! These read sibling values through a typed [`SiblingView`] or look across
//! the entries of one collection.

use plan_guard_domain::{AttributePath, Diagnostics, Finding, FindingKind, PlanValue, SiblingView};
use std::collections::HashMap;
use tracing::debug;

// =============================================================================
// DUPLICATE MAPPINGS
// =============================================================================

/// Summary reported for a repeated credential mapping.
pub const DUPLICATE_MAPPING: &str = "duplicate credential provider mapping already exists";

/// An entry of a credential mapping collection.
///
/// Absent and unknown fields contribute an empty string to the composite key.
pub trait CredentialMapping {
    /// Account name.
    fn account_name(&self) -> Option<&str>;
    /// Header name.
    fn header_name(&self) -> Option<&str>;
    /// Header value.
    fn header_value(&self) -> Option<&str>;
    /// Body field path.
    fn body_field_path(&self) -> Option<&str>;
    /// Body field value.
    fn body_field_value(&self) -> Option<&str>;

    /// Plain concatenation of the five fields, in that order, with no separator.
    ///
    /// Distinct tuples whose field boundaries differ can collide
    /// (`("ab", "c")` and `("a", "bc")`).
    fn composite_key(&self) -> String {
        [
            self.account_name(),
            self.header_name(),
            self.header_value(),
            self.body_field_path(),
            self.body_field_value(),
        ]
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect()
    }
}

/// Reject a collection in which two entries share a composite key.
///
/// Stops at the first repeat; the later entry is the one reported.
pub fn unique_mappings<M: CredentialMapping>(
    path: &AttributePath,
    collection: &PlanValue<Vec<M>>,
) -> Diagnostics {
    let Some(entries) = collection.as_known() else {
        return Diagnostics::new();
    };
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        let key = entry.composite_key();
        if let Some(first) = seen.get(&key) {
            debug!(
                target: "plan_guard::rules",
                path = %path,
                rule = "unique_mappings",
                first,
                position,
                "value rejected"
            );
            return Finding::error(
                FindingKind::Duplicate,
                path.clone(),
                DUPLICATE_MAPPING,
                format!(
                    "{} repeats the mapping of {}",
                    path.index(position),
                    path.index(*first)
                ),
            )
            .into();
        }
        seen.insert(key, position);
    }
    Diagnostics::new()
}

// =============================================================================
// CONDITIONAL EQUALITY
// =============================================================================

/// Application protocol under which `requested_port` must equal `port`.
pub const MCP_PROTOCOL: &str = "MCP";

/// A structural parent carrying an application protocol and a service port.
pub trait PortAssociation {
    /// Declared application protocol.
    fn app_protocol(&self) -> PlanValue<&str>;
    /// Service port.
    fn port(&self) -> PlanValue<i64>;
}

/// When the parent's protocol is [`MCP_PROTOCOL`], `requested_port` must
/// equal `port`.
///
/// Passes while any of the three values is null or unknown. Only attached to
/// `requested_port`; a later change to `port` is caught when the plan is
/// re-evaluated.
pub fn requested_port_matches<P: PortAssociation>(
    path: &AttributePath,
    requested_port: &PlanValue<i64>,
    siblings: &SiblingView<'_, P>,
) -> Diagnostics {
    let Some(requested) = requested_port.as_known() else {
        return Diagnostics::new();
    };
    let parent = siblings.parent();
    let PlanValue::Known(protocol) = parent.app_protocol() else {
        return Diagnostics::new();
    };
    let PlanValue::Known(port) = parent.port() else {
        return Diagnostics::new();
    };
    if protocol != MCP_PROTOCOL || *requested == port {
        return Diagnostics::new();
    }
    debug!(
        target: "plan_guard::rules",
        path = %path,
        rule = "requested_port_matches",
        "value rejected"
    );
    Finding::error(
        FindingKind::Consistency,
        path.clone(),
        format!("must equal {} when app_protocol is {MCP_PROTOCOL}", siblings.path_of("port")),
        format!(
            "{path} is {requested} but {} is {port}",
            siblings.path_of("port")
        ),
    )
    .into()
}
