//! Behavioral properties of the validators and normalizers.

use plan_guard_domain::{AttributePath, FindingKind, PlanValue, SiblingView};
use plan_guard_rules::formats::{length_between, matches_pattern};
use plan_guard_rules::{
    CredentialMapping, Pattern, PortAssociation, canonical_json, canonicalize_json, empty_default,
    requested_port_matches, unique_mappings,
};
use proptest::prelude::*;
use serde_json::Value;
use std::error::Error;

#[derive(Debug, Clone)]
struct Mapping {
    account_name: PlanValue<String>,
    header_name: PlanValue<String>,
    header_value: PlanValue<String>,
    body_field_path: PlanValue<String>,
    body_field_value: PlanValue<String>,
}

impl Mapping {
    fn new(fields: [&str; 5]) -> Self {
        let [account_name, header_name, header_value, body_field_path, body_field_value] =
            fields.map(|field| PlanValue::Known(field.to_string()));
        Self {
            account_name,
            header_name,
            header_value,
            body_field_path,
            body_field_value,
        }
    }
}

impl CredentialMapping for Mapping {
    fn account_name(&self) -> Option<&str> {
        self.account_name.as_known_str()
    }
    fn header_name(&self) -> Option<&str> {
        self.header_name.as_known_str()
    }
    fn header_value(&self) -> Option<&str> {
        self.header_value.as_known_str()
    }
    fn body_field_path(&self) -> Option<&str> {
        self.body_field_path.as_known_str()
    }
    fn body_field_value(&self) -> Option<&str> {
        self.body_field_value.as_known_str()
    }
}

struct Endpoint {
    app_protocol: &'static str,
    port: i64,
}

impl PortAssociation for Endpoint {
    fn app_protocol(&self) -> PlanValue<&str> {
        PlanValue::Known(self.app_protocol)
    }
    fn port(&self) -> PlanValue<i64> {
        PlanValue::Known(self.port)
    }
}

fn port_findings(app_protocol: &'static str, port: i64, requested: i64) -> usize {
    let parent_path = AttributePath::attribute("service_endpoint");
    let endpoint = Endpoint { app_protocol, port };
    requested_port_matches(
        &parent_path.child("requested_port"),
        &PlanValue::Known(requested),
        &SiblingView::new(&endpoint, &parent_path),
    )
    .len()
}

fn mapping_findings(entries: Vec<Mapping>) -> Vec<plan_guard_domain::Finding> {
    unique_mappings(
        &AttributePath::attribute("credential_providers"),
        &PlanValue::Known(entries),
    )
    .into_vec()
}

#[test]
fn identical_mappings_yield_one_duplicate() {
    let tuple = ["acct", "X-Api-Key", "value", "$.auth", "token"];
    let findings = mapping_findings(vec![Mapping::new(tuple), Mapping::new(tuple)]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, FindingKind::Duplicate);
    assert_eq!(
        findings[0].summary,
        "duplicate credential provider mapping already exists"
    );
}

#[test]
fn distinct_mappings_pass() {
    let findings = mapping_findings(vec![
        Mapping::new(["acct", "h", "v", "p", "1"]),
        Mapping::new(["acct", "h", "v", "p", "2"]),
        Mapping::new(["other", "h", "v", "p", "1"]),
    ]);
    assert!(findings.is_empty());
}

// Field boundaries are not part of the key, so these two tuples collide.
#[test]
fn shifted_field_boundaries_alias() {
    let findings = mapping_findings(vec![
        Mapping::new(["ab", "c", "", "", ""]),
        Mapping::new(["a", "bc", "", "", ""]),
    ]);
    assert_eq!(findings.len(), 1);
}

#[test]
fn absent_mapping_collections_pass() {
    let path = AttributePath::attribute("credential_providers");
    assert!(unique_mappings::<Mapping>(&path, &PlanValue::Null).is_empty());
    assert!(unique_mappings::<Mapping>(&path, &PlanValue::Unknown).is_empty());
}

#[test]
fn mcp_port_table() {
    assert_eq!(port_findings("MCP", 8080, 8080), 0);
    assert_eq!(port_findings("MCP", 8080, 9090), 1);
    assert_eq!(port_findings("HTTP", 8080, 9090), 0);
}

#[test]
fn canonicalizer_examples() -> Result<(), Box<dyn Error>> {
    assert!(canonicalize_json("{").is_err());
    assert_eq!(canonicalize_json("{\"a\": 1}")?, "{\"a\":1}");
    let once = canonicalize_json("[1.5, -0, 1e3, \"\\u00e9\"]")?;
    assert_eq!(canonicalize_json(&once)?, once);
    Ok(())
}

#[test]
fn canonicalizer_keeps_number_literals_exact() -> Result<(), Box<dyn Error>> {
    assert_eq!(canonicalize_json("{\"limit\": 1e400}")?, "{\"limit\":1e400}");
    assert_eq!(
        canonicalize_json("{\"id\": 123456789012345678901234567890}")?,
        "{\"id\":123456789012345678901234567890}"
    );
    assert_eq!(canonicalize_json(" [1e3, -0] ")?, "[1e3,-0]");
    Ok(())
}

#[test]
fn empty_default_examples() {
    let path = AttributePath::attribute("access_conditions");
    assert_eq!(
        empty_default::<Vec<String>>(PlanValue::Null, &path).value,
        PlanValue::Known(Vec::new())
    );
    assert_eq!(
        empty_default::<Vec<String>>(PlanValue::Unknown, &path).value,
        PlanValue::Known(Vec::new())
    );
    let present = PlanValue::Known(vec!["x".to_string()]);
    assert_eq!(empty_default(present.clone(), &path).value, present);
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        ".{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn canonicalizer_is_idempotent(value in json_value()) {
        let pretty = serde_json::to_string_pretty(&value)
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        let once = canonicalize_json(&format!("  {pretty}\n"))
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        let twice = canonicalize_json(&once)
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.contains('\n'));
    }

    #[test]
    fn format_validators_are_deterministic(text in ".{0,40}") {
        let path = AttributePath::attribute("value");
        let value = PlanValue::Known(text);
        for pattern in Pattern::ALL {
            prop_assert_eq!(
                matches_pattern(&path, &value, pattern),
                matches_pattern(&path, &value, pattern)
            );
        }
        prop_assert_eq!(
            length_between(&path, &value, 3, 63),
            length_between(&path, &value, 3, 63)
        );
    }

    #[test]
    fn unresolved_values_are_no_ops(unknown in any::<bool>()) {
        let path = AttributePath::attribute("value");
        let value: PlanValue<String> = if unknown { PlanValue::Unknown } else { PlanValue::Null };
        for pattern in Pattern::ALL {
            prop_assert!(matches_pattern(&path, &value, pattern).is_empty());
        }
        prop_assert!(length_between(&path, &value, 3, 63).is_empty());
        let normalized = canonical_json(value.clone(), &path);
        prop_assert_eq!(normalized.value, value);
        prop_assert!(normalized.diagnostics.is_empty());
    }

    #[test]
    fn non_mcp_protocols_never_constrain_ports(port in 1_i64..65536, requested in 1_i64..65536) {
        prop_assert_eq!(port_findings("HTTP", port, requested), 0);
        prop_assert_eq!(port_findings("MCP", port, requested), usize::from(port != requested));
    }
}
