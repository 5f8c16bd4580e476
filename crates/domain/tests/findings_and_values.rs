//! Integration coverage for plan values and diagnostics aggregation.

use plan_guard_domain::{AttributePath, Diagnostics, Finding, FindingKind, PlanValue};
use plan_guard_shared::ErrorEnvelope;
use proptest::prelude::*;
use std::error::Error;

fn finding(error: bool, index: usize) -> Finding {
    let path = AttributePath::attribute("items").index(index);
    if error {
        Finding::error(FindingKind::Format, path, "bad", "")
    } else {
        Finding::warning(FindingKind::Format, path, "odd", "")
    }
}

#[test]
fn unknown_marker_round_trips_through_snapshots() -> Result<(), Box<dyn Error>> {
    let values: Vec<PlanValue<String>> =
        serde_json::from_str(r#"[null, {"$unknown": true}, "x"]"#)?;
    assert_eq!(
        values,
        vec![
            PlanValue::Null,
            PlanValue::Unknown,
            PlanValue::Known("x".to_string())
        ]
    );
    assert_eq!(
        serde_json::to_string(&values)?,
        r#"[null,{"$unknown":true},"x"]"#
    );
    Ok(())
}

#[test]
fn error_findings_surface_as_envelopes_with_path_metadata() {
    let diagnostics: Diagnostics = vec![finding(true, 0), finding(false, 1)].into();
    let envelopes: Vec<ErrorEnvelope> = diagnostics.to_error_envelopes();

    assert_eq!(envelopes.len(), 1);
    assert_eq!(envelopes[0].code.namespace(), "validation");
    assert_eq!(
        envelopes[0].metadata.get("path"),
        Some(&"items[0]".to_string())
    );
}

#[test]
fn diagnostics_serialize_as_a_flat_list() -> Result<(), Box<dyn Error>> {
    let diagnostics = Diagnostics::from(finding(true, 2));
    let value = serde_json::to_value(&diagnostics)?;
    assert_eq!(value[0]["path"], "items[2]");
    assert_eq!(value[0]["severity"], "error");
    assert_eq!(value[0]["kind"], "format");
    Ok(())
}

proptest! {
    #[test]
    fn rejection_is_iff_any_error(flags in prop::collection::vec(any::<bool>(), 0..32)) {
        let diagnostics: Diagnostics = flags
            .iter()
            .enumerate()
            .map(|(index, error)| finding(*error, index))
            .collect();
        prop_assert_eq!(diagnostics.has_errors(), flags.iter().any(|flag| *flag));
        prop_assert_eq!(diagnostics.len(), flags.len());
    }
}
