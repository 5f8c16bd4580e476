//! Snapshot-level validation pass over fixture plans.

use plan_guard_domain::FindingKind;
use plan_guard_resources::{
    CredentialProviderKind, PassOptions, ResourceConfig, Snapshot, run_pass,
};
use proptest::prelude::*;
use std::error::Error;
use std::path::PathBuf;

fn fixture(name: &str) -> Result<Snapshot, Box<dyn Error>> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    Ok(Snapshot::from_path(&path)?)
}

#[test]
fn rejected_plan_reports_every_violation() -> Result<(), Box<dyn Error>> {
    let outcome = run_pass(fixture("plan_rejected.json")?, PassOptions::default());
    assert!(outcome.rejected);

    let found: Vec<(String, FindingKind)> = outcome
        .diagnostics
        .iter()
        .map(|finding| (finding.path.to_string(), finding.kind))
        .collect();
    assert_eq!(
        found,
        vec![
            (
                "server_workload.mcp-gateway.service_endpoint.host".to_string(),
                FindingKind::Format
            ),
            (
                "server_workload.mcp-gateway.service_endpoint.requested_port".to_string(),
                FindingKind::Consistency
            ),
            (
                "credential_provider.sts.kind.aws_sts.session_policy".to_string(),
                FindingKind::MalformedInput
            ),
            (
                "access_policy.gateway.credential_providers".to_string(),
                FindingKind::Duplicate
            ),
            (
                "log_stream.audit.destination.aws_s3_bucket.s3_bucket_name".to_string(),
                FindingKind::Format
            ),
        ]
    );
    Ok(())
}

#[test]
fn accepted_plan_is_normalized() -> Result<(), Box<dyn Error>> {
    let outcome = run_pass(fixture("plan_accepted.json")?, PassOptions::default());
    assert!(outcome.diagnostics.is_empty(), "{:?}", outcome.diagnostics);

    let snapshot = outcome.accepted()?.into_inner();
    let kind = snapshot.resources.iter().find_map(|resource| match resource {
        ResourceConfig::CredentialProvider(provider) => provider.attributes.kind.as_known(),
        _ => None,
    });
    let Some(CredentialProviderKind::AwsSts(sts)) = kind else {
        return Err("expected an aws_sts provider".into());
    };
    assert_eq!(
        sts.session_policy.as_known_str(),
        Some("{\"Version\":\"2012-10-17\",\"Statement\":[]}")
    );
    Ok(())
}

#[test]
fn normalizing_twice_changes_nothing() -> Result<(), Box<dyn Error>> {
    let once = run_pass(fixture("plan_accepted.json")?, PassOptions::default()).snapshot;
    let twice = run_pass(once.clone(), PassOptions::default()).snapshot;
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn deny_warnings_has_no_effect_without_warnings() -> Result<(), Box<dyn Error>> {
    let options = PassOptions {
        deny_warnings: true,
        parallel: false,
    };
    assert!(!run_pass(fixture("plan_accepted.json")?, options).rejected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn parallel_pass_matches_sequential(
        order in Just((0..9).collect::<Vec<usize>>()).prop_shuffle()
    ) {
        let resources = fixture("plan_rejected.json")
            .map_err(|error| TestCaseError::fail(error.to_string()))?
            .resources
            .into_iter()
            .chain(
                fixture("plan_accepted.json")
                    .map_err(|error| TestCaseError::fail(error.to_string()))?
                    .resources,
            )
            .collect::<Vec<_>>();
        let shuffled: Vec<_> = order
            .iter()
            .filter_map(|index| resources.get(*index).cloned())
            .collect();
        let sequential = run_pass(
            Snapshot { resources: shuffled.clone() },
            PassOptions { deny_warnings: false, parallel: false },
        );
        let parallel = run_pass(
            Snapshot { resources: shuffled },
            PassOptions { deny_warnings: false, parallel: true },
        );
        prop_assert_eq!(sequential, parallel);
    }
}
