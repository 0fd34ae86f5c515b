//! Tests for the `migration` application service.
//!
//! `FakeFoundry` doubles as the `Pause`, so the call log shows exactly where
//! the cooldown falls relative to the provider calls.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use warden_cli::application::services::migration::{migrate_all, migrate_fax_to_voice_service};
use warden_cli::domain::migration::{DEPROVISION_REASON, VOICE_ADDON_SKU};
use warden_cli::domain::{
    BatchEntry, BatchSummary, MigrationPolicy, MigrationState, Phase, ReleaseCheck, ServiceId,
};

use crate::fakes::{Call, FakeFoundry, ORG, RecordingReporter, record, report};

fn position(calls: &[Call], pred: impl Fn(&Call) -> bool) -> usize {
    calls.iter().position(pred).expect("call present")
}

#[tokio::test]
async fn test_happy_path_reaches_done_with_cooldown_between_commits() {
    let api = FakeFoundry::default();
    let reporter = RecordingReporter::default();
    let rec = record(42, Some("u1"), "+15551230000");

    let report = migrate_fax_to_voice_service(
        &api,
        &api,
        &reporter,
        ORG,
        &rec,
        &MigrationPolicy::default(),
    )
    .await
    .expect("migration runs");

    assert!(report.is_done());
    assert_eq!(
        report.trail,
        vec![
            MigrationState::Idle,
            MigrationState::DeprovisionValidating,
            MigrationState::DeprovisionRequested,
            MigrationState::Cooldown,
            MigrationState::ProvisionValidating,
            MigrationState::ProvisionRequested,
            MigrationState::Done,
        ]
    );

    let calls = api.calls();
    let deprovision = position(&calls, |c| matches!(c, Call::Deprovision(_)));
    let pause = position(&calls, |c| matches!(c, Call::Pause(_)));
    let validate_provision = position(&calls, |c| matches!(c, Call::ValidateProvision(_)));
    assert!(deprovision < pause && pause < validate_provision);
    assert_eq!(calls[pause], Call::Pause(Duration::from_secs(5)));
}

#[tokio::test]
async fn test_payloads_carry_record_fields() {
    let api = FakeFoundry::default();
    let reporter = RecordingReporter::default();
    let rec = record(42, Some("u1"), "+15551230000");

    migrate_fax_to_voice_service(&api, &api, &reporter, ORG, &rec, &MigrationPolicy::default())
        .await
        .expect("migration runs");

    let mutations = api.mutations();
    let Call::Deprovision(deprovision) = &mutations[0] else {
        panic!("expected deprovision first, got {mutations:?}");
    };
    assert_eq!(deprovision.organization, ORG);
    assert_eq!(deprovision.service_id, ServiceId(42));
    assert_eq!(deprovision.reason, DEPROVISION_REASON);

    let Call::Provision(provision) = &mutations[1] else {
        panic!("expected provision second, got {mutations:?}");
    };
    assert_eq!(provision.sku, VOICE_ADDON_SKU);
    assert_eq!(provision.did.as_str(), "+15551230000");
    assert_eq!(provision.location_id, "l1");
    assert_eq!(provision.department_id, "d1");
    assert_eq!(provision.user_id.as_deref(), Some("u1"));
}

#[tokio::test]
async fn test_unowned_record_provisions_without_user() {
    let api = FakeFoundry::default();
    let reporter = RecordingReporter::default();
    let rec = record(7, None, "+15550000007");

    let report =
        migrate_fax_to_voice_service(&api, &api, &reporter, ORG, &rec, &MigrationPolicy::default())
            .await
            .expect("migration runs");

    assert!(report.is_done());
    let provision = api
        .calls()
        .into_iter()
        .find_map(|c| match c {
            Call::Provision(p) => Some(p),
            _ => None,
        })
        .expect("provisioned");
    assert_eq!(provision.user_id, None);
}

#[tokio::test]
async fn test_deprovision_validation_error_stops_before_any_commit() {
    let api = FakeFoundry {
        deprovision_validation: report(&["Service is locked"], &[]),
        ..FakeFoundry::default()
    };
    let reporter = RecordingReporter::default();
    let rec = record(42, Some("u1"), "+15551230000");

    let report =
        migrate_fax_to_voice_service(&api, &api, &reporter, ORG, &rec, &MigrationPolicy::default())
            .await
            .expect("migration runs");

    assert_eq!(
        report.outcome,
        MigrationState::ValidationRejected {
            phase: Phase::Deprovision,
            message: "Service is locked".into()
        }
    );
    assert!(api.mutations().is_empty());
    assert!(!report.outcome.fax_deprovisioned());
    assert!(reporter.warned("Service is locked"));
}

#[tokio::test]
async fn test_validation_warnings_do_not_block() {
    let api = FakeFoundry {
        deprovision_validation: report(&[], &["number is in a hunt group"]),
        provision_validation: report(&[], &["billing changes next cycle"]),
        ..FakeFoundry::default()
    };
    let reporter = RecordingReporter::default();
    let rec = record(42, Some("u1"), "+15551230000");

    let report =
        migrate_fax_to_voice_service(&api, &api, &reporter, ORG, &rec, &MigrationPolicy::default())
            .await
            .expect("migration runs");

    assert!(report.is_done());
    assert_eq!(report.warnings.len(), 2);
    assert!(reporter.warned("hunt group"));
}

#[tokio::test]
async fn test_deprovision_commit_failure_skips_provision() {
    let api = FakeFoundry {
        deprovision_status: 500,
        ..FakeFoundry::default()
    };
    let reporter = RecordingReporter::default();
    let rec = record(42, Some("u1"), "+15551230000");

    let report =
        migrate_fax_to_voice_service(&api, &api, &reporter, ORG, &rec, &MigrationPolicy::default())
            .await
            .expect("migration runs");

    assert_eq!(
        report.outcome,
        MigrationState::CommitFailed {
            phase: Phase::Deprovision,
            status: 500
        }
    );
    assert_eq!(api.mutations().len(), 1);
    assert!(
        !api.calls()
            .iter()
            .any(|c| matches!(c, Call::ValidateProvision(_) | Call::Pause(_)))
    );
}

#[tokio::test]
async fn test_accepted_is_success_but_created_is_not() {
    let api = FakeFoundry {
        deprovision_status: 202,
        provision_status: 201,
        ..FakeFoundry::default()
    };
    let reporter = RecordingReporter::default();
    let rec = record(42, Some("u1"), "+15551230000");

    let report =
        migrate_fax_to_voice_service(&api, &api, &reporter, ORG, &rec, &MigrationPolicy::default())
            .await
            .expect("migration runs");

    assert_eq!(
        report.outcome,
        MigrationState::CommitFailed {
            phase: Phase::Provision,
            status: 201
        }
    );
}

#[tokio::test]
async fn test_provision_failure_reports_stranded_number() {
    let api = FakeFoundry {
        provision_validation: report(&["DID not available"], &[]),
        ..FakeFoundry::default()
    };
    let reporter = RecordingReporter::default();
    let rec = record(42, Some("u1"), "+15551230000");

    let report =
        migrate_fax_to_voice_service(&api, &api, &reporter, ORG, &rec, &MigrationPolicy::default())
            .await
            .expect("migration runs");

    assert!(matches!(
        report.outcome,
        MigrationState::ValidationRejected {
            phase: Phase::Provision,
            ..
        }
    ));
    assert!(report.outcome.fax_deprovisioned());
    assert_eq!(api.mutations().len(), 1);
}

#[tokio::test]
async fn test_release_poll_stops_once_number_is_free() {
    let api = FakeFoundry::default().did_answers(
        42,
        vec![vec!["+15551230000".into()], vec!["+15551230000".into()], vec![]],
    );
    let reporter = RecordingReporter::default();
    let rec = record(42, Some("u1"), "+15551230000");
    let policy = MigrationPolicy {
        cooldown: Duration::from_secs(5),
        release_check: ReleaseCheck::Poll {
            interval: Duration::from_secs(2),
            attempts: 10,
        },
    };

    let report = migrate_fax_to_voice_service(&api, &api, &reporter, ORG, &rec, &policy)
        .await
        .expect("migration runs");

    assert!(report.is_done());
    let calls = api.calls();
    let searches = calls
        .iter()
        .filter(|c| matches!(c, Call::SearchDids(_)))
        .count();
    let pauses: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            Call::Pause(d) => Some(*d),
            _ => None,
        })
        .collect();
    assert_eq!(searches, 3);
    assert_eq!(
        pauses,
        vec![
            Duration::from_secs(5),
            Duration::from_secs(2),
            Duration::from_secs(2)
        ]
    );
}

#[tokio::test]
async fn test_release_poll_gives_up_and_provisions_anyway() {
    let api = FakeFoundry::default().did(42, "+15551230000");
    let reporter = RecordingReporter::default();
    let rec = record(42, Some("u1"), "+15551230000");
    let policy = MigrationPolicy {
        cooldown: Duration::from_secs(5),
        release_check: ReleaseCheck::Poll {
            interval: Duration::from_secs(1),
            attempts: 2,
        },
    };

    let report = migrate_fax_to_voice_service(&api, &api, &reporter, ORG, &rec, &policy)
        .await
        .expect("migration runs");

    assert!(report.is_done());
    assert!(reporter.warned("provisioning anyway"));
}

#[tokio::test]
async fn test_batch_continues_after_transport_error() {
    let mut api = FakeFoundry::default();
    api.deprovision_transport_fails.insert(ServiceId(1));
    let reporter = RecordingReporter::default();
    let records = vec![
        record(1, Some("u1"), "+15550000001"),
        record(2, None, "+15550000002"),
    ];
    let mut seen = Vec::new();

    let entries = migrate_all(
        &api,
        &api,
        &reporter,
        ORG,
        &records,
        &MigrationPolicy::default(),
        |r| seen.push(r.fax_service_id()),
    )
    .await;

    assert_eq!(seen, vec![ServiceId(1), ServiceId(2)]);
    assert!(matches!(
        &entries[0],
        BatchEntry::Errored { service_id, .. } if *service_id == ServiceId(1)
    ));
    assert!(matches!(&entries[1], BatchEntry::Finished(r) if r.is_done()));

    let summary = BatchSummary::from_entries(&entries);
    assert_eq!(summary.done, 1);
    assert_eq!(summary.errored, 1);
    assert_eq!(summary.total(), 2);
}

#[tokio::test]
async fn test_batch_processes_records_strictly_in_order() {
    let api = FakeFoundry::default();
    let reporter = RecordingReporter::default();
    let records = vec![
        record(1, None, "+15550000001"),
        record(2, None, "+15550000002"),
    ];

    migrate_all(
        &api,
        &api,
        &reporter,
        ORG,
        &records,
        &MigrationPolicy::default(),
        |_| {},
    )
    .await;

    let order: Vec<ServiceId> = api
        .mutations()
        .into_iter()
        .map(|c| match c {
            Call::Deprovision(d) => d.service_id,
            Call::Provision(p) => ServiceId(if p.did.as_str().ends_with('1') { 1 } else { 2 }),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(order, vec![ServiceId(1), ServiceId(1), ServiceId(2), ServiceId(2)]);
}

#[tokio::test]
async fn test_provision_validation_transport_error_reports_stranded_number() {
    let api = FakeFoundry {
        validate_provision_transport_fails: true,
        ..FakeFoundry::default()
    };
    let reporter = RecordingReporter::default();
    let rec = record(42, Some("u1"), "+15551230000");

    let report =
        migrate_fax_to_voice_service(&api, &api, &reporter, ORG, &rec, &MigrationPolicy::default())
            .await
            .expect("provision-phase transport errors end the record");

    let MigrationState::TransportFailed { phase, message } = &report.outcome else {
        panic!("expected transport failure, got {:?}", report.outcome);
    };
    assert_eq!(*phase, Phase::Provision);
    assert!(message.contains("connection reset"));
    assert!(report.outcome.fax_deprovisioned());
    assert!(report.trail.contains(&MigrationState::Cooldown));
    assert!(reporter.warned("fax service 42 is already deprovisioned"));
    assert_eq!(api.mutations().len(), 1);
}

#[tokio::test]
async fn test_batch_counts_provision_transport_error_as_stranded() {
    let api = FakeFoundry {
        provision_transport_fails: true,
        ..FakeFoundry::default()
    };
    let reporter = RecordingReporter::default();
    let records = vec![record(42, Some("u1"), "+15551230000")];

    let entries = migrate_all(
        &api,
        &api,
        &reporter,
        ORG,
        &records,
        &MigrationPolicy::default(),
        |_| {},
    )
    .await;

    assert!(matches!(
        &entries[0],
        BatchEntry::Finished(r) if r.outcome.fax_deprovisioned() && !r.is_done()
    ));
    let summary = BatchSummary::from_entries(&entries);
    assert_eq!(summary.stranded, 1);
    assert_eq!(summary.errored, 1);
}
