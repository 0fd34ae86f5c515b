//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::domain::{BatchEntry, BatchSummary, CandidateRecord, Inventory, MigrationReport};
use crate::output::OutputContext;

/// Labelled fields of a record, in display order.
#[must_use]
pub fn candidate_fields(record: &CandidateRecord) -> [(&'static str, String); 6] {
    [
        ("username", record.display_username().to_string()),
        ("user_id", record.display_user_id().to_string()),
        (
            "service_department_id",
            record.service_department_id().to_string(),
        ),
        ("location_id", record.location_id().to_string()),
        ("fax_service_id", record.fax_service_id().to_string()),
        ("fax_did", record.fax_did().to_string()),
    ]
}

/// One-line outcome of a migrated record.
#[must_use]
pub fn migration_line(report: &MigrationReport) -> String {
    if report.is_done() {
        return format!(
            "fax service {} → voice DID-Addon on {}",
            report.service_id, report.did
        );
    }
    let mut line = format!("fax service {} ({}): {}", report.service_id, report.did, report.outcome);
    if report.outcome.fax_deprovisioned() {
        line.push_str("; fax service already deprovisioned, number left unassigned");
    }
    line
}

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render one candidate record as labelled fields.
    pub fn render_candidate(&self, record: &CandidateRecord) {
        println!();
        println!(
            "  {}",
            format!("Fax service {}", record.fax_service_id()).style(self.ctx.styles.bold)
        );
        for (label, value) in candidate_fields(record) {
            println!("    {:<22} {value}", label.style(self.ctx.styles.dim));
        }
    }

    /// Render every record of a listing pass, then any skipped services.
    pub fn render_inventory(&self, inventory: &Inventory) {
        if inventory.candidates.is_empty() {
            self.ctx.info("No active fax services found.");
        }
        for record in &inventory.candidates {
            self.render_candidate(record);
        }
        if !inventory.skipped.is_empty() {
            println!();
            self.ctx.header("Skipped:");
            for skipped in &inventory.skipped {
                self.ctx
                    .warn(&format!("fax service {}: {}", skipped.service_id, skipped.reason));
            }
        }
    }

    /// Render the result of one record's migration.
    pub fn render_migration(&self, report: &MigrationReport) {
        let line = migration_line(report);
        if report.is_done() {
            self.ctx.success(&line);
        } else {
            self.ctx.error(&line);
        }
    }

    /// Render the per-record results and totals of a batch.
    pub fn render_batch(&self, entries: &[BatchEntry]) {
        println!();
        self.ctx.header("Migration results:");
        for entry in entries {
            match entry {
                BatchEntry::Finished(report) => self.render_migration(report),
                BatchEntry::Errored {
                    service_id,
                    message,
                } => self
                    .ctx
                    .error(&format!("fax service {service_id}: aborted: {message}")),
            }
        }

        let summary = BatchSummary::from_entries(entries);
        println!();
        self.ctx.kv("Migrated:", &summary.done.to_string());
        self.ctx.kv("Rejected:", &summary.rejected.to_string());
        self.ctx.kv("Commit failed:", &summary.commit_failed.to_string());
        self.ctx.kv("Aborted:", &summary.errored.to_string());
        if summary.stranded > 0 {
            self.ctx.error(&format!(
                "{} number(s) deprovisioned from fax without a voice service; provision them manually",
                summary.stranded
            ));
        }
    }
}
