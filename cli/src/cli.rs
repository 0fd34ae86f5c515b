//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{ArgGroup, Parser};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::domain::ServiceId;
use crate::infra::config::EnvConfigSource;
use crate::infra::foundry::FoundryClient;
use crate::infra::pause::TokioPause;
use crate::output::progress::SpinnerPause;

/// Fax service inventory and fax-to-voice DID migration
#[derive(Parser)]
#[command(
    name = "warden",
    version,
    arg_required_else_help = true,
    group(ArgGroup::new("mode").required(true).multiple(false))
)]
pub struct Cli {
    /// Organization code the fax services belong to
    pub organization: String,

    /// Print every active fax service with its owner and DID
    #[arg(short = 'p', long, group = "mode")]
    pub print_fax: bool,

    /// Print one fax service by service id
    #[arg(short = 's', long, value_name = "ID", group = "mode")]
    pub single_fax_id: Option<u64>,

    /// Migrate every active fax service to a voice DID-Addon
    #[arg(short = 'm', long, group = "mode")]
    pub migrate_all: bool,

    /// Like --migrate-all, printing each record before migrating it
    #[arg(short = 'M', long, group = "mode")]
    pub migrate_all_verbose: bool,

    /// Migrate one fax service by service id
    #[arg(short = 'i', long, value_name = "ID", group = "mode")]
    pub migrate_single_id: Option<u64>,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Skip the confirmation prompt before migrating
    #[arg(short, long, global = true)]
    pub yes: bool,
}

/// The single operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    PrintFax,
    Inspect(ServiceId),
    MigrateAll { verbose: bool },
    MigrateSingle(ServiceId),
}

impl Cli {
    /// The selected mode, if any flag of the `mode` group was given.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        if self.print_fax {
            Some(Mode::PrintFax)
        } else if let Some(id) = self.single_fax_id {
            Some(Mode::Inspect(ServiceId(id)))
        } else if self.migrate_all || self.migrate_all_verbose {
            Some(Mode::MigrateAll {
                verbose: self.migrate_all_verbose,
            })
        } else {
            self.migrate_single_id.map(|id| Mode::MigrateSingle(ServiceId(id)))
        }
    }

    /// Execute the selected mode.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or the operation fails.
    pub async fn run(self) -> Result<()> {
        let Some(mode) = self.mode() else {
            anyhow::bail!("no mode selected; see --help");
        };
        let flags = AppFlags {
            output: OutputFlags {
                no_color: self.no_color,
                quiet: self.quiet,
            },
            behaviour: BehaviourFlags { yes: self.yes },
        };
        let app = AppContext::new(&flags, &EnvConfigSource::default())?;
        let client = FoundryClient::new(&app.config)?;
        let pause = SpinnerPause::new(&app.output, TokioPause);
        let organization = self.organization.as_str();

        match mode {
            Mode::PrintFax => commands::list::run(&app, &client, organization).await,
            Mode::Inspect(id) => commands::inspect::run(&app, &client, organization, id).await,
            Mode::MigrateAll { verbose } => {
                commands::migrate::run_all(&app, &client, &pause, organization, verbose).await
            }
            Mode::MigrateSingle(id) => {
                commands::migrate::run_single(&app, &client, &pause, organization, id).await
            }
        }
    }
}
