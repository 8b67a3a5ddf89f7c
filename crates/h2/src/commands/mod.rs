use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::Path};

pub mod agg;
pub mod icn;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle AGG archives
    Agg {
        #[command(subcommand)]
        command: agg::AggCommands,
    },
    /// Handle ICN sprite containers
    Icn {
        #[command(subcommand)]
        command: icn::IcnCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Agg { command } => command.handle(),
            Commands::Icn { command } => command.handle(),
        }
    }
}

/// Create `path`, refusing to replace an existing file unless `overwrite` is set
pub(crate) fn create_file(path: &Path, overwrite: bool) -> Result<File> {
    if overwrite {
        File::create(path)
    } else {
        File::create_new(path)
    }
    .into_diagnostic()
    .context(format!("creating {}", path.display()))
}
