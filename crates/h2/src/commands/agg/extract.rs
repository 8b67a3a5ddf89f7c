use clap::Args;
use h2_agg::{AggArchive, AggOptions};
use miette::{Context, IntoDiagnostic, Result};
use std::{
    io::Write,
    path::{Component, Path, PathBuf},
};
use tracing::{info, warn};

use crate::commands::create_file;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input AGG file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Width of the name slots
    #[arg(long, default_value_t = h2_agg::types::DEFAULT_NAME_WIDTH)]
    name_width: usize,

    /// Extract the archive's own bytes, ignoring overrides
    #[arg(long, default_value_t = false)]
    no_externals: bool,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let mut agg = AggArchive::open_with_options(
            &self.file,
            AggOptions::builder().name_width(self.name_width).build(),
        )
        .context(format!("path: {}", &self.file.display()))?;

        std::fs::create_dir_all(&self.directory)
            .into_diagnostic()
            .context(format!("creating {}", &self.directory.display()))?;

        let names = agg.file_names().map(str::to_owned).collect::<Vec<_>>();
        for name in names {
            let data = if self.no_externals {
                agg.read_raw(&name)?
            } else {
                agg.try_read(&name)?
            };

            if data.is_empty() {
                warn!("skipping empty entry {name}");
                continue;
            }

            let Some(p) = entry_path(&self.directory, &name) else {
                warn!("skipping {name}, it does not name a file inside the target");
                continue;
            };
            info!("writing {}", p.display());

            create_file(&p, self.overwrite)?
                .write_all(&data)
                .into_diagnostic()
                .context(format!("writing {}", &p.display()))?;
        }

        Ok(())
    }
}

/// Path of `name` inside `directory`, if the name is a plain file name
fn entry_path(directory: &Path, name: &str) -> Option<PathBuf> {
    if name.contains(['/', '\\']) {
        return None;
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(directory.join(name)),
        _ => None,
    }
}
