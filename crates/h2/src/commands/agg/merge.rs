use clap::Args;
use h2_agg::AggWriter;
use miette::miette;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tracing::info;
use walkdir::WalkDir;

use crate::commands::create_file;

#[derive(Args)]
pub struct MergeArgs {
    /// An input directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A target AGG file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Width of the name slots
    #[arg(long, default_value_t = h2_agg::types::DEFAULT_NAME_WIDTH)]
    name_width: usize,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl MergeArgs {
    pub fn handle(&self) -> Result<()> {
        info!("creating {}", &self.file.display());

        let files = WalkDir::new(&self.directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .collect::<Vec<_>>();

        if files.is_empty() {
            return Err(miette!("directory is empty"));
        }

        let mut out = create_file(&self.file, self.overwrite)?;
        let mut agg = AggWriter::with_name_width(&mut out, self.name_width);

        for file in files {
            let name = file.file_name().to_string_lossy().to_ascii_uppercase();
            info!("merging {}", name);

            agg.start_file(&name)
                .context(format!("starting entry for {}", name))?;

            let mut f = File::open(file.path())
                .into_diagnostic()
                .context(format!("opening {}", file.path().display()))?;

            std::io::copy(&mut f, &mut agg)
                .into_diagnostic()
                .context(format!("copying {}", file.path().display()))?;
        }

        agg.finish().context("finalizing agg file")?;

        Ok(())
    }
}
