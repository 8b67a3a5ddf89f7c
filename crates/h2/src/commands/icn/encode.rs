use clap::Args;
use h2_icn::{IcnEncoder, IcnEncoderOptions};
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::create_file;

#[derive(Args)]
pub struct EncodeArgs {
    /// A directory of images, one per frame
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A target ICN file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Extension of the images to pick up
    #[arg(long, default_value = "png")]
    extension: String,

    /// Also write the encoded container into this directory
    #[arg(long, value_name = "DIR")]
    dump: Option<PathBuf>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl EncodeArgs {
    pub fn handle(&self) -> Result<()> {
        let encoder = IcnEncoder::new(
            IcnEncoderOptions::builder()
                .image_extension(&self.extension)
                .maybe_dump_path(self.dump.clone())
                .build(),
        );

        let blob = encoder
            .encode(&self.directory)
            .context(format!("encoding {}", &self.directory.display()))?;

        if blob.is_empty() {
            return Err(miette!(
                "no .{} images found in {}",
                self.extension,
                self.directory.display()
            ));
        }

        info!("writing {} ({} bytes)", self.output.display(), blob.len());
        create_file(&self.output, self.overwrite)?
            .write_all(&blob)
            .into_diagnostic()
            .context(format!("writing {}", &self.output.display()))?;

        Ok(())
    }
}
