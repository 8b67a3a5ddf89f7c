use clap::Args;
use h2_icn::IcnSprite;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{fs::File, io::BufReader, path::PathBuf};

#[derive(Args)]
pub struct InfoArgs {
    /// An input ICN file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let icn = IcnSprite::new(BufReader::new(f))?;

        println!(
            "{} frames, {} bytes of frame data",
            icn.len().bold(),
            icn.header().total_size
        );
        for (i, frame) in icn.frames().iter().enumerate() {
            println!(
                "{:>5}: {}x{} at ({}, {}), data offset {}",
                i,
                frame.width(),
                frame.height(),
                frame.header.offset_x,
                frame.header.offset_y,
                frame.header.pixel_data_offset
            );
        }

        Ok(())
    }
}
