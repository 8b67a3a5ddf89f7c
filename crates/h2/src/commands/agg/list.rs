use clap::Args;
use h2_agg::{AggArchive, AggOptions};
use itertools::Itertools;
use miette::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct ListArgs {
    /// An input AGG file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Width of the name slots
    #[arg(long, default_value_t = h2_agg::types::DEFAULT_NAME_WIDTH)]
    name_width: usize,

    /// Sort entries by name instead of directory order
    #[arg(long, default_value_t = false)]
    sort: bool,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let agg = AggArchive::open_with_options(
            &self.file,
            AggOptions::builder().name_width(self.name_width).build(),
        )
        .context(format!("path: {}", &self.file.display()))?;

        let entries = if self.sort {
            agg.entries().sorted_by_key(|(name, _)| *name).collect_vec()
        } else {
            agg.entries().collect_vec()
        };

        for (name, entry) in entries {
            let line = format!("{:<16} {:>10} {:>10}", name, entry.offset, entry.size);
            if agg.externals().contains(name) {
                println!("{} {}", line, "(override)".green());
            } else {
                println!("{}", line);
            }
        }

        println!(
            "{} entries, {} overrides",
            agg.len(),
            agg.externals().len()
        );

        Ok(())
    }
}
