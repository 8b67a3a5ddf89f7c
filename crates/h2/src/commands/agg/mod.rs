pub mod extract;
pub mod list;
pub mod merge;

#[derive(clap::Subcommand)]
pub enum AggCommands {
    /// List the entries of an AGG file
    List(list::ListArgs),
    /// Extract an AGG file into a directory
    Extract(extract::ExtractArgs),
    /// Merge a directory into an AGG file
    Merge(merge::MergeArgs),
}

impl AggCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            AggCommands::List(list) => list.handle(),
            AggCommands::Extract(extract) => extract.handle(),
            AggCommands::Merge(merge) => merge.handle(),
        }
    }
}
