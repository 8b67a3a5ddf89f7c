pub mod encode;
pub mod info;

#[derive(clap::Subcommand)]
pub enum IcnCommands {
    /// Build an ICN file from a directory of images
    Encode(encode::EncodeArgs),
    /// Show the frames of an ICN file
    Info(info::InfoArgs),
}

impl IcnCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            IcnCommands::Encode(encode) => encode.handle(),
            IcnCommands::Info(info) => info.handle(),
        }
    }
}
