use clap::Args;
use gcwii_formats::DiscHeader;
use miette::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

use super::output::{self, field};

#[derive(clap::Subcommand)]
pub enum DiscCommands {
    /// Show the header of a disc image
    Info(InfoArgs),
}

impl DiscCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            DiscCommands::Info(info) => info.handle(),
        }
    }
}

#[derive(Args)]
pub struct InfoArgs {
    /// An input disc image
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Print the header as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let header =
            DiscHeader::open(&self.file).context(format!("path: {}", &self.file.display()))?;
        output::print(&header, self.json, render)
    }
}

fn render(header: &DiscHeader) -> String {
    [
        field("Title", header.title.bold()),
        field("Game id", &header.game_id),
        field("Platform", format!("{:?}", header.platform)),
        field("Disc type", format!("{:?}", header.disc_type)),
        field("Region", format!("{:?}", header.region)),
        field("Maker", &header.maker_code),
        field("Disc number", header.disc_number),
        field("Version", header.version),
        field("Audio streaming", header.audio_streaming),
        field("Stream buffer", header.stream_buffer_size),
    ]
    .concat()
}
