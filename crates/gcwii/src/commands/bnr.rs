use clap::Args;
use gcwii_formats::Banner;
use miette::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

use super::output::{self, field};

#[derive(clap::Subcommand)]
pub enum BnrCommands {
    /// Show the texts of a banner
    Info(InfoArgs),
}

impl BnrCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            BnrCommands::Info(info) => info.handle(),
        }
    }
}

#[derive(Args)]
pub struct InfoArgs {
    /// An input BNR file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Print the banner as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let banner =
            Banner::open(&self.file).context(format!("path: {}", &self.file.display()))?;
        output::print(&banner, self.json, render)
    }
}

fn render(banner: &Banner) -> String {
    [
        field("Kind", format!("{:?}", banner.kind).bold()),
        field("Title", &banner.game_title),
        field("Developer", &banner.developer),
        field("Full title", &banner.full_game_title),
        field("Full developer", &banner.full_developer),
        field("Description", &banner.description),
        field("Graphic", format!("{} bytes", banner.graphic.len())),
    ]
    .concat()
}
