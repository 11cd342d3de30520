use clap::Args;
use gcwii_formats::TplFile;
use itertools::Itertools;
use miette::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

use super::output::{self, field};

#[derive(clap::Subcommand)]
pub enum TplCommands {
    /// Describe the textures of a TPL file
    Info(InfoArgs),
}

impl TplCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            TplCommands::Info(info) => info.handle(),
        }
    }
}

#[derive(Args)]
pub struct InfoArgs {
    /// An input TPL file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Print the textures as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let tpl =
            TplFile::open(&self.file).context(format!("path: {}", &self.file.display()))?;
        output::print(&tpl, self.json, render)
    }
}

fn render(tpl: &TplFile) -> String {
    tpl.textures()
        .iter()
        .enumerate()
        .map(|(i, texture)| {
            let mut text = format!("{}\n", format!("Texture {i}").bold());
            text.push_str(&field(
                "Size",
                format!("{}x{}", texture.width, texture.height),
            ));
            text.push_str(&field("Format", format!("{:?}", texture.format)));
            text.push_str(&field("Data", format!("{} bytes", texture.data.len())));
            text.push_str(&field(
                "Wrap",
                format!("{:?} / {:?}", texture.wrap_s, texture.wrap_t),
            ));
            text.push_str(&field(
                "Filter",
                format!("{} / {}", texture.min_filter, texture.mag_filter),
            ));
            text.push_str(&field(
                "LOD",
                format!(
                    "bias {} edge {} min {} max {}",
                    texture.lod_bias, texture.edge_lod, texture.min_lod, texture.max_lod
                ),
            ));
            if let Some(palette) = &texture.palette {
                text.push_str(&field(
                    "Palette",
                    format!("{} colors, {:?}", palette.item_count, palette.format),
                ));
            }
            text
        })
        .join("\n")
}
