use clap::Args;
use gcwii_rarc::RarcArchive;
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::{
    io::Cursor,
    path::{Path, PathBuf},
};
use tracing::info;

use super::output;

#[derive(clap::Subcommand)]
pub enum RarcCommands {
    /// List the files inside a RARC archive
    List(ListArgs),
}

impl RarcCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            RarcCommands::List(list) => list.handle(),
        }
    }
}

#[derive(Args)]
pub struct ListArgs {
    /// An input RARC file, optionally Yaz0 compressed
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Print the listing as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, PartialEq, Serialize)]
struct Listing {
    nodes: usize,
    total_size: u64,
    files: Vec<Listed>,
}

#[derive(Debug, PartialEq, Serialize)]
struct Listed {
    path: String,
    id: u16,
    size: u64,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let archive = load(&self.file)?;
        output::print(&listing(&archive)?, self.json, render)
    }
}

fn load(path: &Path) -> Result<RarcArchive> {
    let mut data = std::fs::read(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))?;
    if gcwii_yaz0::has_magic(&data) {
        info!("decompressing {}", path.display());
        data = gcwii_yaz0::decompress(&data).context(format!("path: {}", path.display()))?;
    }

    let archive =
        RarcArchive::new(Cursor::new(data)).context(format!("path: {}", path.display()))?;
    Ok(archive)
}

fn listing(archive: &RarcArchive) -> Result<Listing> {
    let files = archive
        .file_names()
        .map(|path| {
            let file = archive.by_name(path)?;
            Ok(Listed {
                path: path.to_string(),
                id: file.id(),
                size: file.size(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Listing {
        nodes: archive.nodes().len(),
        total_size: archive.total_file_size(),
        files,
    })
}

fn render(listing: &Listing) -> String {
    let width = listing
        .files
        .iter()
        .map(|f| f.size.to_string().len())
        .max()
        .unwrap_or(1);

    let mut text = listing
        .files
        .iter()
        .map(|f| {
            let (dir, name) = match f.path.rsplit_once('/') {
                Some((dir, name)) => (format!("{dir}/"), name),
                None => (String::new(), f.path.as_str()),
            };
            format!("{:>width$}  {}{}", f.size, dir.dimmed(), name)
        })
        .join("\n");
    if !text.is_empty() {
        text.push('\n');
    }

    text.push_str(&format!(
        "{} files, {} bytes, {} nodes\n",
        listing.files.len().bold(),
        listing.total_size.bold(),
        listing.nodes.bold()
    ));
    text
}
