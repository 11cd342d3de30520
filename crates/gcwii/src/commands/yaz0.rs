use clap::Args;
use gcwii_io::{ByteOrder, EndianStream};
use gcwii_yaz0::Yaz0Header;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

#[derive(clap::Subcommand)]
pub enum Yaz0Commands {
    /// Decompress a Yaz0 file
    Decompress(DecompressArgs),
    /// Check whether a file is Yaz0 compressed
    Check(CheckArgs),
}

impl Yaz0Commands {
    pub fn handle(&self) -> Result<()> {
        match self {
            Yaz0Commands::Decompress(decompress) => decompress.handle(),
            Yaz0Commands::Check(check) => check.handle(),
        }
    }
}

#[derive(Args)]
pub struct DecompressArgs {
    /// An input Yaz0 file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl DecompressArgs {
    pub fn handle(&self) -> Result<()> {
        let data = gcwii_yaz0::decompress_file(&self.file)
            .context(format!("path: {}", &self.file.display()))?;

        info!("writing {} bytes to {}", data.len(), self.output.display());
        let mut out = if !self.overwrite {
            File::create_new(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        } else {
            File::create(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        };

        out.write_all(&data).into_diagnostic()?;
        Ok(())
    }
}

#[derive(Args)]
pub struct CheckArgs {
    /// A file to check
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl CheckArgs {
    pub fn handle(&self) -> Result<()> {
        if !gcwii_yaz0::is_compressed(&self.file)? {
            println!("{}: {}", self.file.display(), "not compressed".dimmed());
            return Ok(());
        }

        let header = read_header(&self.file)?;
        println!(
            "{}: {} ({} bytes decompressed)",
            self.file.display(),
            "Yaz0".green(),
            header.decompressed_size
        );
        Ok(())
    }
}

fn read_header(path: &Path) -> Result<Yaz0Header> {
    let header = EndianStream::open(path, ByteOrder::BigEndian)
        .and_then(|mut stream| stream.read_type::<Yaz0Header>())
        .context(format!("path: {}", path.display()))?;
    Ok(header)
}
