pub mod bnr;
pub mod disc;
mod output;
pub mod rarc;
pub mod tpl;
pub mod yaz0;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle Yaz0 compressed files
    Yaz0 {
        #[command(subcommand)]
        command: yaz0::Yaz0Commands,
    },
    /// Handle RARC archives
    Rarc {
        #[command(subcommand)]
        command: rarc::RarcCommands,
    },
    /// Handle BNR banners
    Bnr {
        #[command(subcommand)]
        command: bnr::BnrCommands,
    },
    /// Handle TPL textures
    Tpl {
        #[command(subcommand)]
        command: tpl::TplCommands,
    },
    /// Handle disc images
    Disc {
        #[command(subcommand)]
        command: disc::DiscCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Yaz0 { command } => command.handle(),
            Commands::Rarc { command } => command.handle(),
            Commands::Bnr { command } => command.handle(),
            Commands::Tpl { command } => command.handle(),
            Commands::Disc { command } => command.handle(),
        }
    }
}
