use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "whalewatch")]
#[command(about = "Bitcoin whale watcher", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (defaults to $PORT, then 5000)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Aggregate once and print the /api/data JSON
    Fetch {
        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            commands::serve::run(port).await;
        }
        Commands::Fetch { compact } => {
            commands::fetch::run(compact).await;
        }
    }
}
