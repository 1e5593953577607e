use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mnemo")]
#[command(author, version, about = "Chat service with semantic memory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP chat server
    Serve {
        /// Bind address (overrides the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Reset the memory store and the conversation history
    Clear,
}
