use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for sift
#[derive(Debug, Parser)]
#[command(name = "sift", version)]
#[command(about = "Index local documents and answer questions from them", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ~/.sift/config.toml, created if missing)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Index snapshot to use instead of the configured store path
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Index a file or every .txt/.md file under a directory")]
    Index {
        #[arg(help = "File or directory to index")]
        path: PathBuf,
    },

    #[command(about = "Answer a question from the indexed documents")]
    Query {
        #[arg(help = "Question to answer")]
        question: String,

        #[arg(short = 'k', long, help = "Number of chunks to retrieve (overrides config)")]
        top_k: Option<usize>,

        #[arg(long, help = "Do not print the supporting sources")]
        no_sources: bool,
    },

    #[command(about = "Show the chunks most similar to a question without generating")]
    Search {
        #[arg(help = "Text to search for")]
        question: String,

        #[arg(short = 'k', long, help = "Number of chunks to return (overrides config)")]
        top_k: Option<usize>,
    },

    #[command(about = "Print the chunks the configured splitter produces for a file")]
    Chunk {
        #[arg(help = "File to split")]
        file: PathBuf,
    },

    #[command(about = "Show index statistics")]
    Stats,

    #[command(about = "Write a default configuration file")]
    InitConfig {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}
