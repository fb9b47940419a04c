use std::path::PathBuf;

use clap::{Parser, Subcommand, builder::styling};

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "wikilens")]
#[command(author, version, long_about = None)]
#[command(styles = STYLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra configuration file layered over the user config
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare language editions of one article
    Compare {
        /// Article text file for one language, as LANG=FILE (repeatable)
        #[arg(short, long = "article", value_name = "LANG=FILE", required = true)]
        articles: Vec<String>,

        /// Language the comparison is written in
        #[arg(short = 'l', long)]
        output_language: String,

        /// Use the humorous persona
        #[arg(long)]
        humor: bool,

        /// Pricing tier: free | premium
        #[arg(short, long)]
        tier: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a follow-up question about a comparison
    Chat {
        /// File holding the previous comparison text
        #[arg(long, value_name = "FILE")]
        comparison: PathBuf,

        /// Article title
        #[arg(long)]
        title: String,

        /// Compared language codes, comma separated
        #[arg(long, value_delimiter = ',')]
        languages: Vec<String>,

        /// JSON file with earlier turns: [{"role": "user", "content": "..."}]
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,

        /// The new question
        #[arg(short, long)]
        message: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration (keys masked)
    Show,

    /// Validate configuration and report usable paths
    Validate,
}
