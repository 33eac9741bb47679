use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "poem-yield")]
#[command(about = "Fetch poems and author profiles from allpoetry.com")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Account name to log in with
    #[arg(short, long, global = true, env = "POETRY_USERNAME")]
    pub username: Option<String>,

    /// Account password
    #[arg(short, long, global = true, env = "POETRY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the poem links of an author
    Links {
        /// Author handle as it appears in profile URLs
        author: String,

        /// Stop after at least this many links
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Fetch the poems of an author
    Poems {
        /// Author handle as it appears in profile URLs
        author: String,

        /// Stop after at least this many poems
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Fetch a single poem
    Poem {
        /// Poem URL
        url: String,
    },

    /// Fetch an author profile
    Author {
        /// Author handle as it appears in profile URLs
        handle: String,
    },

    /// Fetch the curated famous poets
    Famous {
        /// Stop after at least this many authors
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only list the profile links
        #[arg(long)]
        links_only: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human readable text
    Text,
}
