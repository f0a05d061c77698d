use clap::Parser;
use std::path::PathBuf;

/// Fake movie title generator driven by a Markov chain over real titles.
#[derive(Parser)]
#[command(name = "titlegen")]
#[command(about = "Generates plausible fake movie titles from a title corpus")]
#[command(version)]
pub struct Cli {
    /// Seed word: titles start from a context holding this word when the
    /// corpus knows it; silently ignored otherwise.
    pub seed: Option<String>,

    /// Path to the title corpus (plain text, one title per line).
    #[arg(short, long, default_value = "movies.list")]
    pub corpus: PathBuf,

    /// Path of the persisted chain cache.
    #[arg(long, default_value = "markov.bin")]
    pub chain: PathBuf,

    /// Chain order: number of prior words used to pick the next one.
    #[arg(short = 'k', long, default_value_t = 1)]
    pub order: usize,

    /// Number of titles to print.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Only print titles that do not already exist in the corpus.
    #[arg(long)]
    pub fresh: bool,

    /// Ignore any cached chain and rebuild from the corpus.
    #[arg(long)]
    pub rebuild: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
