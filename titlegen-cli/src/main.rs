//! titlegen - fake movie title generator.
//!
//! Thin collaborator around `titlegen-core`: argument parsing, logging,
//! restore-or-build orchestration, and stdout/stderr reporting.

mod cli;

use std::collections::HashSet;

use anyhow::Context as _;
use log::{debug, info};

use titlegen_core::corpus;
use titlegen_core::model::chain::Chain;
use titlegen_core::model::generator;
use titlegen_core::store;

use crate::cli::Cli;

/// Retry budget per requested title. Bounds the generation loop when the
/// chain cannot produce enough distinct titles.
const MAX_ATTEMPTS_PER_TITLE: usize = 25;

/// Initialize the logger with appropriate settings
fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;

    Builder::from_default_env()
        .format(|buf, record| {
            writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
        })
        .filter_level(log::LevelFilter::Info)
        .parse_default_env() // Allows RUST_LOG env var to override
        .init();
}

fn main() {
    init_logger();

    let cli = Cli::parse_args();

    if let Err(error) = run(&cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let fingerprint = corpus::fingerprint(&cli.corpus)?;
    let chain = load_or_build(cli, fingerprint)?;

    let mut rng = rand::rng();
    let seed = cli.seed.as_deref();

    let mut printed = HashSet::new();
    let mut attempts = 0;
    while printed.len() < cli.count && attempts < cli.count * MAX_ATTEMPTS_PER_TITLE {
        attempts += 1;
        let title = generator::generate(&chain, seed, &mut rng)?;

        // Skip blanks, the bare seed word, per-run repeats, and (with
        // --fresh) titles that already exist in the corpus.
        if title.is_empty() {
            continue;
        }
        if seed.is_some_and(|word| title.eq_ignore_ascii_case(word)) {
            continue;
        }
        if cli.fresh && chain.knows_title(&title) {
            continue;
        }
        if !printed.insert(title.clone()) {
            continue;
        }
        println!("{title}");
    }

    if printed.len() < cli.count {
        info!(
            "stopped after {attempts} attempts with {} distinct titles",
            printed.len()
        );
    }

    Ok(())
}

/// Returns the cached chain when it matches the corpus and order;
/// otherwise rebuilds from the corpus and refreshes the cache.
fn load_or_build(cli: &Cli, fingerprint: [u8; 32]) -> anyhow::Result<Chain> {
    if !cli.rebuild {
        match store::restore(&cli.chain, cli.order, &fingerprint) {
            Ok(chain) => {
                info!("loaded cached chain from {}", cli.chain.display());
                return Ok(chain);
            }
            Err(error) => debug!("cache miss ({error}), rebuilding chain"),
        }
    }

    let titles = corpus::load(&cli.corpus)?;
    let chain = Chain::build(titles, cli.order, fingerprint)
        .context("failed to build chain from corpus")?;
    store::persist(&chain, &cli.chain)
        .with_context(|| format!("failed to persist chain to {}", cli.chain.display()))?;

    Ok(chain)
}
