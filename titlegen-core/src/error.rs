//! Error types for corpus loading, chain construction, and persistence.
//!
//! `Error` is the fatal taxonomy: callers report it and exit. `RestoreError`
//! is recoverable and is always answered by rebuilding the chain from the
//! corpus, never surfaced to the user.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for chain operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal errors; none of these are retried.
#[derive(Error, Debug)]
pub enum Error {
	/// The corpus file could not be opened or read.
	#[error("corpus source {} unavailable: {source}", .path.display())]
	SourceUnavailable {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The corpus produced zero usable titles.
	#[error("corpus produced no titles")]
	EmptyCorpus,

	/// The requested chain order is below 1.
	#[error("chain order must be at least 1, got {0}")]
	InvalidOrder(usize),

	/// The chain holds no transitions, so nothing can be generated.
	#[error("chain has no transitions")]
	EmptyChain,

	/// Filesystem failure while persisting the chain.
	#[error("chain store I/O error: {0}")]
	Io(#[from] io::Error),

	/// Chain encoding failure.
	#[error("chain encoding error: {0}")]
	Encode(#[from] postcard::Error),
}

/// Recoverable restore failures; the caller falls back to a fresh build.
#[derive(Error, Debug)]
pub enum RestoreError {
	#[error("no persisted chain found")]
	Missing,

	#[error("persisted chain unreadable: {0}")]
	Unreadable(#[source] io::Error),

	#[error("persisted chain corrupt or truncated: {0}")]
	Corrupt(#[source] postcard::Error),

	#[error("persisted chain has order {found}, expected {expected}")]
	OrderMismatch { expected: usize, found: usize },

	#[error("persisted chain was built from a different corpus")]
	StaleCorpus,
}
