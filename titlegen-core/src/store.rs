//! Chain persistence.
//!
//! The whole `Chain` is postcard-encoded into a single file. Writes go to
//! a sibling scratch file first and are renamed into place, so a crashed
//! or interrupted run never leaves a partially written chain behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{RestoreError, Result};
use crate::model::chain::Chain;

/// Serializes `chain` and atomically installs it at `target`.
///
/// An existing file at `target` is overwritten.
///
/// # Errors
/// `Encode` if serialization fails, `Io` for filesystem failures.
pub fn persist(chain: &Chain, target: &Path) -> Result<()> {
	let bytes = postcard::to_stdvec(chain)?;

	let scratch = scratch_path(target);
	fs::write(&scratch, &bytes)?;
	fs::rename(&scratch, target)?;

	log::info!("persisted chain to {} ({} bytes)", target.display(), bytes.len());
	Ok(())
}

/// Attempts to reload a previously persisted chain.
///
/// Every failure mode is recoverable: the caller is expected to fall back
/// to a fresh build.
///
/// # Errors
/// - `Missing` if there is no file at `source`
/// - `Unreadable` for any other read failure
/// - `Corrupt` if decoding fails (truncation included)
/// - `OrderMismatch` if the stored chain was built with a different order
/// - `StaleCorpus` if the corpus fingerprint no longer matches
pub fn restore(
	source: &Path,
	order: usize,
	fingerprint: &[u8; 32],
) -> Result<Chain, RestoreError> {
	let bytes = match fs::read(source) {
		Ok(bytes) => bytes,
		Err(error) if error.kind() == io::ErrorKind::NotFound => return Err(RestoreError::Missing),
		Err(error) => return Err(RestoreError::Unreadable(error)),
	};

	let chain: Chain = postcard::from_bytes(&bytes).map_err(RestoreError::Corrupt)?;

	if chain.order() != order {
		return Err(RestoreError::OrderMismatch { expected: order, found: chain.order() });
	}
	if chain.fingerprint() != fingerprint {
		return Err(RestoreError::StaleCorpus);
	}

	Ok(chain)
}

/// Sibling scratch path for the atomic install: `markov.bin` -> `markov.bin.tmp`.
fn scratch_path(target: &Path) -> PathBuf {
	let mut scratch = target.as_os_str().to_owned();
	scratch.push(".tmp");
	PathBuf::from(scratch)
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	fn words(title: &str) -> Vec<String> {
		title.split_whitespace().map(str::to_owned).collect()
	}

	fn sample_chain(order: usize, fingerprint: [u8; 32]) -> Chain {
		let corpus = vec![
			words("the godfather"),
			words("the great escape"),
			words("the godfather part ii"),
		];
		Chain::build(corpus, order, fingerprint).expect("build")
	}

	#[test]
	fn round_trip_preserves_chain() {
		let dir = tempdir().expect("temp dir");
		let target = dir.path().join("markov.bin");

		let chain = sample_chain(1, [7; 32]);
		persist(&chain, &target).expect("persist");

		let restored = restore(&target, 1, &[7; 32]).expect("restore");
		assert_eq!(restored, chain);
	}

	#[test]
	fn persist_overwrites_existing_file() {
		let dir = tempdir().expect("temp dir");
		let target = dir.path().join("markov.bin");

		let old = sample_chain(1, [1; 32]);
		persist(&old, &target).expect("persist old");

		let new = sample_chain(2, [2; 32]);
		persist(&new, &target).expect("persist new");

		let restored = restore(&target, 2, &[2; 32]).expect("restore");
		assert_eq!(restored, new);
	}

	#[test]
	fn persist_leaves_no_scratch_file() {
		let dir = tempdir().expect("temp dir");
		let target = dir.path().join("markov.bin");

		persist(&sample_chain(1, [0; 32]), &target).expect("persist");
		assert!(target.exists());
		assert!(!scratch_path(&target).exists());
	}

	#[test]
	fn restore_missing_file() {
		let dir = tempdir().expect("temp dir");
		let err = restore(&dir.path().join("absent.bin"), 1, &[0; 32]).err().expect("must fail");
		assert!(matches!(err, RestoreError::Missing));
	}

	#[test]
	fn restore_truncated_file_is_corrupt() {
		let dir = tempdir().expect("temp dir");
		let target = dir.path().join("markov.bin");

		persist(&sample_chain(1, [0; 32]), &target).expect("persist");
		let bytes = fs::read(&target).expect("read");
		fs::write(&target, &bytes[..bytes.len() / 2]).expect("truncate");

		let err = restore(&target, 1, &[0; 32]).err().expect("must fail");
		assert!(matches!(err, RestoreError::Corrupt(_)));
	}

	#[test]
	fn restore_checks_order() {
		let dir = tempdir().expect("temp dir");
		let target = dir.path().join("markov.bin");

		persist(&sample_chain(1, [0; 32]), &target).expect("persist");

		let err = restore(&target, 2, &[0; 32]).err().expect("must fail");
		assert!(matches!(err, RestoreError::OrderMismatch { expected: 2, found: 1 }));
	}

	#[test]
	fn restore_checks_fingerprint() {
		let dir = tempdir().expect("temp dir");
		let target = dir.path().join("markov.bin");

		persist(&sample_chain(1, [3; 32]), &target).expect("persist");

		let err = restore(&target, 1, &[4; 32]).err().expect("must fail");
		assert!(matches!(err, RestoreError::StaleCorpus));
	}
}
