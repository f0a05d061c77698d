//! Corpus loading and normalization.
//!
//! Turns a plain-text file of one movie title per line into the cleaned
//! token sequences the chain is built from, and computes the corpus
//! fingerprint used to key the persisted chain.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Characters removed from every raw line before tokenization.
const BAD_CHARS: [char; 4] = ['"', '\'', '(', ')'];

/// Opens the corpus and yields one token sequence per usable title line.
///
/// Each line is cleaned (year marker cut off, bad characters removed,
/// lowercased) and split on whitespace. Lines that clean down to nothing
/// are skipped. The sequence is lazy and finite; re-invoke `load` to
/// restart it.
///
/// # Errors
/// `SourceUnavailable` if the file cannot be opened. A zero-title corpus
/// is reported by `Chain::build` once the sequence has been consumed.
pub fn load(source: &Path) -> Result<impl Iterator<Item = Vec<String>>> {
	let file = File::open(source).map_err(|error| Error::SourceUnavailable {
		path: source.to_path_buf(),
		source: error,
	})?;

	Ok(BufReader::new(file).lines().filter_map(|line| {
		let line = match line {
			Ok(line) => line,
			Err(error) => {
				log::warn!("skipping unreadable corpus line: {error}");
				return None;
			}
		};
		let title = clean_title(&line)?;
		Some(title.split_whitespace().map(str::to_owned).collect())
	}))
}

/// SHA-256 of the raw corpus bytes; the identity key for the cached chain.
///
/// # Errors
/// `SourceUnavailable` if the file cannot be opened or read.
pub fn fingerprint(source: &Path) -> Result<[u8; 32]> {
	let unavailable = |error| Error::SourceUnavailable {
		path: source.to_path_buf(),
		source: error,
	};

	let mut file = File::open(source).map_err(unavailable)?;
	let mut hasher = Sha256::new();
	std::io::copy(&mut file, &mut hasher).map_err(unavailable)?;
	Ok(hasher.finalize().into())
}

/// Normalizes a raw corpus line into a lowercase title.
///
/// - Cuts the line at a year marker (`(1939)`, `(19??)`, `(1984/II)`) when
///   one is present; everything after it is release metadata, not title.
/// - Removes quote and parenthesis characters.
/// - Lowercases and trims.
///
/// Returns `None` if nothing is left.
pub(crate) fn clean_title(line: &str) -> Option<String> {
	let raw = match find_year_marker(line) {
		Some(at) => &line[..at],
		None => line,
	};

	let cleaned: String = raw
		.chars()
		.filter(|c| !BAD_CHARS.contains(c))
		.flat_map(char::to_lowercase)
		.collect();

	let cleaned = cleaned.trim().to_owned();
	if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Byte offset of the first year marker in `line`, if any.
fn find_year_marker(line: &str) -> Option<usize> {
	for (at, _) in line.match_indices('(') {
		let rest = &line[at + 1..];
		let Some(end) = rest.find(')') else { continue };
		if is_year_marker(&rest[..end]) {
			return Some(at);
		}
	}
	None
}

/// A marker body is four digits or `?`, optionally followed by `/` and a
/// roman-numeral disambiguator, e.g. `1999`, `19??`, `1972/II`.
fn is_year_marker(body: &str) -> bool {
	let (year, suffix) = match body.split_once('/') {
		Some((year, suffix)) => (year, Some(suffix)),
		None => (body, None),
	};

	if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit() || c == '?') {
		return false;
	}

	match suffix {
		Some(suffix) => {
			!suffix.is_empty() && suffix.chars().all(|c| matches!(c, 'I' | 'V' | 'X' | 'L'))
		}
		None => true,
	}
}
