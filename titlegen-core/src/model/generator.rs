use rand::Rng;

use crate::error::{Error, Result};

use super::chain::Chain;
use super::token::Token;

/// Hard cap on sampled tokens per walk. Bounds the worst case even if the
/// table contains a cycle that never reaches `End`.
pub const MAX_TOKENS: usize = 50;

/// Generates one title by weighted random walk over `chain`.
///
/// # Parameters
/// - `seed`: optional starting word. If some context holds it
///   (case-normalized), the walk starts there and that context's words
///   open the title; otherwise the walk starts from the all-`Start`
///   context.
/// - `rng`: the randomness source. Passing a seeded generator makes the
///   walk reproducible.
///
/// # Behavior
/// - At each step the next token is drawn from the current context's
///   candidates with probability proportional to its weight.
/// - The walk ends on sampling `End`, after `MAX_TOKENS` samples, or at a
///   context with no recorded successors.
/// - Sentinels are dropped; the remaining words are joined with single
///   spaces and title-cased.
///
/// # Errors
/// `EmptyChain` if the chain holds no transitions at all.
pub fn generate<R: Rng + ?Sized>(chain: &Chain, seed: Option<&str>, rng: &mut R) -> Result<String> {
	if chain.is_empty() {
		return Err(Error::EmptyChain);
	}

	let mut context = seed
		.and_then(|word| chain.seed_context(&word.to_lowercase()).cloned())
		.unwrap_or_else(|| chain.start_context());

	// A seeded start opens the title with the context's own words.
	let mut title: Vec<String> = context
		.tokens()
		.iter()
		.filter_map(|token| token.word().map(str::to_owned))
		.collect();

	for _ in 0..MAX_TOKENS {
		let next = match chain.state(&context).and_then(|state| state.sample(rng)) {
			Some(next) => next.clone(),
			// A context with no successors ends the walk early.
			None => break,
		};

		if next == Token::End {
			break;
		}

		if let Token::Word(word) = &next {
			title.push(word.clone());
		}
		context.advance(next);
	}

	Ok(title_case(&title))
}

/// Uppercases the first letter of each word, leaving the rest untouched.
fn title_case(words: &[String]) -> String {
	words
		.iter()
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<String>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use std::collections::{HashMap, HashSet};

	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::super::state::State;
	use super::super::token::Context;
	use super::*;

	fn words(title: &str) -> Vec<String> {
		title.split_whitespace().map(str::to_owned).collect()
	}

	fn godfather_chain() -> Chain {
		let corpus = vec![
			words("the godfather"),
			words("the great escape"),
			words("the godfather part ii"),
		];
		Chain::build(corpus, 1, [0; 32]).expect("build")
	}

	#[test]
	fn empty_chain_is_rejected() {
		let chain = Chain::from_parts(1, HashMap::new(), Vec::new());
		let mut rng = StdRng::seed_from_u64(1);
		let err = generate(&chain, None, &mut rng).err().expect("must fail");
		assert!(matches!(err, Error::EmptyChain));
	}

	#[test]
	fn unseeded_walk_yields_corpus_words_only() {
		let chain = godfather_chain();
		let vocabulary: HashSet<&str> =
			["the", "godfather", "great", "escape", "part", "ii"].into();

		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..20 {
			let title = generate(&chain, None, &mut rng).expect("generate");
			assert!(!title.is_empty());
			for word in title.split(' ') {
				assert!(vocabulary.contains(word.to_lowercase().as_str()), "unexpected word {word}");
			}
		}
	}

	#[test]
	fn seeded_walk_starts_with_seed_word() {
		let chain = godfather_chain();

		let mut rng = StdRng::seed_from_u64(11);
		for _ in 0..20 {
			let title = generate(&chain, Some("the"), &mut rng).expect("generate");
			assert!(title.starts_with("The"), "expected seed-led title, got {title}");
			assert!(title.split(' ').count() <= MAX_TOKENS);
		}
	}

	#[test]
	fn seed_is_case_normalized() {
		let chain = godfather_chain();
		let mut rng = StdRng::seed_from_u64(13);
		let title = generate(&chain, Some("GODFATHER"), &mut rng).expect("generate");
		assert!(title.starts_with("Godfather"), "got {title}");
	}

	#[test]
	fn unknown_seed_falls_back_to_start() {
		let chain = godfather_chain();
		let mut rng = StdRng::seed_from_u64(17);
		let title = generate(&chain, Some("zebra"), &mut rng).expect("generate");
		// Every training title opens with "the", so the fallback walk must too.
		assert!(title.starts_with("The"), "got {title}");
	}

	#[test]
	fn fixed_rng_reproduces_output() {
		let chain = godfather_chain();

		let mut first = StdRng::seed_from_u64(23);
		let mut second = StdRng::seed_from_u64(23);

		for _ in 0..10 {
			let a = generate(&chain, Some("the"), &mut first).expect("generate");
			let b = generate(&chain, Some("the"), &mut second).expect("generate");
			assert_eq!(a, b);
		}
	}

	#[test]
	fn cyclic_table_is_capped() {
		// "the" -> "the" is the only transition: End is unreachable and
		// only the step cap terminates the walk.
		let the = Context::new(vec![Token::Word("the".to_owned())]);
		let mut looping = State::new();
		looping.add_transition(Token::Word("the".to_owned()));

		let start = Context::all_start(1);
		let mut opening = State::new();
		opening.add_transition(Token::Word("the".to_owned()));

		let mut states = HashMap::new();
		states.insert(start.clone(), opening);
		states.insert(the.clone(), looping);
		let chain = Chain::from_parts(1, states, vec![start, the]);

		let mut rng = StdRng::seed_from_u64(29);
		let title = generate(&chain, None, &mut rng).expect("generate");
		assert_eq!(title.split(' ').count(), MAX_TOKENS);
	}

	#[test]
	fn dead_end_context_terminates_walk() {
		// The only context has no successors at all; the walk ends with
		// just the seed context's words.
		let escape = Context::new(vec![Token::Word("escape".to_owned())]);
		let mut states = HashMap::new();
		states.insert(escape.clone(), State::new());
		let chain = Chain::from_parts(1, states, vec![escape]);

		let mut rng = StdRng::seed_from_u64(31);
		let title = generate(&chain, Some("escape"), &mut rng).expect("generate");
		assert_eq!(title, "Escape");
	}

	#[test]
	fn titles_are_title_cased() {
		let chain = Chain::build(vec![words("the godfather")], 1, [0; 32]).expect("build");
		let mut rng = StdRng::seed_from_u64(37);
		let title = generate(&chain, None, &mut rng).expect("generate");
		assert_eq!(title, "The Godfather");
	}
}
