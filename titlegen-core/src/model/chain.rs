use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::state::State;
use super::token::{Context, Token};

/// The complete transition table of an order-`k` chain, plus everything
/// needed to reuse it across runs.
///
/// # Responsibilities
/// - Build the table from cleaned token sequences
/// - Accumulate transition weights (pure accumulation: final weights do
///   not depend on input iteration order)
/// - Resolve the starting context of a seeded walk
///
/// # Invariants
/// - `order >= 1`
/// - Every context in `states` appears exactly once in `context_order`, at
///   its first-insertion position
/// - Every training title ends in `End`, so a walk from the all-`Start`
///   context can always terminate
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Chain {
	/// Number of prior tokens used to predict the next one.
	order: usize,

	/// Mapping from a context window to its observed successors.
	states: HashMap<Context, State>,

	/// Contexts in first-insertion order; the seed-lookup tie-break.
	context_order: Vec<Context>,

	/// Cleaned training titles. Deduplicates the build and lets callers
	/// filter out regenerated corpus titles.
	titles: HashSet<String>,

	/// SHA-256 of the corpus this chain was built from.
	fingerprint: [u8; 32],
}

impl Chain {
	/// Builds a chain of the given order from cleaned token sequences.
	///
	/// For each sequence: prepend `order` `Start` sentinels, append one
	/// `End`, then record every sliding window of length `order` together
	/// with the token that follows it. Each distinct title is counted once.
	///
	/// # Errors
	/// - `InvalidOrder` if `order < 1`
	/// - `EmptyCorpus` if `sequences` yields no titles
	pub fn build<I>(sequences: I, order: usize, fingerprint: [u8; 32]) -> Result<Self>
	where
		I: IntoIterator<Item = Vec<String>>,
	{
		if order < 1 {
			return Err(Error::InvalidOrder(order));
		}

		let mut chain = Self {
			order,
			states: HashMap::new(),
			context_order: Vec::new(),
			titles: HashSet::new(),
			fingerprint,
		};

		for words in sequences {
			chain.add_title(words);
		}

		if chain.titles.is_empty() {
			return Err(Error::EmptyCorpus);
		}

		log::info!(
			"built order-{} chain: {} contexts from {} titles",
			chain.order,
			chain.states.len(),
			chain.titles.len()
		);
		Ok(chain)
	}

	/// Folds one tokenized title into the table.
	///
	/// Titles shorter than the order contribute only the all-`Start` to
	/// `End` transition. Titles already seen are skipped.
	fn add_title(&mut self, words: Vec<String>) {
		if words.is_empty() {
			return;
		}

		// Each distinct cleaned title is counted once.
		if !self.titles.insert(words.join(" ")) {
			return;
		}

		if words.len() < self.order {
			self.record(Context::all_start(self.order), Token::End);
			return;
		}

		let mut sequence = vec![Token::Start; self.order];
		sequence.extend(words.into_iter().map(Token::Word));
		sequence.push(Token::End);

		for window in 0..sequence.len() - self.order {
			let context = Context::new(sequence[window..window + self.order].to_vec());
			let next = sequence[window + self.order].clone();
			self.record(context, next);
		}
	}

	fn record(&mut self, context: Context, next: Token) {
		if !self.states.contains_key(&context) {
			self.context_order.push(context.clone());
		}
		self.states.entry(context).or_insert_with(State::new).add_transition(next);
	}

	/// The chain order `k`.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Fingerprint of the corpus this chain was built from.
	pub fn fingerprint(&self) -> &[u8; 32] {
		&self.fingerprint
	}

	/// True if the table holds no transitions at all.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Number of distinct contexts in the table.
	pub fn context_count(&self) -> usize {
		self.states.len()
	}

	/// The successors of `context`, or `None` if it was never observed.
	pub fn state(&self, context: &Context) -> Option<&State> {
		self.states.get(context)
	}

	/// True if `title` matches a training title (case-normalized).
	pub fn knows_title(&self, title: &str) -> bool {
		self.titles.contains(&title.to_lowercase())
	}

	/// The context every title begins at.
	pub(crate) fn start_context(&self) -> Context {
		Context::all_start(self.order)
	}

	/// Starting context for a seeded walk.
	///
	/// Prefers the earliest context (first-insertion order) whose last
	/// token is `word`; falls back to the earliest context containing
	/// `word` anywhere; `None` if the word never occurs.
	pub(crate) fn seed_context(&self, word: &str) -> Option<&Context> {
		let mut containing = None;
		for context in &self.context_order {
			if context.ends_with_word(word) {
				return Some(context);
			}
			if containing.is_none() && context.contains_word(word) {
				containing = Some(context);
			}
		}
		containing
	}

	#[cfg(test)]
	pub(crate) fn from_parts(
		order: usize,
		states: HashMap<Context, State>,
		context_order: Vec<Context>,
	) -> Self {
		Self { order, states, context_order, titles: HashSet::new(), fingerprint: [0; 32] }
	}
}
