use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

use super::token::Token;

/// A node in the Markov chain.
///
/// A `State` stores all observed transitions from one context to the next
/// token, weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during the build
/// - Sample the next token using weighted random sampling
///
/// ## Invariants
/// - Each transition weight is strictly positive
/// - Candidates live in a `BTreeMap`, so iteration order, and therefore
///   sampling under a fixed random stream, is identical across runs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// Outgoing transitions indexed by the next token.
	/// The value represents how many times this transition was observed.
	transitions: BTreeMap<Token, u64>,
}

impl State {
	/// Creates a new state with no observed transitions.
	pub(crate) fn new() -> Self {
		Self { transitions: BTreeMap::new() }
	}

	/// Records an occurrence of a transition toward `next`.
	///
	/// - If the transition already exists, its weight is increased.
	/// - Otherwise, a new transition is created with an initial weight of 1.
	pub(crate) fn add_transition(&mut self, next: Token) {
		*self.transitions.entry(next).or_insert(0) += 1;
	}

	/// Samples the next token using weighted random selection.
	///
	/// The probability of selecting a candidate is its weight divided by
	/// the sum of all weights in this state.
	///
	/// Returns `None` if the state has no transitions.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Token> {
		if self.transitions.is_empty() {
			return None;
		}

		let total: u64 = self.transitions.values().sum();
		if total == 0 {
			// Should not happen due to invariants, but kept for safety
			return None;
		}

		let mut r = rng.random_range(0..total);

		let mut fallback = None;
		for (next, weight) in &self.transitions {
			if r < *weight {
				return Some(next);
			}
			r -= weight;
			fallback = Some(next);
		}

		// Fallback: should not happen, but kept for safety.
		fallback
	}

	/// Weight of the transition toward `next`, or 0 if never observed.
	pub fn weight(&self, next: &Token) -> u64 {
		self.transitions.get(next).copied().unwrap_or(0)
	}

	/// Sum of all outgoing weights.
	pub fn total_weight(&self) -> u64 {
		self.transitions.values().sum()
	}
}
