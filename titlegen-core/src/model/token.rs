use serde::{Deserialize, Serialize};

/// Atomic unit of generation: a word from a title, or one of the two
/// boundary sentinels.
///
/// `Start` and `End` only ever appear inside the transition table; they are
/// never part of a generated title.
///
/// # Invariants
/// - `Word` payloads are lowercase, non-empty, and contain no whitespace
/// - The derived ordering keeps successor iteration stable across runs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
	Start,
	End,
	Word(String),
}

impl Token {
	/// Returns the word payload, or `None` for a sentinel.
	pub fn word(&self) -> Option<&str> {
		match self {
			Token::Word(word) => Some(word.as_str()),
			_ => None,
		}
	}
}

/// Ordered window of the last `k` tokens, used as the transition-table key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Context(Vec<Token>);

impl Context {
	pub(crate) fn new(tokens: Vec<Token>) -> Self {
		Self(tokens)
	}

	/// The context a title begins at: `order` `Start` sentinels.
	pub(crate) fn all_start(order: usize) -> Self {
		Self(vec![Token::Start; order])
	}

	/// Drops the oldest token and appends `next`, keeping the window length.
	pub(crate) fn advance(&mut self, next: Token) {
		self.0.remove(0);
		self.0.push(next);
	}

	pub fn tokens(&self) -> &[Token] {
		&self.0
	}

	pub(crate) fn ends_with_word(&self, word: &str) -> bool {
		self.0.last().and_then(Token::word) == Some(word)
	}

	pub(crate) fn contains_word(&self, word: &str) -> bool {
		self.0.iter().any(|token| token.word() == Some(word))
	}
}
