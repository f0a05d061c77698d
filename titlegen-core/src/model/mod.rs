//! Top-level module for the title-generation chain.
//!
//! This module provides the word-level Markov chain, including:
//! - Token and context value types with boundary sentinels (`token`)
//! - Per-context weighted successor states (`state`)
//! - The order-k transition table and its construction (`chain`)
//! - Random-walk title generation (`generator`)

/// The transition table: order, contexts, weights, and training titles.
pub mod chain;

/// Random-walk title generation over a built chain.
pub mod generator;

/// A single chain node: the weighted successors of one context.
///
/// Tracks outgoing transitions and supports weighted random sampling.
pub mod state;

/// Token and context value types, including the boundary sentinels.
pub mod token;
