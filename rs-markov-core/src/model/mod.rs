//! Top-level module for the Markov chain model.
//!
//! This module provides the text generation engine, including:
//! - The chain itself: training, backoff search, generation (`chain`)
//! - Encoded n-gram contexts acting as chain states (`context`)
//! - Weighted transition tables with adaptive storage (`transition`)
//! - Interchangeable token coding dictionaries (`dict`)

/// The Markov chain: canonical state table, training and generation.
pub mod chain;

/// Encoded n-gram contexts with size-specialized representations.
pub mod context;

/// Token <-> code canonicalization strategies with different
/// memory/speed tradeoffs.
pub mod dict;

/// Per-state weighted transition tables.
pub mod transition;
