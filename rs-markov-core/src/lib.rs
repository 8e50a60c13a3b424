//! Markov-chain text generation library.
//!
//! This crate provides an order-N Markov chain over text tokens including:
//! - Training on sample text and generation of statistically similar text
//! - Interchangeable token coding dictionaries with memory/speed tradeoffs
//! - Memory-minimal n-gram states and adaptive weighted transition tables
//! - A tokenizer seam for splitting text into tokens and rejoining them
//!
//! Memory overhead is the primary design constraint throughout: chains
//! trained on large corpora should stay practical, so every supporting
//! type keeps its footprint to a minimum.

/// Core Markov chain model: states, transitions, dictionaries, the chain.
pub mod model;

/// Tokenizer seam used by the chain to split and rejoin text.
pub mod tokenizer;
