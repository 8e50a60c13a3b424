use std::collections::HashMap;
use std::collections::hash_map::Entry;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::context::Context;
use super::dict::{CodingDictionary, HashArrayDictionary};
use super::transition::TransitionTable;
use crate::tokenizer::{TextTokenizer, WhitespaceTokenizer};

/// A Markov chain for text: trained on sample text, it generates random
/// text with similar local statistics.
///
/// Memory overhead was an important consideration in developing this
/// module, therefore all the supporting types try to limit their
/// consumption to a minimum so chains trained on large corpora stay
/// practical.
///
/// ## Responsibilities
/// - Own the coding dictionary, the tokenizer handle and the random source
/// - Canonicalize n-gram contexts into a single state table
/// - Record weighted transitions while training
/// - Generate text through backoff search and weighted sampling
///
/// ## Invariants
/// - States and transition tables only ever grow
/// - After one successful `train` call the starting state is present
///   with at least one transition, which guarantees the backoff search
///   in `generate` terminates
///
/// A chain is exclusively owned by the calling thread; sharing one
/// across threads must be serialized externally.
#[derive(Serialize, Deserialize)]
#[serde(bound(
	serialize = "D: Serialize, D::Code: Serialize",
	deserialize = "D: Deserialize<'de>, D::Code: Deserialize<'de>"
))]
pub struct MarkovChain<D: CodingDictionary> {
	/// Number of preceding words that make up a state.
	order: usize,
	/// Needed to join generated words back into text as well as to
	/// split training text: reassembly depends on the tokenization
	/// policy of the language.
	#[serde(skip, default = "default_tokenizer")]
	tokenizer: Box<dyn TextTokenizer>,
	/// Canonical token <-> code mapping. The codes stored in the
	/// states below are meaningless without it, so the two always
	/// serialize together.
	dict: D,
	/// The states of the chain, each a combination of up to `order`
	/// words mapped to the weighted table of possible next words.
	/// Lookups and inserts always resolve to the single canonical
	/// entry for a given encoded content.
	states: HashMap<Context<D::Code>, TransitionTable<D::Code>>,
	#[serde(skip, default = "default_rng")]
	rng: Box<dyn RngCore>,
}

/// A deserialized chain falls back to whitespace tokenization.
fn default_tokenizer() -> Box<dyn TextTokenizer> {
	Box::new(WhitespaceTokenizer)
}

/// A deserialized chain draws from a fresh OS-seeded generator.
fn default_rng() -> Box<dyn RngCore> {
	Box::new(rand::rng())
}

impl MarkovChain<HashArrayDictionary<i16>> {
	/// Creates a chain with the default coding strategy (the
	/// hash-accelerated 16-bit array dictionary) and an OS-seeded
	/// random source.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn new(order: usize, tokenizer: Box<dyn TextTokenizer>) -> Result<Self, String> {
		Self::with_dictionary(order, tokenizer, HashArrayDictionary::new(), Box::new(rand::rng()))
	}
}

impl<D: CodingDictionary> MarkovChain<D> {
	/// Creates a chain with a custom dictionary strategy and random
	/// source.
	///
	/// Pick the dictionary from the expected vocabulary size and the
	/// memory vs. speed tradeoff: `ArrayDictionary` minimizes memory
	/// at O(vocabulary) per encoded token, `HashArrayDictionary`
	/// minimizes encoding time at the cost of a second copy of every
	/// token. A seeded random source makes generation reproducible.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn with_dictionary(
		order: usize,
		tokenizer: Box<dyn TextTokenizer>,
		dict: D,
		rng: Box<dyn RngCore>,
	) -> Result<Self, String> {
		if order < 1 {
			return Err("order must be >= 1".to_owned());
		}
		Ok(Self {
			order,
			tokenizer,
			dict,
			states: HashMap::new(),
			rng,
		})
	}

	/// Trains the chain on a piece of sample text.
	///
	/// Every token of `text` is recorded as an observed continuation
	/// of the up-to-`order` tokens immediately preceding it (fewer
	/// near the start of the sequence; the very first token continues
	/// the empty starting state).
	pub fn train(&mut self, text: &str) {
		let tokens = self.tokenizer.tokenize(text);
		for (i, token) in tokens.iter().enumerate() {
			let from = i.saturating_sub(self.order);
			let context = Context::from_words(&mut self.dict, &tokens[from..i]);
			let next = self.dict.encode(token);
			match self.states.entry(context) {
				Entry::Occupied(mut entry) => entry.get_mut().add(next),
				Entry::Vacant(entry) => {
					entry.insert(TransitionTable::new(next));
				}
			}
		}
	}

	/// Generates random text of at least `max_length` characters.
	///
	/// Words are generated one at a time: the last up-to-`order`
	/// generated words form the candidate state (a single empty word
	/// before anything is generated, matching how training sees the
	/// first token of a text). The search drops the earliest word of
	/// the candidate until a known state matches, falling back to the
	/// starting state. The chosen continuation is appended and the
	/// words rejoined, so the result is the shortest whole-token text
	/// whose character count reaches `max_length`, never truncated to
	/// it. `generate(0)` returns the empty string.
	///
	/// # Panics
	/// Panics if called before any successful `train` call: the
	/// starting state that makes the backoff search terminate does not
	/// exist yet.
	pub fn generate(&mut self, max_length: usize) -> String {
		let mut generated: Vec<String> = Vec::new();
		let mut text = String::new();
		while text.chars().count() < max_length {
			// the candidate state is made of the last (at most) `order` words
			let window: Vec<&str> = if generated.is_empty() {
				vec![""]
			} else {
				let from = generated.len().saturating_sub(self.order);
				generated[from..].iter().map(String::as_str).collect()
			};

			// narrow the scope of the search until a known state matches
			let mut scope = window.as_slice();
			let table = loop {
				let state = Context::from_words(&mut self.dict, scope);
				if let Some(table) = self.states.get(&state) {
					break table;
				}
				if scope.len() <= 1 {
					// go back to the starting state, present after any training
					let start = Context::start(&mut self.dict);
					break self
						.states
						.get(&start)
						.expect("generate called before any successful train call");
				}
				scope = &scope[1..];
			};

			let next = table.choose(self.rng.as_mut()).clone();
			generated.push(self.dict.decode(&next).to_owned());
			text = self.tokenizer.join(&generated);
		}
		text
	}

	/// The number of preceding words that make up a state.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of canonical states registered so far.
	pub fn state_count(&self) -> usize {
		self.states.len()
	}

	/// Every canonical state with its transition table.
	pub fn states(&self) -> impl Iterator<Item = (&Context<D::Code>, &TransitionTable<D::Code>)> {
		self.states.iter()
	}

	/// The coding dictionary owned by this chain.
	pub fn dictionary(&self) -> &D {
		&self.dict
	}

	/// The tokenizer this chain splits and joins text with.
	pub fn tokenizer(&self) -> &dyn TextTokenizer {
		self.tokenizer.as_ref()
	}
}
