use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::marker::PhantomData;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Canonical token <-> code mapping owned by one Markov chain.
///
/// `encode` is idempotent for the lifetime of an instance: the same token
/// text always yields the same code, and two different token texts never
/// share a code. Entries are never removed.
///
/// Codes are meaningless outside the instance that produced them: `decode`
/// must only be given codes previously returned by `encode` on the same
/// instance. Decoding anything else is undefined behavior; the
/// array-backed implementations fail fast with a panic.
pub trait CodingDictionary {
	/// Internal representation of a single encoded token.
	type Code: Clone + Eq + Hash;

	/// Returns the canonical code for `token`, registering a new code
	/// if the token has not been seen before.
	fn encode(&mut self, token: &str) -> Self::Code;

	/// Returns the token text registered for `code`.
	fn decode<'a>(&'a self, code: &'a Self::Code) -> &'a str;

	/// Number of distinct tokens registered so far.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Integer width used as the code type of the array-backed dictionaries.
///
/// Conversions are plain `as` casts: registering more tokens than the
/// positive range of the width (32767 for `i16`) silently wraps around
/// and collides with earlier codes. Callers pick the width from the
/// expected vocabulary size; nothing guards the limit.
pub trait CodeInt: Copy + Eq + Hash {
	fn from_index(index: usize) -> Self;
	fn index(self) -> usize;
}

impl CodeInt for i16 {
	fn from_index(index: usize) -> Self {
		index as i16
	}

	fn index(self) -> usize {
		self as usize
	}
}

impl CodeInt for i32 {
	fn from_index(index: usize) -> Self {
		index as i32
	}

	fn index(self) -> usize {
		self as usize
	}
}

/// Pass-through strategy: every token text is its own code.
///
/// No canonicalization happens at all. `len()` does not track anything
/// and always reports 0.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct IdentityDictionary;

impl IdentityDictionary {
	pub fn new() -> Self {
		Self
	}
}

impl CodingDictionary for IdentityDictionary {
	type Code = String;

	fn encode(&mut self, token: &str) -> String {
		token.to_owned()
	}

	fn decode<'a>(&'a self, code: &'a String) -> &'a str {
		code
	}

	/// Always 0; this strategy registers nothing.
	fn len(&self) -> usize {
		0
	}
}

/// Flyweight strategy: repeated token texts collapse onto one shared
/// allocation, which then serves as its own code.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InternDictionary {
	tokens: HashSet<Rc<str>>,
}

impl InternDictionary {
	pub fn new() -> Self {
		Self::default()
	}
}

impl CodingDictionary for InternDictionary {
	type Code = Rc<str>;

	fn encode(&mut self, token: &str) -> Rc<str> {
		if let Some(shared) = self.tokens.get(token) {
			return Rc::clone(shared);
		}
		let shared: Rc<str> = Rc::from(token);
		self.tokens.insert(Rc::clone(&shared));
		shared
	}

	fn decode<'a>(&'a self, code: &'a Rc<str>) -> &'a str {
		code
	}

	fn len(&self) -> usize {
		self.tokens.len()
	}
}

/// Append-only array strategy: a token's code is its index.
///
/// Whether a token already has a code is answered by scanning the whole
/// array, so encoding is O(len): the cheapest representation in memory
/// and the slowest to build.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayDictionary<C> {
	tokens: Vec<String>,
	#[serde(skip)]
	_code: PhantomData<C>,
}

impl<C: CodeInt> ArrayDictionary<C> {
	pub fn new() -> Self {
		Self {
			tokens: Vec::new(),
			_code: PhantomData,
		}
	}
}

impl<C: CodeInt> Default for ArrayDictionary<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C: CodeInt> CodingDictionary for ArrayDictionary<C> {
	type Code = C;

	fn encode(&mut self, token: &str) -> C {
		match self.tokens.iter().position(|known| known == token) {
			Some(index) => C::from_index(index),
			None => {
				let code = C::from_index(self.tokens.len());
				self.tokens.push(token.to_owned());
				code
			}
		}
	}

	fn decode<'a>(&'a self, code: &'a C) -> &'a str {
		&self.tokens[code.index()]
	}

	fn len(&self) -> usize {
		self.tokens.len()
	}
}

/// Array storage plus a token -> code index for O(1)-average encoding.
///
/// Same codes as `ArrayDictionary` for the same insertion order, but
/// every token is stored twice, trading memory for construction speed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HashArrayDictionary<C: CodeInt> {
	tokens: Vec<String>,
	index: HashMap<String, C>,
}

impl<C: CodeInt> HashArrayDictionary<C> {
	pub fn new() -> Self {
		Self {
			tokens: Vec::new(),
			index: HashMap::new(),
		}
	}
}

impl<C: CodeInt> CodingDictionary for HashArrayDictionary<C> {
	type Code = C;

	fn encode(&mut self, token: &str) -> C {
		if let Some(code) = self.index.get(token) {
			return *code;
		}
		let code = C::from_index(self.tokens.len());
		self.tokens.push(token.to_owned());
		self.index.insert(token.to_owned(), code);
		code
	}

	fn decode<'a>(&'a self, code: &'a C) -> &'a str {
		&self.tokens[code.index()]
	}

	fn len(&self) -> usize {
		self.tokens.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn check_round_trip<D>(dict: &mut D)
	where
		D: CodingDictionary,
		D::Code: std::fmt::Debug,
	{
		let alpha = dict.encode("alpha");
		let beta = dict.encode("beta");
		assert_ne!(alpha, beta);
		assert_eq!(dict.encode("alpha"), alpha);
		assert_eq!(dict.encode("beta"), beta);
		assert_eq!(dict.decode(&alpha), "alpha");
		assert_eq!(dict.decode(&beta), "beta");
	}

	#[test]
	fn array_16_round_trips() {
		let mut dict = ArrayDictionary::<i16>::new();
		check_round_trip(&mut dict);
		assert_eq!(dict.len(), 2);
	}

	#[test]
	fn array_32_round_trips() {
		let mut dict = ArrayDictionary::<i32>::new();
		check_round_trip(&mut dict);
		assert_eq!(dict.len(), 2);
	}

	#[test]
	fn hash_array_16_round_trips() {
		let mut dict = HashArrayDictionary::<i16>::new();
		check_round_trip(&mut dict);
		assert_eq!(dict.len(), 2);
	}

	#[test]
	fn hash_array_32_round_trips() {
		let mut dict = HashArrayDictionary::<i32>::new();
		check_round_trip(&mut dict);
		assert_eq!(dict.len(), 2);
	}

	#[test]
	fn identity_round_trips_without_tracking() {
		let mut dict = IdentityDictionary::new();
		check_round_trip(&mut dict);
		assert_eq!(dict.len(), 0);
	}

	#[test]
	fn intern_round_trips() {
		let mut dict = InternDictionary::new();
		check_round_trip(&mut dict);
		assert_eq!(dict.len(), 2);
	}

	#[test]
	fn intern_shares_one_allocation() {
		let mut dict = InternDictionary::new();
		let first = dict.encode("token");
		let second = dict.encode("token");
		assert!(Rc::ptr_eq(&first, &second));
	}

	#[test]
	fn array_and_hash_array_agree_on_codes() {
		let mut scanning = ArrayDictionary::<i16>::new();
		let mut hashed = HashArrayDictionary::<i16>::new();
		for token in ["a", "b", "c", "a", "b"] {
			assert_eq!(scanning.encode(token), hashed.encode(token));
		}
	}
}
