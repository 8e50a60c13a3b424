use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::dict::CodingDictionary;

/// A state of the Markov chain: the encoded sequence of up to N tokens
/// preceding a point in the text.
///
/// The representation is specialized by word count purely to keep small
/// contexts off the heap; callers see no behavioral difference between
/// the variants. Equality and hashing cover the encoded contents only,
/// so two contexts are comparable only when built through the same
/// dictionary; this is why every operation takes the dictionary as a
/// parameter instead of storing it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Context<C> {
	/// A single-word context. The empty-string unigram doubles as the
	/// canonical starting state.
	Unigram(C),
	/// A two-word context, kept inline.
	Bigram(C, C),
	/// The general form for three or more words.
	Ngram(Box<[C]>),
}

impl<C: Clone + Eq + Hash> Context<C> {
	/// Builds the representation best matching the number of words.
	///
	/// Zero words produce the empty-string unigram, the canonical
	/// starting state. Two calls with the same word sequence and the
	/// same dictionary always produce equal contexts, so they resolve
	/// to the same canonical table entry.
	pub fn from_words<D, S>(dict: &mut D, words: &[S]) -> Self
	where
		D: CodingDictionary<Code = C>,
		S: AsRef<str>,
	{
		match words {
			[] => Context::Unigram(dict.encode("")),
			[word] => Context::Unigram(dict.encode(word.as_ref())),
			[first, second] => Context::Bigram(dict.encode(first.as_ref()), dict.encode(second.as_ref())),
			_ => Context::Ngram(words.iter().map(|word| dict.encode(word.as_ref())).collect()),
		}
	}

	/// The canonical starting state (zero preceding words).
	pub fn start<D>(dict: &mut D) -> Self
	where
		D: CodingDictionary<Code = C>,
	{
		Self::from_words::<D, &str>(dict, &[])
	}

	/// Number of words in this context.
	pub fn word_count(&self) -> usize {
		match self {
			Context::Unigram(_) => 1,
			Context::Bigram(_, _) => 2,
			Context::Ngram(codes) => codes.len(),
		}
	}

	/// Decodes the `index`-th word of this context.
	///
	/// # Panics
	/// Panics if `index` is not within `[0, word_count())`.
	pub fn word<'a, D>(&'a self, index: usize, dict: &'a D) -> &'a str
	where
		D: CodingDictionary<Code = C>,
	{
		dict.decode(self.code(index))
	}

	/// Decodes every word of this context, in order.
	pub fn words<'a, D>(&'a self, dict: &'a D) -> Vec<&'a str>
	where
		D: CodingDictionary<Code = C>,
	{
		(0..self.word_count()).map(|index| self.word(index, dict)).collect()
	}

	fn code(&self, index: usize) -> &C {
		match self {
			Context::Unigram(code) if index == 0 => code,
			Context::Bigram(first, _) if index == 0 => first,
			Context::Bigram(_, second) if index == 1 => second,
			Context::Ngram(codes) => &codes[index],
			_ => panic!("word index {index} out of bounds for a {}-word context", self.word_count()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::dict::HashArrayDictionary;

	#[test]
	fn same_words_same_context() {
		let mut dict = HashArrayDictionary::<i16>::new();
		let first = Context::from_words(&mut dict, &["This", "is"]);
		let second = Context::from_words(&mut dict, &["This", "is"]);
		assert_eq!(first, second);
		assert_ne!(first, Context::from_words(&mut dict, &["is", "This"]));
	}

	#[test]
	fn zero_words_is_the_starting_state() {
		let mut dict = HashArrayDictionary::<i16>::new();
		let start = Context::start(&mut dict);
		assert_eq!(start, Context::from_words::<_, &str>(&mut dict, &[]));
		assert_eq!(start.word_count(), 1);
		assert_eq!(start.word(0, &dict), "");
	}

	#[test]
	fn representation_follows_word_count() {
		let mut dict = HashArrayDictionary::<i16>::new();
		let one = Context::from_words(&mut dict, &["a"]);
		let two = Context::from_words(&mut dict, &["a", "b"]);
		let four = Context::from_words(&mut dict, &["a", "b", "c", "d"]);
		assert_eq!(one.word_count(), 1);
		assert_eq!(two.word_count(), 2);
		assert_eq!(four.word_count(), 4);
		assert_eq!(four.words(&dict), vec!["a", "b", "c", "d"]);
		assert_eq!(two.word(1, &dict), "b");
	}

	#[test]
	#[should_panic]
	fn word_index_out_of_bounds() {
		let mut dict = HashArrayDictionary::<i16>::new();
		let two = Context::from_words(&mut dict, &["a", "b"]);
		two.word(2, &dict);
	}
}
