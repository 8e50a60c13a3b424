/// Splits raw text into tokens and rejoins tokens into text.
///
/// The chain needs `join` as well as `tokenize`: reassembling generated
/// tokens into readable text depends on the tokenization policy of the
/// language (whitespace-separated languages rejoin with spaces,
/// logographic scripts with nothing).
///
/// `join` need not be an exact inverse of `tokenize`; it may reintroduce
/// separators that tokenization collapsed.
pub trait TextTokenizer {
	/// Splits `text` into an ordered, finite sequence of tokens.
	fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

	/// Reassembles tokens into human-readable text.
	fn join(&self, words: &[String]) -> String;
}

/// Tokenizer for whitespace-separated languages.
///
/// Splits on any run of whitespace and joins with single spaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceTokenizer;

impl TextTokenizer for WhitespaceTokenizer {
	fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
		text.split_whitespace().collect()
	}

	fn join(&self, words: &[String]) -> String {
		words.join(" ")
	}
}

/// Tokenizer for logographic scripts without word separators.
///
/// Every non-whitespace character is its own token; joining concatenates
/// the tokens back together.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogographicTokenizer;

impl TextTokenizer for LogographicTokenizer {
	fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
		text.char_indices()
			.filter(|(_, c)| !c.is_whitespace())
			.map(|(i, c)| &text[i..i + c.len_utf8()])
			.collect()
	}

	fn join(&self, words: &[String]) -> String {
		words.concat()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn owned(words: &[&str]) -> Vec<String> {
		words.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn whitespace_splits_and_rejoins() {
		let tokenizer = WhitespaceTokenizer;
		let words = tokenizer.tokenize("This  is\t a test.");
		assert_eq!(words, vec!["This", "is", "a", "test."]);
		assert_eq!(tokenizer.join(&owned(&words)), "This is a test.");
	}

	#[test]
	fn whitespace_tokenizes_nothing_from_blank_text() {
		assert!(WhitespaceTokenizer.tokenize("  \t\n").is_empty());
	}

	#[test]
	fn logographic_splits_per_character() {
		let tokenizer = LogographicTokenizer;
		let words = tokenizer.tokenize("你好 吗");
		assert_eq!(words, vec!["你", "好", "吗"]);
		assert_eq!(tokenizer.join(&owned(&words)), "你好吗");
	}
}
