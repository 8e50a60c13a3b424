use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rs_markov_core::model::chain::MarkovChain;
use rs_markov_core::model::dict::HashArrayDictionary;
use rs_markov_core::tokenizer::WhitespaceTokenizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Corpus file to imitate; every line is trained separately
	let corpus = std::env::args()
		.nth(1)
		.unwrap_or_else(|| "./data/corpus.txt".to_owned());

	// Load the cached binary model if one exists, otherwise train an
	// order-2 chain on the corpus and cache it for the next run
	let mut chain = load_or_train(Path::new(&corpus))?;

	print_stats(&chain);

	// Generate 10 texts of at least 500 characters each
	for i in 0..10 {
		let text = chain.generate(500);
		println!("--- text {} ({} chars)", i + 1, text.chars().count());
		println!("{}", text);
	}

	Ok(())
}

/// Loads a chain from the corpus' `.bin` sibling if present, otherwise
/// trains line by line and writes the cache.
///
/// A reloaded chain joins text with the whitespace tokenizer and draws
/// from a fresh random source; only the dictionary and the state table
/// travel through the file.
fn load_or_train(corpus: &Path) -> Result<MarkovChain<HashArrayDictionary<i16>>, Box<dyn std::error::Error>> {
	// The trained model caches next to the corpus: data/corpus.txt
	// gets its model in data/corpus.bin
	let cache = corpus.with_extension("bin");
	if cache.exists() {
		return Ok(postcard::from_bytes(&fs::read(&cache)?)?);
	}

	let mut chain = MarkovChain::new(2, Box::new(WhitespaceTokenizer))?;
	for line in fs::read_to_string(corpus)?.lines() {
		chain.train(line);
	}

	fs::write(&cache, postcard::to_stdvec(&chain)?)?;

	Ok(chain)
}

/// Prints how many states have how many transitions, most common first.
fn print_stats(chain: &MarkovChain<HashArrayDictionary<i16>>) {
	println!(
		"Order {} Markov chain with {} states, of these there are",
		chain.order(),
		chain.state_count()
	);

	let mut per_transition_count: HashMap<usize, usize> = HashMap::new();
	for (_, table) in chain.states() {
		*per_transition_count.entry(table.size()).or_insert(0) += 1;
	}

	let mut counts: Vec<(usize, usize)> = per_transition_count.into_iter().collect();
	counts.sort_by(|a, b| b.1.cmp(&a.1));
	for (transitions, states) in counts {
		println!("  {} states with {} transitions", states, transitions);
	}
}
