use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Weighted multiset of the continuations observed after one state.
///
/// Most states in natural text only ever see a single continuation, and
/// a full map would be wasted on them. The table therefore starts out
/// holding the one observed value directly and only promotes itself to
/// a weighted list once a second observation arrives.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionTable<C> {
	value: Repr<C>,
}

/// Either the only continuation seen so far, or the (code, count) pair
/// of every distinct continuation in first-observed order.
#[derive(Clone, Debug, Serialize, Deserialize)]
enum Repr<C> {
	Single(C),
	Weighted(Vec<(C, Count)>),
}

/// Observation tally kept in the narrowest width that fits, widening as
/// the count grows.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
enum Count {
	U8(u8),
	U16(u16),
	U32(u32),
}

impl Count {
	fn new(value: u32) -> Self {
		if let Ok(small) = u8::try_from(value) {
			Count::U8(small)
		} else if let Ok(medium) = u16::try_from(value) {
			Count::U16(medium)
		} else {
			Count::U32(value)
		}
	}

	fn get(self) -> u32 {
		match self {
			Count::U8(value) => value as u32,
			Count::U16(value) => value as u32,
			Count::U32(value) => value,
		}
	}

	fn bump(&mut self) {
		*self = Count::new(self.get() + 1);
	}
}

impl<C: Clone + PartialEq> TransitionTable<C> {
	/// Creates a table with a 100% transition probability to `first`.
	pub fn new(first: C) -> Self {
		Self {
			value: Repr::Single(first),
		}
	}

	/// Records one more observed continuation.
	///
	/// The first call promotes the scalar representation to a weighted
	/// list seeded with the original value at count 1; the new
	/// observation is then counted on top of that.
	pub fn add(&mut self, next: C) {
		if let Repr::Single(first) = &self.value {
			let seeded = vec![(first.clone(), Count::new(1))];
			self.value = Repr::Weighted(seeded);
		}
		if let Repr::Weighted(entries) = &mut self.value {
			match entries.iter_mut().find(|(code, _)| *code == next) {
				Some((_, count)) => count.bump(),
				None => entries.push((next, Count::new(1))),
			}
		}
	}

	/// Chooses the next continuation, weighted by observation counts.
	///
	/// A scalar table returns its only value without consulting `rng`.
	/// A weighted table repeats every continuation as many times as it
	/// was observed into a working list and draws one element
	/// uniformly, so the pick stays proportional to the raw counts
	/// without ever normalizing them. The draw is O(total
	/// observations); per-state observation counts in natural text
	/// stay small.
	pub fn choose(&self, rng: &mut dyn RngCore) -> &C {
		match &self.value {
			Repr::Single(only) => only,
			Repr::Weighted(entries) => {
				let mut options = Vec::with_capacity(entries.len() * 4);
				for (code, count) in entries {
					for _ in 0..count.get() {
						options.push(code);
					}
				}
				options[rng.random_range(0..options.len())]
			}
		}
	}

	/// Number of distinct continuations recorded.
	pub fn size(&self) -> usize {
		match &self.value {
			Repr::Single(_) => 1,
			Repr::Weighted(entries) => entries.len(),
		}
	}

	/// Every recorded continuation with its observation count, in
	/// first-observed order.
	pub fn transitions(&self) -> Vec<(&C, u32)> {
		match &self.value {
			Repr::Single(only) => vec![(only, 1)],
			Repr::Weighted(entries) => entries.iter().map(|(code, count)| (code, count.get())).collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn scalar_ignores_the_random_source() {
		let table = TransitionTable::new(7_i16);
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(table.size(), 1);
		for _ in 0..10 {
			assert_eq!(*table.choose(&mut rng), 7);
		}
	}

	#[test]
	fn second_observation_promotes_to_weighted() {
		let mut table = TransitionTable::new(1_i16);
		table.add(2);
		assert_eq!(table.size(), 2);
		assert_eq!(table.transitions(), vec![(&1, 1), (&2, 1)]);
	}

	#[test]
	fn re_observing_the_seed_keeps_one_entry() {
		let mut table = TransitionTable::new(1_i16);
		table.add(1);
		assert_eq!(table.size(), 1);
		assert_eq!(table.transitions(), vec![(&1, 2)]);
	}

	#[test]
	fn counts_widen_past_a_byte() {
		let mut table = TransitionTable::new(5_i16);
		for _ in 0..300 {
			table.add(5);
		}
		assert_eq!(table.transitions(), vec![(&5, 301)]);
	}

	#[test]
	fn both_values_reachable_once_weighted() {
		let mut table = TransitionTable::new(1_i16);
		table.add(2);
		let mut rng = StdRng::seed_from_u64(7);
		let mut seen_one = false;
		let mut seen_two = false;
		for _ in 0..100 {
			match *table.choose(&mut rng) {
				1 => seen_one = true,
				2 => seen_two = true,
				_ => unreachable!(),
			}
		}
		assert!(seen_one && seen_two);
	}

	#[test]
	fn draws_converge_to_the_count_ratio() {
		let mut table = TransitionTable::new(1_i16);
		table.add(1);
		table.add(2);
		// counts are now 2:1 in favor of token 1
		let mut rng = StdRng::seed_from_u64(42);
		let trials = 100_000;
		let mut ones = 0;
		for _ in 0..trials {
			if *table.choose(&mut rng) == 1 {
				ones += 1;
			}
		}
		let observed = f64::from(ones) / f64::from(trials);
		assert!((observed - 2.0 / 3.0).abs() < 0.03, "observed ratio {observed}");
	}
}
