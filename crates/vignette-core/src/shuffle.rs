//! The ugly shuffler: cheap full-cycle shuffles.
//!
//! [`UglyShuffler`] produces every index in `0..item_count` exactly once
//! before repeating, using constant storage and amortised constant time per
//! item. The order is pseudo-random and of poor quality, which is fine for
//! handing out names or shuffling a playlist without storing what has been
//! used. Each shuffle id picks a different generator.
//!
//! Internally this is a full-period linear congruential generator modulo
//! the next power of two at or above the item count. Values outside the
//! item range are skipped (cycle walking); fewer than half the values can be
//! out of range, so each step walks at most once on average.

use crate::errors::FunctionError;

/// Full-cycle pseudo-random shuffle of `0..item_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ShufflerState"))]
pub struct UglyShuffler {
    item_count: u64,
    multiplier: u64,
    increment: u64,
    /// The item the next call to `next_item` returns. Always below `item_count`.
    state: u64,
}

impl UglyShuffler {
    /// Create a shuffler for `item_count` items using shuffle `shuffle_id`.
    pub fn new(item_count: usize, shuffle_id: usize) -> Result<Self, FunctionError> {
        if item_count == 0 {
            return Err(FunctionError::EmptyShuffle);
        }
        let item_count = item_count as u64;
        let id = shuffle_id as u64;
        let mask = item_count.next_power_of_two() - 1;
        // Hull-Dobell: odd increment, multiplier one more than a multiple of four.
        // Both are kept unmasked; only their low bits matter modulo `mask + 1`.
        let multiplier = (id >> 1).wrapping_mul(4).wrapping_add(1);
        let increment = id.wrapping_mul(2).wrapping_add(1);
        let mut shuffler = Self { item_count, multiplier, increment, state: id & mask };
        if shuffler.state >= item_count {
            shuffler.state = shuffler.step(shuffler.state);
        }
        Ok(shuffler)
    }

    pub fn item_count(&self) -> usize {
        self.item_count as usize
    }

    /// Return the next item in the shuffle and advance.
    pub fn next_item(&mut self) -> usize {
        let item = self.state;
        self.state = self.step(item);
        item as usize
    }

    /// The item the next call to [`next_item`](Self::next_item) will return.
    pub fn peek_item(&self) -> usize {
        self.state as usize
    }

    fn mask(&self) -> u64 {
        self.item_count.next_power_of_two() - 1
    }

    /// Next in-range value after `from` in the generator's cycle.
    fn step(&self, from: u64) -> u64 {
        let mask = self.mask();
        let mut value = from;
        loop {
            value = self.multiplier.wrapping_mul(value).wrapping_add(self.increment) & mask;
            if value < self.item_count {
                return value;
            }
        }
    }
}

impl Iterator for UglyShuffler {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        Some(self.next_item())
    }
}

/// Every shuffle of `item_count` items, one row per shuffle id.
///
/// Useful for eyeballing how ugly the shuffles are.
pub fn all_shuffles(item_count: usize) -> Result<Vec<Vec<usize>>, FunctionError> {
    (0..item_count)
        .map(|id| UglyShuffler::new(item_count, id).map(|s| s.take(item_count).collect()))
        .collect()
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ShufflerState {
    item_count: u64,
    multiplier: u64,
    increment: u64,
    state: u64,
}

#[cfg(feature = "serde")]
impl TryFrom<ShufflerState> for UglyShuffler {
    type Error = FunctionError;

    fn try_from(raw: ShufflerState) -> Result<Self, Self::Error> {
        if raw.item_count == 0 {
            return Err(FunctionError::EmptyShuffle);
        }
        // Out-of-range or non-full-period state would never cycle correctly.
        let full_period = raw.increment % 2 == 1 && raw.multiplier % 4 == 1;
        if raw.state >= raw.item_count || !full_period {
            return Err(FunctionError::InvalidShuffleState);
        }
        Ok(Self {
            item_count: raw.item_count,
            multiplier: raw.multiplier,
            increment: raw.increment,
            state: raw.state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(items: &[usize], n: usize) -> bool {
        let mut seen = vec![false; n];
        for &item in items {
            if item >= n || seen[item] {
                return false;
            }
            seen[item] = true;
        }
        items.len() == n
    }

    #[test]
    fn test_full_cycle_for_many_sizes() {
        for n in 1..40 {
            for id in 0..n {
                let mut shuffler = UglyShuffler::new(n, id).unwrap();
                let first: Vec<usize> = (0..n).map(|_| shuffler.next_item()).collect();
                assert!(is_permutation(&first, n), "n={n} id={id} gave {first:?}");
                let second: Vec<usize> = (0..n).map(|_| shuffler.next_item()).collect();
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut shuffler = UglyShuffler::new(10, 3).unwrap();
        let peeked = shuffler.peek_item();
        assert_eq!(shuffler.peek_item(), peeked);
        assert_eq!(shuffler.next_item(), peeked);
    }

    #[test]
    fn test_shuffles_differ() {
        let table = all_shuffles(16).unwrap();
        assert_eq!(table.len(), 16);
        assert_ne!(table[0], table[1]);
        assert_ne!(table[1], table[7]);
    }

    #[test]
    fn test_zero_items_rejected() {
        assert_eq!(UglyShuffler::new(0, 0), Err(FunctionError::EmptyShuffle));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_resume_after_serialization() {
        let mut shuffler = UglyShuffler::new(25, 4).unwrap();
        shuffler.next_item();
        shuffler.next_item();
        let json = serde_json::to_string(&shuffler).unwrap();
        let mut restored: UglyShuffler = serde_json::from_str(&json).unwrap();
        for _ in 0..30 {
            assert_eq!(restored.next_item(), shuffler.next_item());
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_out_of_range_state_rejected() {
        let json = r#"{"item_count":5,"multiplier":1,"increment":1,"state":9}"#;
        assert!(serde_json::from_str::<UglyShuffler>(json).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_short_period_generator_rejected_for_small_counts() {
        // multiplier 2 maps 0 -> 1 -> 1 modulo 2, so item 0 would never recur
        for count in [1, 2, 3] {
            let json = format!(r#"{{"item_count":{count},"multiplier":2,"increment":1,"state":0}}"#);
            assert!(serde_json::from_str::<UglyShuffler>(&json).is_err(), "count {count}");
        }
        let even_increment = r#"{"item_count":2,"multiplier":1,"increment":2,"state":0}"#;
        assert!(serde_json::from_str::<UglyShuffler>(even_increment).is_err());

        // freshly built shufflers of any size survive a round trip
        for count in 1..6 {
            let shuffler = UglyShuffler::new(count, 3).unwrap();
            let json = serde_json::to_string(&shuffler).unwrap();
            assert_eq!(serde_json::from_str::<UglyShuffler>(&json).unwrap(), shuffler);
        }
    }
}
