use word_bitset::prelude::*;

use crate::errors::{InvariantCheck, PoolInvariant};

/// Outcome of offering a deletable-edge set to the pool.
#[derive(Debug, PartialEq, Eq)]
pub enum PoolVerdict {
    /// A stored set already dominates the offered one.
    Dominated,
    /// The offered set was stored; `superseded` marks that it strictly
    /// dominated at least one older entry.
    Inserted { superseded: bool },
    /// The offered set and a stored one cover the whole edge set.
    Complementary,
}

/// Pool of pairwise incomparable deletable-edge sets. Entries dominated by a
/// newcomer are blanked to the empty set and their slots reused; the backing
/// buffer keeps its capacity across graphs.
#[derive(Default)]
pub struct DeletablePool<W: BitWord> {
    universe: WordSet<W>,
    sets: Vec<WordSet<W>>,
}

impl<W: BitWord> DeletablePool<W> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            universe: WordSet::new(),
            sets: Vec::with_capacity(capacity),
        }
    }

    /// Discards all entries (keeping the allocation) and fixes the edge
    /// universe for the next graph.
    pub fn reset(&mut self, universe: WordSet<W>) {
        self.universe = universe;
        self.sets.clear();
    }

    pub fn offer(&mut self, deletable: WordSet<W>) -> PoolVerdict {
        let mut insert_at = self.sets.len();
        let mut superseded = false;

        for i in 0..self.sets.len() {
            let stored = self.sets[i];
            if stored.is_empty() {
                if insert_at == self.sets.len() {
                    insert_at = i;
                }
                continue;
            }
            if deletable.is_subset_of(&stored) {
                return PoolVerdict::Dominated;
            }
            if (stored | deletable) == self.universe {
                self.sets.push(deletable);
                return PoolVerdict::Complementary;
            }
            if stored.is_subset_of(&deletable) {
                superseded = true;
                self.sets[i] = WordSet::new();
            }
        }

        if insert_at < self.sets.len() {
            self.sets[insert_at] = deletable;
        } else {
            self.sets.push(deletable);
        }
        PoolVerdict::Inserted { superseded }
    }

    /// Number of slots in use, tombstones included.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.sets.capacity()
    }

    pub fn tombstones(&self) -> usize {
        self.sets.iter().filter(|s| s.is_empty()).count()
    }

    pub fn union_of_live(&self) -> WordSet<W> {
        self.sets
            .iter()
            .fold(WordSet::new(), |acc, &set| acc | set)
    }
}

impl<W: BitWord> InvariantCheck<PoolInvariant> for DeletablePool<W> {
    fn is_correct(&self) -> Result<(), PoolInvariant> {
        for i in 0..self.sets.len() {
            if self.sets[i].is_empty() {
                continue;
            }
            for j in i + 1..self.sets.len() {
                if self.sets[j].is_empty() {
                    continue;
                }
                if self.sets[i].is_subset_of(&self.sets[j])
                    || self.sets[j].is_subset_of(&self.sets[i])
                {
                    return Err(PoolInvariant::ComparableEntries(i, j));
                }
                if (self.sets[i] | self.sets[j]) == self.universe {
                    return Err(PoolInvariant::CoveringUnion);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn set(bits: &[u32]) -> WordSet<u64> {
        WordSet::new_with_bits_set(bits.iter().copied())
    }

    fn pool() -> DeletablePool<u64> {
        let mut pool = DeletablePool::with_capacity(4);
        pool.reset(WordSet::new_all_set(6));
        pool
    }

    #[test]
    fn dominated_offers_are_rejected() {
        let mut pool = pool();
        assert_eq!(
            pool.offer(set(&[0, 1, 2])),
            PoolVerdict::Inserted { superseded: false }
        );
        assert_eq!(pool.offer(set(&[0, 1])), PoolVerdict::Dominated);
        assert_eq!(pool.offer(set(&[0, 1, 2])), PoolVerdict::Dominated);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn superseded_entries_are_tombstoned_and_reused() {
        let mut pool = pool();
        pool.offer(set(&[0, 1]));
        assert_eq!(
            pool.offer(set(&[0, 1, 2])),
            PoolVerdict::Inserted { superseded: true }
        );
        assert_eq!(pool.tombstones(), 1);
        assert!(pool.is_correct().is_ok());

        // the tombstone slot is reused before the vector grows
        assert_eq!(
            pool.offer(set(&[3, 4])),
            PoolVerdict::Inserted { superseded: false }
        );
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.tombstones(), 0);
    }

    #[test]
    fn complementary_union_is_detected() {
        let mut pool = pool();
        pool.offer(set(&[0, 1, 2, 3]));
        assert_eq!(pool.offer(set(&[3, 4, 5])), PoolVerdict::Complementary);
        assert_eq!(pool.union_of_live(), WordSet::new_all_set(6));
    }

    #[test]
    fn incomparable_entries_accumulate() {
        let mut pool = pool();
        pool.offer(set(&[0, 1]));
        pool.offer(set(&[1, 2]));
        pool.offer(set(&[2, 3]));
        assert_eq!(pool.len(), 3);
        assert!(pool.is_correct().is_ok());
    }

    #[test]
    fn reset_keeps_capacity() {
        let mut pool = pool();
        for i in 0..4 {
            pool.offer(set(&[i, i + 1]));
        }
        let capacity = pool.capacity();
        pool.reset(WordSet::new_all_set(9));
        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), capacity);
    }
}
