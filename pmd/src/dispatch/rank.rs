//! Per-call rank records.

/// Distances at which one method matched each argument position.
///
/// A position is filled at most once. Chains are walked from the argument
/// outwards, so the first fill of a position is always the closest match;
/// later hits for the same position are ignored rather than counted again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankRecord {
    ranks: Vec<Option<u32>>,
    filled: usize,
}

impl RankRecord {
    pub fn new(arity: usize) -> Self {
        Self {
            ranks: vec![None; arity],
            filled: 0,
        }
    }

    /// Record a match at `position`. Returns `false` if the position was
    /// already filled or lies outside the record.
    pub fn fill(&mut self, position: usize, distance: u32) -> bool {
        match self.ranks.get_mut(position) {
            Some(slot) if slot.is_none() => {
                *slot = Some(distance);
                self.filled += 1;
                true
            }
            _ => false,
        }
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn is_complete(&self) -> bool {
        self.filled == self.ranks.len()
    }

    pub fn rank_at(&self, position: usize) -> Option<u32> {
        self.ranks.get(position).copied().flatten()
    }

    /// The full rank vector, if every position has been filled.
    pub fn into_vector(self) -> Option<Vec<u32>> {
        self.ranks.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fills_each_position_once() {
        let mut record = RankRecord::new(2);
        assert!(record.fill(0, 1));
        assert!(!record.fill(0, 3));
        assert_eq!(record.filled(), 1);
        assert!(!record.is_complete());
        assert_eq!(record.rank_at(0), Some(1));

        assert!(record.fill(1, 2));
        assert!(record.is_complete());
        assert_eq!(record.into_vector(), Some(vec![1, 2]));
    }

    #[test]
    fn repeated_hits_do_not_complete_a_record() {
        let mut record = RankRecord::new(2);
        record.fill(0, 0);
        record.fill(0, 1);
        record.fill(0, 2);
        assert_eq!(record.filled(), 1);
        assert_eq!(record.into_vector(), None);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut record = RankRecord::new(1);
        assert!(!record.fill(4, 0));
        assert_eq!(record.filled(), 0);
    }

    #[test]
    fn empty_record_is_complete() {
        let record = RankRecord::new(0);
        assert!(record.is_complete());
        assert_eq!(record.into_vector(), Some(vec![]));
    }
}
