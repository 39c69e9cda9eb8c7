use rand::{Rng, seq::SliceRandom};

use crate::error::{MazeError, Result};
use crate::grid::{Edge, GridSize};

/// Distinct priorities for every edge of a full grid graph, shared by the
/// minimum-spanning-tree builders. Lower priority means "take earlier".
///
/// With distinct priorities the minimum spanning tree is unique, so Kruskal,
/// Prim, Borůvka and reverse-delete all carve the same maze from the same
/// priorities.
#[derive(Debug, Clone)]
pub struct EdgePriorities {
    size: GridSize,
    /// Priority of each edge, indexed by [`GridSize::edge_slot`].
    by_slot: Vec<u32>,
    /// Edges sorted by increasing priority.
    ascending: Vec<Edge>,
}

impl EdgePriorities {
    /// A uniformly random permutation of `0..edges` as priorities.
    pub fn random(size: GridSize, rng: &mut impl Rng) -> Self {
        let mut priorities = (0..size.max_edges() as u32).collect::<Vec<_>>();
        priorities.shuffle(rng);
        Self::build(size, &priorities)
    }

    /// Uses `priorities[i]` for the `i`-th edge of [`GridSize::all_edges`].
    pub fn from_priorities(size: GridSize, priorities: &[u32]) -> Result<Self> {
        if priorities.len() != size.max_edges() {
            return Err(MazeError::InvalidPriorities {
                expected: size.max_edges(),
                actual: priorities.len(),
            });
        }
        let mut sorted = priorities.to_vec();
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(MazeError::DuplicatePriority { priority: pair[0] });
        }
        Ok(Self::build(size, priorities))
    }

    fn build(size: GridSize, priorities: &[u32]) -> Self {
        let mut by_slot = vec![u32::MAX; size.cells() * 2];
        let mut ascending = size
            .all_edges()
            .zip(priorities.iter().copied())
            .inspect(|&(edge, priority)| by_slot[size.edge_slot(edge)] = priority)
            .collect::<Vec<_>>();
        ascending.sort_unstable_by_key(|&(_, priority)| priority);
        EdgePriorities {
            size,
            by_slot,
            ascending: ascending.into_iter().map(|(edge, _)| edge).collect(),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Fails unless the priorities were built for a grid of `size`.
    pub(crate) fn check_size(&self, size: GridSize) -> Result<()> {
        if self.size != size {
            return Err(MazeError::InvalidPriorities {
                expected: size.max_edges(),
                actual: self.len(),
            });
        }
        Ok(())
    }

    /// Priority of a grid edge.
    ///
    /// # Panics
    /// If `edge` does not join two adjacent cells of the grid.
    pub fn priority(&self, edge: Edge) -> u32 {
        assert!(
            self.size.direction(edge.a, edge.b).is_some(),
            "{:?} is not an edge of the grid",
            edge
        );
        self.by_slot[self.size.edge_slot(edge)]
    }

    /// Edges from lowest to highest priority.
    pub fn ascending(&self) -> &[Edge] {
        &self.ascending
    }

    pub fn len(&self) -> usize {
        self.ascending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ascending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_from_priorities() {
        let size = GridSize::new(2, 2);
        // Edges: 0-1, 0-2, 1-3, 2-3
        let priorities = EdgePriorities::from_priorities(size, &[3, 1, 0, 2]).unwrap();
        assert_eq!(
            priorities.ascending(),
            &[Edge::new(1, 3), Edge::new(0, 2), Edge::new(2, 3), Edge::new(0, 1)]
        );
        assert_eq!(priorities.priority(Edge::new(2, 3)), 2);
    }

    #[test]
    fn test_invalid_priorities() {
        let size = GridSize::new(2, 2);
        assert_eq!(
            EdgePriorities::from_priorities(size, &[0, 1]).unwrap_err(),
            MazeError::InvalidPriorities {
                expected: 4,
                actual: 2
            }
        );
        assert_eq!(
            EdgePriorities::from_priorities(size, &[0, 1, 1, 2]).unwrap_err(),
            MazeError::DuplicatePriority { priority: 1 }
        );
    }

    #[test]
    fn test_random_is_permutation() {
        let size = GridSize::new(5, 4);
        let priorities = EdgePriorities::random(size, &mut StdRng::seed_from_u64(3));
        let mut values = size
            .all_edges()
            .map(|edge| priorities.priority(edge))
            .collect::<Vec<_>>();
        values.sort_unstable();
        assert_eq!(values, (0..size.max_edges() as u32).collect::<Vec<_>>());
    }
}
