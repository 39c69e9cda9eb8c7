use crate::error::{MazeError, Result};

/// Disjoint-set forest over the elements `0..len`, usually cell ids.
///
/// Union by rank with path compression, backed by flat parent/rank arrays.
#[derive(Debug, Clone)]
pub struct Partition {
    parent: Vec<usize>,
    rank: Vec<u8>,
    /// Element count of each component, valid at roots only.
    sizes: Vec<usize>,
    components: usize,
}

impl Partition {
    /// Creates `len` singleton components.
    pub fn new(len: usize) -> Self {
        Partition {
            parent: (0..len).collect(),
            rank: vec![0; len],
            sizes: vec![1; len],
            components: len,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of components.
    pub fn size(&self) -> usize {
        self.components
    }

    /// Representative of the component containing `x`.
    ///
    /// # Panics
    /// If `x >= self.len()`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Second pass points everything on the way directly at the root
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    pub fn same(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Merges the components of `x` and `y`. Returns `false` if they were
    /// already the same component.
    ///
    /// # Panics
    /// If `x` or `y` is out of range.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false;
        }

        let (root, child) = match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => (root_x, root_y),
            std::cmp::Ordering::Less => (root_y, root_x),
            std::cmp::Ordering::Equal => {
                self.rank[root_x] += 1;
                (root_x, root_y)
            }
        };
        self.parent[child] = root;
        self.sizes[root] += self.sizes[child];
        self.components -= 1;
        true
    }

    /// Like [`Partition::union`] but treats an already joined pair as an error,
    /// for callers that must never close a cycle.
    pub fn join(&mut self, x: usize, y: usize) -> Result<()> {
        self.check(x)?;
        self.check(y)?;
        if self.union(x, y) {
            Ok(())
        } else {
            Err(MazeError::CycleDetected { a: x, b: y })
        }
    }

    /// Element count of the component containing `x`.
    pub fn component_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.sizes[root]
    }

    /// Elements of the component containing `x`, in increasing order.
    pub fn members(&mut self, x: usize) -> Vec<usize> {
        let root = self.find(x);
        (0..self.len()).filter(|&y| self.find(y) == root).collect()
    }

    fn check(&self, x: usize) -> Result<usize> {
        if x < self.len() {
            Ok(x)
        } else {
            Err(MazeError::CellOutOfRange {
                cell: x,
                cells: self.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_partition() {
        let p = Partition::new(0);
        assert_eq!(p.size(), 0);
        assert!(p.is_empty());
    }

    #[test]
    fn test_singletons() {
        let mut p = Partition::new(3);
        assert_eq!(p.size(), 3);
        assert!(!p.same(0, 1));
        assert_eq!(p.component_size(2), 1);
    }

    #[test]
    fn test_union() {
        let mut p = Partition::new(4);
        assert!(p.union(1, 2));
        assert_eq!(p.size(), 3);
        assert_eq!(p.component_size(1), 2);
        assert_eq!(p.members(2), vec![1, 2]);
        // Already joined
        assert!(!p.union(2, 1));
        assert_eq!(p.size(), 3);
    }

    #[test]
    fn test_join_rejects_cycle() {
        let mut p = Partition::new(3);
        p.join(0, 1).unwrap();
        p.join(1, 2).unwrap();
        assert_eq!(p.join(0, 2), Err(MazeError::CycleDetected { a: 0, b: 2 }));
        assert!(matches!(p.join(0, 3), Err(MazeError::CellOutOfRange { .. })));
        assert_eq!(p.size(), 1);
    }

    #[test]
    fn test_transitive_connectivity() {
        // Chain unions in a scattered order and compare with a naive labelling
        let n = 50;
        let mut p = Partition::new(n);
        let mut labels = (0..n).collect::<Vec<_>>();
        let pairs = (0..n).map(|i| (i, (i * 7 + 3) % n)).filter(|&(a, b)| a % 3 != 0 || b % 5 == 0);
        for (a, b) in pairs {
            p.union(a, b);
            let (from, to) = (labels[a], labels[b]);
            labels.iter_mut().filter(|l| **l == from).for_each(|l| *l = to);
        }
        for a in 0..n {
            for b in 0..n {
                assert_eq!(p.same(a, b), labels[a] == labels[b]);
            }
        }
        let mut distinct = labels.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(p.size(), distinct.len());
    }
}
