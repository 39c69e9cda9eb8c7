use crate::{
    error::Result,
    generators::EdgePriorities,
    grid::{CellState, Maze},
    partition::Partition,
};

/// Kruskal's algorithm: take edges by increasing priority and keep every edge
/// whose endpoints are still in different components.
pub fn kruskal(maze: &mut Maze, priorities: &EdgePriorities) -> Result<()> {
    priorities.check_size(maze.size())?;
    let cells = maze.vertex_count();
    if cells == 0 {
        return Ok(());
    }

    // Initialize Union-Find for all cells
    let mut partition = Partition::new(cells);
    let mut examined = 0;

    for edge in priorities.ascending() {
        if maze.edge_count() + 1 == cells {
            break;
        }
        examined += 1;

        // If cells are not yet connected, carve the passage between them
        if partition.union(edge.a, edge.b) {
            maze.add_edge(edge.a, edge.b)?;
            maze.set(edge.a, CellState::Completed)?;
            maze.set(edge.b, CellState::Completed)?;
        }
    }

    tracing::debug!(
        "[kruskal] examined {} of {} candidate edges",
        examined,
        priorities.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Edge, GridGraph, GridSize};

    #[test]
    fn test_kruskal_hand_computed() {
        let mut maze = GridGraph::new(3, 3, CellState::Unvisited);
        // Canonical edge order:
        //  0:(0,1)  1:(0,3)  2:(1,2)  3:(1,4)  4:(2,5)  5:(3,4)
        //  6:(3,6)  7:(4,5)  8:(4,7)  9:(5,8) 10:(6,7) 11:(7,8)
        let priorities = EdgePriorities::from_priorities(
            GridSize::new(3, 3),
            &[11, 0, 7, 3, 10, 1, 8, 5, 2, 6, 9, 4],
        )
        .unwrap();
        kruskal(&mut maze, &priorities).unwrap();

        let mut edges = maze.edges().collect::<Vec<_>>();
        edges.sort();
        let expected = [(0, 3), (1, 2), (1, 4), (3, 4), (3, 6), (4, 5), (4, 7), (7, 8)]
            .map(Edge::from)
            .to_vec();
        assert_eq!(edges, expected);
        assert!(maze.is_spanning_tree());
    }

    #[test]
    fn test_kruskal_single_cell() {
        let mut maze = GridGraph::new(1, 1, CellState::Unvisited);
        let priorities = EdgePriorities::from_priorities(GridSize::new(1, 1), &[]).unwrap();
        kruskal(&mut maze, &priorities).unwrap();
        assert_eq!(maze.edge_count(), 0);
    }
}
