use crate::{
    error::Result,
    generators::EdgePriorities,
    grid::{CellState, Edge, Maze},
    partition::Partition,
};

/// Borůvka's algorithm: in every round each component picks its cheapest
/// outgoing edge, then all picked edges are merged at once.
pub fn boruvka(maze: &mut Maze, priorities: &EdgePriorities) -> Result<()> {
    priorities.check_size(maze.size())?;
    let size = maze.size();
    let mut partition = Partition::new(size.cells());
    let mut round = 0;

    while partition.size() > 1 {
        round += 1;
        let mut cheapest: Vec<Option<(u32, Edge)>> = vec![None; size.cells()];

        for edge in size.all_edges() {
            let (ra, rb) = (partition.find(edge.a), partition.find(edge.b));
            if ra == rb {
                continue;
            }
            let priority = priorities.priority(edge);
            for root in [ra, rb] {
                if cheapest[root].is_none_or(|(best, _)| priority < best) {
                    cheapest[root] = Some((priority, edge));
                }
            }
        }

        // Distinct priorities rule out cycles, but two components can pick the same edge
        for (_, edge) in cheapest.into_iter().flatten() {
            if partition.union(edge.a, edge.b) {
                maze.add_edge(edge.a, edge.b)?;
                maze.set(edge.a, CellState::Completed)?;
                maze.set(edge.b, CellState::Completed)?;
            }
        }

        tracing::debug!(
            "[boruvka] round {}: {} components left",
            round,
            partition.size()
        );
    }
    Ok(())
}
