use std::{fmt, str::FromStr, time::Instant};

use rand::{SeedableRng, rngs::StdRng};

mod aldous_broder;
mod boruvka;
mod dfs;
mod growing_tree;
mod hunt_and_kill;
mod kruskal;
mod prim;
mod priorities;
mod recur_div;
mod reverse_delete;
mod rows;
mod wilson;

pub use aldous_broder::aldous_broder;
pub use boruvka::boruvka;
pub use dfs::{iterative_dfs, recursive_dfs};
pub use growing_tree::{GrowthPolicy, growing_tree};
pub use hunt_and_kill::{HuntMode, hunt_and_kill};
pub use kruskal::kruskal;
pub use prim::prim;
pub use priorities::EdgePriorities;
pub use recur_div::recursive_division;
pub use reverse_delete::reverse_delete;
pub use rows::{binary_tree, eller, sidewinder};
pub use wilson::{WalkOrder, wilson};

use crate::{
    error::{MazeError, Result},
    grid::{Cell, CellState, Maze},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// The maze generation algorithms, with their knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    Kruskal,
    Prim,
    Boruvka,
    ReverseDelete,
    Wilson(WalkOrder),
    AldousBroder,
    RecursiveDfs,
    IterativeDfs,
    RandomBfs,
    GrowingTree(GrowthPolicy),
    HuntAndKill(HuntMode),
    RecursiveDivision,
    BinaryTree,
    Sidewinder,
    Eller,
}

impl Generator {
    /// Every generator with every parametrization.
    pub const ALL: [Generator; 31] = [
        Generator::Kruskal,
        Generator::Prim,
        Generator::Boruvka,
        Generator::ReverseDelete,
        Generator::Wilson(WalkOrder::Random),
        Generator::Wilson(WalkOrder::RowSweep),
        Generator::Wilson(WalkOrder::ColumnSweep),
        Generator::Wilson(WalkOrder::ExpandingCircle),
        Generator::Wilson(WalkOrder::CollapsingCircle),
        Generator::Wilson(WalkOrder::ExpandingCircles),
        Generator::Wilson(WalkOrder::ExpandingRectangle),
        Generator::Wilson(WalkOrder::NestedRectangles),
        Generator::Wilson(WalkOrder::Spiral),
        Generator::Wilson(WalkOrder::RecursiveCrosses),
        Generator::Wilson(WalkOrder::Hilbert),
        Generator::Wilson(WalkOrder::Moore),
        Generator::Wilson(WalkOrder::Peano),
        Generator::AldousBroder,
        Generator::RecursiveDfs,
        Generator::IterativeDfs,
        Generator::RandomBfs,
        Generator::GrowingTree(GrowthPolicy::Last),
        Generator::GrowingTree(GrowthPolicy::Random),
        Generator::GrowingTree(GrowthPolicy::LastOrRandom),
        Generator::GrowingTree(GrowthPolicy::First),
        Generator::HuntAndKill(HuntMode::Scan),
        Generator::HuntAndKill(HuntMode::Random),
        Generator::RecursiveDivision,
        Generator::BinaryTree,
        Generator::Sidewinder,
        Generator::Eller,
    ];

    /// Stable identifier, e.g. `wilson-spiral` or `growing-tree-last`.
    pub fn name(&self) -> String {
        match self {
            Generator::Kruskal => "kruskal".to_string(),
            Generator::Prim => "prim".to_string(),
            Generator::Boruvka => "boruvka".to_string(),
            Generator::ReverseDelete => "reverse-delete".to_string(),
            Generator::Wilson(order) => format!("wilson-{}", order),
            Generator::AldousBroder => "aldous-broder".to_string(),
            Generator::RecursiveDfs => "recursive-dfs".to_string(),
            Generator::IterativeDfs => "iterative-dfs".to_string(),
            Generator::RandomBfs => "random-bfs".to_string(),
            Generator::GrowingTree(policy) => format!("growing-tree-{}", policy),
            Generator::HuntAndKill(mode) => format!("hunt-and-kill-{}", mode),
            Generator::RecursiveDivision => "recursive-division".to_string(),
            Generator::BinaryTree => "binary-tree".to_string(),
            Generator::Sidewinder => "sidewinder".to_string(),
            Generator::Eller => "eller".to_string(),
        }
    }

    /// Whether the algorithm samples spanning trees uniformly.
    pub fn is_uniform(&self) -> bool {
        matches!(self, Generator::Wilson(_) | Generator::AldousBroder)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
            Generator::Boruvka => write!(f, "Borůvka's Algorithm"),
            Generator::ReverseDelete => write!(f, "Reverse-Delete Algorithm"),
            Generator::Wilson(order) => write!(f, "Wilson's Algorithm ({})", order),
            Generator::AldousBroder => write!(f, "Aldous-Broder Algorithm"),
            Generator::RecursiveDfs => write!(f, "Recursive Depth-First Search (DFS)"),
            Generator::IterativeDfs => write!(f, "Randomized Depth-First Search (DFS)"),
            Generator::RandomBfs => write!(f, "Randomized Breadth-First Search (BFS)"),
            Generator::GrowingTree(policy) => write!(f, "Growing Tree ({})", policy),
            Generator::HuntAndKill(mode) => write!(f, "Hunt-and-Kill ({})", mode),
            Generator::RecursiveDivision => write!(f, "Recursive Division"),
            Generator::BinaryTree => write!(f, "Binary Tree"),
            Generator::Sidewinder => write!(f, "Sidewinder"),
            Generator::Eller => write!(f, "Eller's Algorithm"),
        }
    }
}

impl FromStr for Generator {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        Generator::ALL
            .into_iter()
            .find(|generator| generator.name() == s)
            .ok_or_else(|| MazeError::UnknownGenerator(s.to_string()))
    }
}

/// Turns an edge-less grid into a perfect maze, starting at `start` for the
/// algorithms that grow from a cell.
///
/// The grid must not have passages yet: a second call fails with
/// [`MazeError::AlreadyGenerated`] until [`Maze::clear_edges`] is called.
/// Cell contents are reset to [`CellState::Unvisited`] first and are all
/// [`CellState::Completed`] afterwards. A zero-cell grid is left untouched.
pub fn generate_maze(
    maze: &mut Maze,
    generator: Generator,
    start: Cell,
    seed: Option<u64>,
) -> Result<()> {
    if maze.is_empty() {
        return Ok(());
    }
    let start = maze.size().check(start)?;
    if maze.edge_count() > 0 {
        return Err(MazeError::AlreadyGenerated {
            edges: maze.edge_count(),
        });
    }

    maze.fill_content(CellState::Unvisited);
    if maze.vertex_count() == 1 {
        return maze.set(start, CellState::Completed);
    }

    let mut rng = get_rng(seed);
    let size = maze.size();
    tracing::info!(
        "[generate] {} on a {}x{} grid from cell {}",
        generator,
        size.cols,
        size.rows,
        start
    );
    let started = Instant::now();

    match generator {
        Generator::Kruskal => kruskal(maze, &EdgePriorities::random(size, &mut rng))?,
        Generator::Prim => prim(maze, start, &EdgePriorities::random(size, &mut rng))?,
        Generator::Boruvka => boruvka(maze, &EdgePriorities::random(size, &mut rng))?,
        Generator::ReverseDelete => {
            reverse_delete(maze, &EdgePriorities::random(size, &mut rng))?
        }
        Generator::Wilson(order) => {
            let order = order.cell_order(size, &mut rng);
            wilson(maze, start, order.as_ref(), &mut rng)?
        }
        Generator::AldousBroder => aldous_broder(maze, start, &mut rng)?,
        Generator::RecursiveDfs => recursive_dfs(maze, start, &mut rng)?,
        Generator::IterativeDfs => iterative_dfs(maze, start, &mut rng)?,
        Generator::RandomBfs => growing_tree(maze, start, GrowthPolicy::First, &mut rng)?,
        Generator::GrowingTree(policy) => growing_tree(maze, start, policy, &mut rng)?,
        Generator::HuntAndKill(mode) => hunt_and_kill(maze, start, mode, &mut rng)?,
        Generator::RecursiveDivision => recursive_division(maze, &mut rng)?,
        Generator::BinaryTree => binary_tree(maze, &mut rng)?,
        Generator::Sidewinder => sidewinder(maze, &mut rng)?,
        Generator::Eller => eller(maze, &mut rng)?,
    }

    tracing::info!(
        "[generate] {} finished with {} passages in {:?}",
        generator.name(),
        maze.edge_count(),
        started.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridEvent, GridGraph, GridSize};
    use std::{cell::Cell as Counter, rc::Rc};

    const SHAPES: [(usize, usize); 7] = [(1, 1), (1, 6), (6, 1), (2, 2), (3, 5), (8, 7), (10, 10)];

    fn generated(cols: usize, rows: usize, generator: Generator, seed: u64) -> Maze {
        let mut maze = GridGraph::new(cols, rows, CellState::Unvisited);
        let start = maze.vertex_count() / 2;
        generate_maze(&mut maze, generator, start, Some(seed)).unwrap();
        maze
    }

    #[test]
    fn test_every_generator_builds_a_perfect_maze() {
        for generator in Generator::ALL {
            for (cols, rows) in SHAPES {
                for seed in 0..3 {
                    let maze = generated(cols, rows, generator, seed);
                    assert_eq!(maze.edge_count(), cols * rows - 1);
                    assert!(
                        maze.is_spanning_tree(),
                        "{} on {}x{} seed {}",
                        generator,
                        cols,
                        rows,
                        seed
                    );
                    assert!(
                        (0..maze.vertex_count()).all(|c| maze[c] == CellState::Completed),
                        "{} left cells unfinished",
                        generator
                    );
                }
            }
        }
    }

    #[test]
    fn test_generators_are_deterministic() {
        for generator in Generator::ALL {
            let first = generated(9, 6, generator, 42);
            let second = generated(9, 6, generator, 42);
            assert_eq!(
                first.edges().collect::<Vec<_>>(),
                second.edges().collect::<Vec<_>>(),
                "{}",
                generator
            );
        }
    }

    #[test]
    fn test_zero_cell_grid() {
        for generator in Generator::ALL {
            let mut maze = GridGraph::new(0, 0, CellState::Unvisited);
            generate_maze(&mut maze, generator, 0, Some(1)).unwrap();
            assert_eq!(maze.edge_count(), 0);
            let mut maze = GridGraph::new(5, 0, CellState::Unvisited);
            generate_maze(&mut maze, generator, 3, Some(1)).unwrap();
            assert_eq!(maze.vertex_count(), 0);
        }
    }

    #[test]
    fn test_single_cell_grid() {
        for generator in Generator::ALL {
            let maze = generated(1, 1, generator, 0);
            assert_eq!(maze.edge_count(), 0);
            assert_eq!(maze[0], CellState::Completed);
        }
    }

    #[test]
    fn test_start_out_of_range() {
        let mut maze = GridGraph::new(3, 3, CellState::Unvisited);
        assert_eq!(
            generate_maze(&mut maze, Generator::Prim, 9, Some(0)),
            Err(MazeError::CellOutOfRange { cell: 9, cells: 9 })
        );
        assert_eq!(maze.edge_count(), 0);
    }

    #[test]
    fn test_second_run_needs_reset() {
        let mut maze = GridGraph::new(4, 4, CellState::Unvisited);
        generate_maze(&mut maze, Generator::Eller, 0, Some(0)).unwrap();
        assert_eq!(
            generate_maze(&mut maze, Generator::Kruskal, 0, Some(0)),
            Err(MazeError::AlreadyGenerated { edges: 15 })
        );
        maze.clear_edges();
        generate_maze(&mut maze, Generator::Kruskal, 0, Some(0)).unwrap();
        assert!(maze.is_spanning_tree());
    }

    #[test]
    fn test_recursive_division_4x4() {
        let maze = generated(4, 4, Generator::RecursiveDivision, 7);
        assert_eq!(maze.edge_count(), 15);
        assert!(maze.is_spanning_tree());
    }

    #[test]
    fn test_wilson_sweep_and_circle_on_5x5() {
        for order in [WalkOrder::RowSweep, WalkOrder::ExpandingCircle] {
            let maze = generated(5, 5, Generator::Wilson(order), 3);
            assert_eq!(maze.edge_count(), 24);
            assert!(maze.is_spanning_tree());
        }
    }

    #[test]
    fn test_observers_do_not_change_the_maze() {
        for generator in Generator::ALL {
            let plain = generated(7, 5, generator, 5);

            let mut observed = GridGraph::new(7, 5, CellState::Unvisited);
            let added = Rc::new(Counter::new(0));
            {
                let added = added.clone();
                observed.subscribe(move |event: &GridEvent<CellState>| {
                    if matches!(event, GridEvent::EdgeAdded { .. }) {
                        added.set(added.get() + 1);
                    }
                });
            }
            generate_maze(&mut observed, generator, 17, Some(5)).unwrap();

            assert_eq!(
                plain.edges().collect::<Vec<_>>(),
                observed.edges().collect::<Vec<_>>(),
                "{}",
                generator
            );
            assert!(added.get() >= observed.edge_count());
        }
    }

    #[test]
    fn test_mst_builders_agree() {
        let size = GridSize::new(7, 6);
        let priorities = EdgePriorities::random(size, &mut get_rng(Some(13)));
        let build = |run: &dyn Fn(&mut Maze) -> Result<()>| {
            let mut maze = GridGraph::new(size.cols, size.rows, CellState::Unvisited);
            run(&mut maze).unwrap();
            maze.edges().collect::<Vec<_>>()
        };
        let expected = build(&|maze| kruskal(maze, &priorities));
        assert_eq!(build(&|maze| prim(maze, 20, &priorities)), expected);
        assert_eq!(build(&|maze| boruvka(maze, &priorities)), expected);
        assert_eq!(build(&|maze| reverse_delete(maze, &priorities)), expected);
    }

    #[test]
    fn test_mst_builders_reject_foreign_priorities() {
        let priorities = EdgePriorities::random(GridSize::new(4, 4), &mut get_rng(Some(0)));
        let expected = Err(MazeError::InvalidPriorities {
            expected: 12,
            actual: 24,
        });
        let run = |build: &dyn Fn(&mut Maze) -> Result<()>| {
            let mut maze = GridGraph::new(3, 3, CellState::Unvisited);
            let result = build(&mut maze);
            assert_eq!(maze.edge_count(), 0);
            result
        };
        assert_eq!(run(&|maze: &mut Maze| kruskal(maze, &priorities)), expected);
        assert_eq!(run(&|maze: &mut Maze| prim(maze, 0, &priorities)), expected);
        assert_eq!(run(&|maze: &mut Maze| boruvka(maze, &priorities)), expected);
        assert_eq!(run(&|maze: &mut Maze| reverse_delete(maze, &priorities)), expected);

        // Same edge count, transposed shape
        let transposed = EdgePriorities::random(GridSize::new(3, 2), &mut get_rng(Some(0)));
        let mut maze = GridGraph::new(2, 3, CellState::Unvisited);
        assert!(kruskal(&mut maze, &transposed).is_err());
    }

    #[test]
    fn test_uniform_generators_sample_every_tree() {
        // The 2x2 grid has 4 spanning trees, each expected 1000 times
        for generator in Generator::ALL.into_iter().filter(Generator::is_uniform) {
            let mut counts = std::collections::HashMap::new();
            for seed in 0..4000 {
                let maze = generated(2, 2, generator, seed);
                *counts.entry(maze.edges().collect::<Vec<_>>()).or_insert(0usize) += 1;
            }
            assert_eq!(counts.len(), 4, "{}", generator);
            for &count in counts.values() {
                assert!(count.abs_diff(1000) < 150, "{} sampled a tree {} times", generator, count);
            }
        }
        assert!(!Generator::Kruskal.is_uniform());
    }

    #[test]
    fn test_generator_names() {
        for generator in Generator::ALL {
            assert_eq!(generator.name().parse::<Generator>().unwrap(), generator);
        }
        assert_eq!(
            "wilson-spiral".parse::<Generator>().unwrap(),
            Generator::Wilson(WalkOrder::Spiral)
        );
        assert_eq!(
            "labyrinth".parse::<Generator>(),
            Err(MazeError::UnknownGenerator("labyrinth".to_string()))
        );
    }
}
