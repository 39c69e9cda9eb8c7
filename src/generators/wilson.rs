use std::{fmt, str::FromStr};

use rand::{
    Rng,
    seq::{IteratorRandom, SliceRandom},
};

use crate::{
    error::{MazeError, Result},
    grid::{Cell, CellState, GridSize, Maze},
    sequence::{
        CellOrder, Concat, Curve, ExpandingCircle, ExpandingRectangle, NestedRectangles,
        Parallel, RecursiveCrosses, Spiral, Sweep,
    },
};

/// Order in which Wilson's algorithm picks the starting cells of its walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkOrder {
    Random,
    RowSweep,
    ColumnSweep,
    ExpandingCircle,
    CollapsingCircle,
    /// Four circles grow in parallel around the quadrant centres, then a
    /// fifth one around the grid centre, twice.
    ExpandingCircles,
    ExpandingRectangle,
    NestedRectangles,
    Spiral,
    RecursiveCrosses,
    Hilbert,
    Moore,
    Peano,
}

impl WalkOrder {
    pub const ALL: [WalkOrder; 13] = [
        WalkOrder::Random,
        WalkOrder::RowSweep,
        WalkOrder::ColumnSweep,
        WalkOrder::ExpandingCircle,
        WalkOrder::CollapsingCircle,
        WalkOrder::ExpandingCircles,
        WalkOrder::ExpandingRectangle,
        WalkOrder::NestedRectangles,
        WalkOrder::Spiral,
        WalkOrder::RecursiveCrosses,
        WalkOrder::Hilbert,
        WalkOrder::Moore,
        WalkOrder::Peano,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WalkOrder::Random => "random",
            WalkOrder::RowSweep => "row-sweep",
            WalkOrder::ColumnSweep => "column-sweep",
            WalkOrder::ExpandingCircle => "expanding-circle",
            WalkOrder::CollapsingCircle => "collapsing-circle",
            WalkOrder::ExpandingCircles => "expanding-circles",
            WalkOrder::ExpandingRectangle => "expanding-rectangle",
            WalkOrder::NestedRectangles => "nested-rectangles",
            WalkOrder::Spiral => "spiral",
            WalkOrder::RecursiveCrosses => "recursive-crosses",
            WalkOrder::Hilbert => "hilbert",
            WalkOrder::Moore => "moore",
            WalkOrder::Peano => "peano",
        }
    }

    /// Builds the cell order for a grid. Only [`WalkOrder::Random`] draws
    /// from `rng`.
    pub fn cell_order(self, size: GridSize, rng: &mut impl Rng) -> Box<dyn CellOrder> {
        let center = size.center();
        match self {
            WalkOrder::Random => {
                let mut cells = (0..size.cells()).collect::<Vec<Cell>>();
                cells.shuffle(rng);
                Box::new(cells)
            }
            WalkOrder::RowSweep => Box::new(Sweep::rows(size)),
            WalkOrder::ColumnSweep => Box::new(Sweep::columns(size)),
            WalkOrder::ExpandingCircle => Box::new(ExpandingCircle::covering(size, center)),
            WalkOrder::CollapsingCircle => {
                Box::new(ExpandingCircle::covering(size, center).collapsing())
            }
            WalkOrder::ExpandingCircles => Box::new(expanding_circles(size)),
            WalkOrder::ExpandingRectangle => Box::new(
                // Grows from the top-left cell until it covers the grid
                ExpandingRectangle::new(size, (0, 0), 1, 1)
                    .with_max_expansion(size.cols.max(size.rows).saturating_sub(1)),
            ),
            WalkOrder::NestedRectangles => Box::new(NestedRectangles::new(size)),
            WalkOrder::Spiral => Box::new(Spiral::centered(size)),
            WalkOrder::RecursiveCrosses => Box::new(RecursiveCrosses::new(size)),
            WalkOrder::Hilbert => Box::new(Curve::hilbert(size)),
            WalkOrder::Moore => Box::new(Curve::moore(size)),
            WalkOrder::Peano => Box::new(Curve::peano(size)),
        }
    }
}

impl fmt::Display for WalkOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WalkOrder {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        WalkOrder::ALL
            .into_iter()
            .find(|order| order.name() == s)
            .ok_or_else(|| MazeError::UnknownGenerator(s.to_string()))
    }
}

fn expanding_circles(size: GridSize) -> Concat {
    let GridSize { cols: w, rows: h } = size;
    let r = (w / 2).max(h / 2);
    let quadrants = [
        (w / 4, h / 4),
        (3 * w / 4, h / 4),
        (w / 4, 3 * h / 4),
        (3 * w / 4, 3 * h / 4),
    ];
    let around_quadrants = |min, max| -> Box<dyn CellOrder> {
        Box::new(Parallel::new(
            quadrants
                .iter()
                .map(|&c| Box::new(ExpandingCircle::new(size, c, min, max)) as Box<dyn CellOrder>)
                .collect(),
        ))
    };
    Concat::new(vec![
        around_quadrants(1, r / 4),
        Box::new(ExpandingCircle::new(size, (w / 2, h / 2), 1, r / 2)),
        around_quadrants(r / 4, r / 2),
        Box::new(ExpandingCircle::new(size, (w / 2, h / 2), r / 2, 2 * r)),
    ])
}

/// Wilson's algorithm: a uniformly random spanning tree built from
/// loop-erased random walks.
///
/// `start` is the root of the tree. Walks start from the cells of `order`
/// that are not yet in the tree, and once `order` is exhausted from any cell
/// a row sweep still finds outside it. The order only changes how the maze
/// grows, not the distribution of the result.
///
/// Cells in the tree are [`CellState::Completed`], cells on the current walk
/// [`CellState::Visited`].
pub fn wilson(
    maze: &mut Maze,
    start: Cell,
    order: &dyn CellOrder,
    rng: &mut impl Rng,
) -> Result<()> {
    maze.set(start, CellState::Completed)?;

    let sweep = Sweep::rows(maze.size());
    let mut walk = LoopErasedWalk::new(maze.vertex_count());
    let mut walks = 0;

    for cell in order.iter().chain(sweep.iter()) {
        if *maze.get(cell)? == CellState::Completed {
            continue;
        }
        walk.run(maze, cell, rng)?;
        walk.attach(maze)?;
        walks += 1;

        if maze.edge_count() + 1 == maze.vertex_count() {
            break;
        }
    }

    tracing::debug!("[wilson] tree complete after {} walks", walks);
    Ok(())
}

/// A random walk that erases every loop it closes, leaving a simple path.
struct LoopErasedWalk {
    path: Vec<Cell>,
    /// Position of each cell on `path`, if it is on it.
    position: Vec<Option<usize>>,
}

impl LoopErasedWalk {
    fn new(cells: usize) -> Self {
        LoopErasedWalk {
            path: Vec::new(),
            position: vec![None; cells],
        }
    }

    /// Walks from `from` until the tree is hit. The tree cell ends the path.
    fn run(&mut self, maze: &mut Maze, from: Cell, rng: &mut impl Rng) -> Result<()> {
        self.path.clear();
        self.visit(maze, from)?;

        let mut current = from;
        while maze[current] != CellState::Completed {
            let Some(next) = maze.neighbors(current)?.choose(rng) else {
                break;
            };
            if let Some(pos) = self.position[next] {
                for erased in self.path.drain(pos + 1..) {
                    self.position[erased] = None;
                    maze.set(erased, CellState::Unvisited)?;
                }
            } else if maze[next] == CellState::Completed {
                self.path.push(next);
            } else {
                self.visit(maze, next)?;
            }
            current = next;
        }
        Ok(())
    }

    fn visit(&mut self, maze: &mut Maze, cell: Cell) -> Result<()> {
        self.position[cell] = Some(self.path.len());
        self.path.push(cell);
        maze.set(cell, CellState::Visited)
    }

    /// Carves the path into the tree.
    fn attach(&mut self, maze: &mut Maze) -> Result<()> {
        for pair in self.path.windows(2) {
            maze.add_edge(pair[0], pair[1])?;
            maze.set(pair[0], CellState::Completed)?;
            self.position[pair[0]] = None;
        }
        Ok(())
    }
}
