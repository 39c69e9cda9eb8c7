use rand::Rng;

use crate::{
    error::Result,
    grid::{CellState, Maze},
};

/// Direction of a dividing wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    /// A wall between two rows.
    Horizontal,
    /// A wall between two columns.
    Vertical,
}

/// A rectangle of cells: top-left corner, width and height.
#[derive(Debug, Clone, Copy)]
struct Area {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

/// Recursive division: start from the fully connected grid, split it with a
/// wall that has a single gap and recurse into both halves.
pub fn recursive_division(maze: &mut Maze, rng: &mut impl Rng) -> Result<()> {
    // Start with every passage open
    maze.fill();
    for cell in 0..maze.vertex_count() {
        maze.set(cell, CellState::Completed)?;
    }

    let mut walls = 0;
    let area = Area {
        x: 0,
        y: 0,
        width: maze.cols(),
        height: maze.rows(),
    };
    divide(maze, area, rng, &mut walls)?;

    tracing::debug!("[recursive-division] inserted {} walls", walls);
    Ok(())
}

fn divide(maze: &mut Maze, area: Area, rng: &mut impl Rng, walls: &mut usize) -> Result<()> {
    let Area {
        x,
        y,
        width,
        height,
    } = area;
    if width < 2 || height < 2 {
        // A single row or column is already a corridor
        return Ok(());
    }

    let orientation = match width.cmp(&height) {
        std::cmp::Ordering::Less => Orientation::Horizontal,
        std::cmp::Ordering::Greater => Orientation::Vertical,
        std::cmp::Ordering::Equal => {
            if rng.random_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            }
        }
    };
    *walls += 1;

    match orientation {
        Orientation::Horizontal => {
            // Randomly choose the row above the wall
            let diff = rng.random_range(0..height - 1);
            let y_wall = y + diff;

            // Randomly choose a position for the gap in the wall
            let x_gap = x + rng.random_range(0..width);

            for col in (x..x + width).filter(|&col| col != x_gap) {
                let above = maze.cell(col, y_wall)?;
                let below = maze.cell(col, y_wall + 1)?;
                maze.remove_edge(above, below)?;
            }

            let upper_height = diff + 1;
            let lower_height = height - upper_height;

            // Recursively divide the regions above and below the wall
            divide(maze, Area { height: upper_height, ..area }, rng, walls)?;
            divide(
                maze,
                Area {
                    y: y_wall + 1,
                    height: lower_height,
                    ..area
                },
                rng,
                walls,
            )
        }
        Orientation::Vertical => {
            // Choose a random column left of the wall
            let diff = rng.random_range(0..width - 1);
            let x_wall = x + diff;

            // Randomly choose a position for the gap in the wall
            let y_gap = y + rng.random_range(0..height);

            for row in (y..y + height).filter(|&row| row != y_gap) {
                let left = maze.cell(x_wall, row)?;
                let right = maze.cell(x_wall + 1, row)?;
                maze.remove_edge(left, right)?;
            }

            let left_width = diff + 1;
            let right_width = width - left_width;

            // Recursively divide the regions left and right of the wall
            divide(maze, Area { width: left_width, ..area }, rng, walls)?;
            divide(
                maze,
                Area {
                    x: x_wall + 1,
                    width: right_width,
                    ..area
                },
                rng,
                walls,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridGraph;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_recursive_division_4x4() {
        let mut maze = GridGraph::new(4, 4, CellState::Unvisited);
        recursive_division(&mut maze, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(maze.edge_count(), 15);
        assert!(maze.is_spanning_tree());
    }

    #[test]
    fn test_recursive_division_shapes() {
        for (cols, rows) in [(1, 1), (1, 9), (9, 1), (2, 2), (13, 6), (16, 16)] {
            for seed in 0..4 {
                let mut maze = GridGraph::new(cols, rows, CellState::Unvisited);
                recursive_division(&mut maze, &mut StdRng::seed_from_u64(seed)).unwrap();
                assert!(maze.is_spanning_tree(), "{}x{} seed {}", cols, rows, seed);
            }
        }
    }
}
