use std::fmt;

/// Per-cell payload the generators and the flood fill write while they run.
///
/// Observers use it to colour cells; the algorithms use it as their visited
/// marker.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Not yet reached.
    #[default]
    Unvisited,
    /// Adjacent to the maze built so far and queued for processing.
    Frontier,
    /// Reached but still being worked on (on a random walk, on a stack, ...).
    Visited,
    /// Part of the finished maze.
    Completed,
}

impl CellState {
    pub fn is_unvisited(self) -> bool {
        self == CellState::Unvisited
    }

    /// Whether the cell has been reached, i.e. is neither unvisited nor merely on the frontier.
    pub fn is_reached(self) -> bool {
        matches!(self, CellState::Visited | CellState::Completed)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CellState::Unvisited => '#',
            CellState::Frontier => '+',
            CellState::Visited => '.',
            CellState::Completed => ' ',
        };
        write!(f, "{}", symbol)
    }
}
