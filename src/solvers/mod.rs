mod bfs;

pub use bfs::{Bfs, flood_fill, is_connected};
