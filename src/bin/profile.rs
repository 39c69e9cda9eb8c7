use std::time::{Duration, Instant};

use gridmaze::{
    generators::{Generator, generate_maze},
    grid::{CellState, Maze},
    solvers::Bfs,
};

const DEFAULT_SIZE: usize = 64;
const LOG_FILE: &str = "profile.log";

/// Usage: `profile [size] [iterations] [generator]`
///
/// Generates `iterations` mazes of `size x size` cells with every generator,
/// or only with the named one, and checks that each is a perfect maze.
fn main() -> std::io::Result<()> {
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let size = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_SIZE);
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);
    let generators = match args.next() {
        Some(name) => match name.parse::<Generator>() {
            Ok(generator) => vec![generator],
            Err(e) => {
                eprintln!("{}", e);
                return Ok(());
            }
        },
        None => Generator::ALL.to_vec(),
    };

    tracing::info!(
        "[profile] {} generators, {}x{} grid, {} iterations",
        generators.len(),
        size,
        size,
        num_iters
    );

    for generator in generators {
        let mut total = Duration::ZERO;
        let mut longest_path = 0;
        for seed in 0..num_iters as u64 {
            let mut maze = Maze::new(size, size, CellState::Unvisited);
            let started = Instant::now();
            if let Err(e) = generate_maze(&mut maze, generator, 0, Some(seed)) {
                eprintln!("{}: {}", generator, e);
                break;
            }
            total += started.elapsed();

            if !maze.is_spanning_tree() {
                tracing::error!("[profile] {} seed {} is not a perfect maze", generator, seed);
                eprintln!("{} (seed {}) did not produce a perfect maze", generator, seed);
                continue;
            }
            if let Ok(bfs) = Bfs::new(&maze, 0) {
                longest_path = longest_path.max(bfs.max_distance());
            }
        }

        let average = total / num_iters.max(1) as u32;
        tracing::info!(
            "[profile] {}: average {:?}, longest path {}",
            generator.name(),
            average,
            longest_path
        );
        println!(
            "{:<40} {:?} average, longest path {}",
            generator.to_string(),
            average,
            longest_path
        );
    }
    Ok(())
}
