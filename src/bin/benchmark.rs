//! Serial vs parallel generation timing on random boards

use std::time::Instant;

use gol_stage::domain::{Grid, engine::PARALLEL_THRESHOLD};
use rand::{SeedableRng, rngs::StdRng};

const DENSITY: f64 = 0.3;

fn random_grid(size: usize) -> Grid {
    let mut rng = StdRng::seed_from_u64(size as u64);
    Grid::random(size, size, DENSITY, &mut rng)
}

/// Average milliseconds per generation
fn benchmark(size: usize, iterations: u32, evolve: fn(&Grid) -> Grid) -> f64 {
    let mut grid = random_grid(size);
    let start = Instant::now();
    for _ in 0..iterations {
        grid = evolve(&grid);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Game of Life Generation Benchmark ===\n");
    println!("Parallel evolution kicks in at {PARALLEL_THRESHOLD} cells\n");

    let sizes = [10, 50, 100, 128, 200, 500, 1000, 2000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<48}", "");

    for size in sizes {
        let serial_ms = benchmark(size, iterations, Grid::evolve);
        let parallel_ms = benchmark(size, iterations, Grid::evolve_parallel);
        println!(
            "{:>10} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{size}x{size}"),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    println!("\n=== Throughput at 2000x2000 ===\n");
    let cells = 2000 * 2000;
    let parallel_ms = benchmark(2000, iterations, Grid::evolve_parallel);
    println!(
        "Parallel: {:.2} ms/gen, {:.1}M cells/sec",
        parallel_ms,
        cells as f64 / (parallel_ms / 1000.0) / 1_000_000.0
    );
}
