use gol_grid::*;

fn bench<E: LifeEngine>(name: &str, grid: &Grid, generations: u64) -> u64 {
    let mut engine = E::new(grid.rows(), grid.cols());
    engine.load_grid(grid).unwrap();

    let timer = std::time::Instant::now();
    engine.update(generations);
    let elapsed = timer.elapsed();
    let state = engine.current_state();
    println!(
        "{name:<8} side={} gens={generations} time={:.3} population={}",
        grid.cols(),
        elapsed.as_secs_f64(),
        state.population()
    );
    state.hash()
}

fn main() {
    for side in [64, 256, 1024] {
        let mut grid = Grid::new(side, side);
        Seeder::new(&mut grid).plant_random(0.3, Some(42)).unwrap();
        let generations = (1 << 22) / (side as u64 * side as u64).max(1) + 16;

        let a = bench::<GridEngine>("grid", &grid, generations);
        let b = bench::<PackedEngine>("packed", &grid, generations);
        assert_eq!(a, b, "engines disagree on a {side}x{side} grid");
    }
}
