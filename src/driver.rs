use crate::{LifeEngine, PlaybackSpeed, Renderer, Result};
use tracing::debug;

/// The animation loop: advances an engine one generation per frame and hands
/// every committed generation to a renderer.
///
/// The generation counter starts at 1 for the seeded state and grows by one per
/// frame. It is only ever shown, never fed back into the simulation.
pub struct Simulation<E, R> {
    engine: E,
    renderer: R,
    generation: u64,
}

impl<E: LifeEngine, R: Renderer> Simulation<E, R> {
    pub fn new(engine: E, renderer: R) -> Self {
        Self {
            engine,
            renderer,
            generation: 1,
        }
    }

    /// Number of the generation currently held by the engine.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (E, R) {
        (self.engine, self.renderer)
    }

    /// Renders the current generation without advancing.
    pub fn render(&mut self) -> Result<()> {
        let snapshot = self.engine.current_state();
        self.renderer.render(&snapshot, self.generation)
    }

    /// Computes and commits the next generation, then renders it.
    pub fn step(&mut self) -> Result<()> {
        self.engine.compute_next_generation();
        self.engine.commit_generation();
        self.generation += 1;
        self.render()
    }

    /// Renders the current generation, then plays `generations` more frames.
    ///
    /// Before each frame the loop sleeps for [`PlaybackSpeed::frame_delay`],
    /// read afresh every time, so speed changes apply from the next frame on.
    ///
    /// # Errors
    ///
    /// Stops at the first renderer error and returns it.
    pub async fn run(&mut self, generations: u64, speed: &PlaybackSpeed) -> Result<()> {
        self.render()?;
        for _ in 0..generations {
            tokio::time::sleep(speed.frame_delay()).await;
            self.step()?;
        }
        debug!(generation = self.generation, "simulation finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grid, GridEngine, Seeder};
    use std::time::Duration;
    use tokio::time::Instant;

    /// Keeps every frame and optionally changes the speed on a given generation.
    #[derive(Default)]
    struct Recorder {
        frames: Vec<(u64, Grid)>,
        speed_change: Option<(u64, PlaybackSpeed, u32)>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, grid: &Grid, generation: u64) -> Result<()> {
            self.frames.push((generation, grid.clone()));
            if let Some((at, speed, fps)) = &self.speed_change {
                if *at == generation {
                    speed.set(*fps);
                }
            }
            Ok(())
        }
    }

    fn blinker_engine() -> GridEngine {
        let mut grid = Grid::new(5, 5);
        Seeder::new(&mut grid).plant_rectangle(1, 2, 3, 1);
        let mut engine = GridEngine::new(5, 5);
        engine.load_grid(&grid).unwrap();
        engine
    }

    #[test]
    fn test_step_counts_generations() {
        let mut sim = Simulation::new(blinker_engine(), Recorder::default());
        assert_eq!(sim.generation(), 1);
        sim.step().unwrap();
        sim.step().unwrap();
        assert_eq!(sim.generation(), 3);

        let frames = &sim.renderer().frames;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].0, 2);
        assert_eq!(frames[0].1.to_string(), ".....\n..#..\n..#..\n..#..\n.....\n");
        assert_eq!(frames[1].1, blinker_engine().current_state());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_renders_every_generation() {
        let speed = PlaybackSpeed::new(5);
        let mut sim = Simulation::new(blinker_engine(), Recorder::default());
        let timer = Instant::now();
        sim.run(4, &speed).await.unwrap();
        let elapsed = timer.elapsed();

        let (engine, recorder) = sim.into_parts();
        let generations = recorder.frames.iter().map(|(g, _)| *g).collect::<Vec<_>>();
        assert_eq!(generations, vec![1, 2, 3, 4, 5]);
        // renderer only sees committed states, in order
        for window in recorder.frames.windows(2) {
            let mut replay = GridEngine::new(5, 5);
            replay.load_grid(&window[0].1).unwrap();
            replay.update(1);
            assert_eq!(replay.current(), &window[1].1);
        }
        assert_eq!(&recorder.frames[4].1, engine.current());

        assert!(elapsed >= Duration::from_millis(800), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(850), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_picks_up_speed_changes() {
        let speed = PlaybackSpeed::new(1);
        let recorder = Recorder {
            speed_change: Some((2, speed.clone(), 10)),
            ..Default::default()
        };
        let mut sim = Simulation::new(blinker_engine(), recorder);
        let timer = Instant::now();
        sim.run(5, &speed).await.unwrap();
        let elapsed = timer.elapsed();

        // one frame at 1 fps, then four at 10 fps
        assert_eq!(sim.generation(), 6);
        assert!(elapsed >= Duration::from_millis(1400), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1450), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_zero_generations_renders_seed_only() {
        let mut sim = Simulation::new(blinker_engine(), Recorder::default());
        sim.run(0, &PlaybackSpeed::default()).await.unwrap();
        assert_eq!(sim.renderer().frames.len(), 1);
        assert_eq!(sim.generation(), 1);
    }
}
