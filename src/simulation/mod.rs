//! Headless driver that steps an automaton on a background thread
//!
//! The stepper thread only ever calls `advance` or `randomize`, the caller's
//! thread renders through `with_cell_data`. Both talk to the same
//! [`GameOfLifeAutomaton`], which keeps readers from seeing half-published
//! generations.

use crate::concurrent::Mutex;
use crate::config::Settings;
use crate::game_of_life::{load_grid_from_file, GameOfLifeAutomaton, SteppingCellularAutomaton};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// What a single step tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Randomized,
    Advanced,
    Paused,
}

/// An automaton plus the play/pause and randomize requests of its user
#[derive(Debug)]
pub struct Simulation {
    automaton: Arc<GameOfLifeAutomaton>,
    rng: Mutex<StdRng>,
    should_advance: AtomicBool,
    should_randomize: AtomicBool,
    generation: AtomicU64,
}

impl Simulation {
    pub fn new(automaton: GameOfLifeAutomaton, rng: StdRng, playing: bool) -> Self {
        Self {
            automaton: Arc::new(automaton),
            rng: Mutex::new(rng),
            should_advance: AtomicBool::new(playing),
            should_randomize: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// Build a simulation from settings.
    ///
    /// Loads the configured pattern file, or starts from a random grid when
    /// no pattern is configured.
    pub fn from_settings(settings: &Settings, playing: bool) -> Result<Self> {
        settings.validate().context("Configuration validation failed")?;

        let mut rng = match settings.random.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (rows, columns) = (settings.grid.rows, settings.grid.columns);
        let automaton = match &settings.input.pattern_file {
            Some(path) => {
                let grid = load_grid_from_file(path, rows, columns, settings.input.encoding)
                    .with_context(|| format!("Failed to load pattern from {}", path.display()))?;
                GameOfLifeAutomaton::from_grid(grid)
            }
            None => {
                log::info!("No pattern file configured, starting from a random {}x{} grid", rows, columns);
                GameOfLifeAutomaton::random(rows, columns, &mut rng)?
            }
        };

        Ok(Self::new(automaton, rng, playing))
    }

    pub fn automaton(&self) -> &Arc<GameOfLifeAutomaton> {
        &self.automaton
    }

    /// Number of generations advanced so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn is_playing(&self) -> bool {
        self.should_advance.load(Ordering::Acquire)
    }

    /// Flip between playing and paused, returning whether it now plays
    pub fn toggle_play(&self) -> bool {
        let playing = !self.should_advance.fetch_xor(true, Ordering::AcqRel);
        log::debug!("Simulation {}", if playing { "resumed" } else { "paused" });
        playing
    }

    /// Ask for the grid to be randomized on the next step tick
    pub fn request_randomize(&self) {
        self.should_randomize.store(true, Ordering::Release);
    }

    /// Handle one step tick.
    ///
    /// A pending randomize request wins over advancing and is consumed.
    pub fn step(&self) -> StepOutcome {
        if self.should_randomize.swap(false, Ordering::AcqRel) {
            self.rng.with_lock(|rng| self.automaton.randomize(rng));
            log::debug!("Grid randomized");
            StepOutcome::Randomized
        } else if self.is_playing() {
            self.automaton.advance();
            let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
            log::trace!("Advanced to generation {}", generation);
            StepOutcome::Advanced
        } else {
            StepOutcome::Paused
        }
    }

    /// Start calling [`Simulation::step`] every `interval` on a new thread
    pub fn spawn_stepper(self: &Arc<Self>, interval: Duration) -> Result<Stepper> {
        let simulation = Arc::clone(self);
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("automaton-stepper".to_string())
            .spawn(move || {
                log::debug!("Stepper started with interval {:?}", interval);
                while !thread_stop.load(Ordering::Acquire) {
                    thread::park_timeout(interval);
                    if thread_stop.load(Ordering::Acquire) {
                        break;
                    }
                    simulation.step();
                }
                log::debug!("Stepper stopped");
            })
            .context("Failed to spawn stepper thread")?;

        Ok(Stepper { handle, stop })
    }
}

/// Handle to a running stepper thread
#[derive(Debug)]
pub struct Stepper {
    handle: JoinHandle<()>,
    stop: Arc<AtomicBool>,
}

impl Stepper {
    /// Stop the stepper and wait for its thread to exit
    pub fn stop(self) -> Result<()> {
        self.stop.store(true, Ordering::Release);
        self.handle.thread().unpark();
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("Stepper thread panicked"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputEncoding;
    use crate::game_of_life::io::encode_text;
    use std::time::Instant;
    use tempfile::tempdir;

    fn blinker_simulation(playing: bool) -> Simulation {
        let automaton =
            GameOfLifeAutomaton::from_reader(3, 3, "0,0,0\n1,1,1\n0,0,0".as_bytes()).unwrap();
        Simulation::new(automaton, StdRng::seed_from_u64(0), playing)
    }

    #[test]
    fn test_paused_simulation_does_not_advance() {
        let simulation = blinker_simulation(false);
        let before = simulation.automaton().snapshot();

        assert_eq!(simulation.step(), StepOutcome::Paused);
        assert_eq!(simulation.automaton().snapshot(), before);
        assert_eq!(simulation.generation(), 0);
    }

    #[test]
    fn test_toggle_play() {
        let simulation = blinker_simulation(false);
        assert!(simulation.toggle_play());
        assert!(simulation.is_playing());
        assert_eq!(simulation.step(), StepOutcome::Advanced);
        assert_eq!(simulation.generation(), 1);

        assert!(!simulation.toggle_play());
        assert_eq!(simulation.step(), StepOutcome::Paused);
    }

    #[test]
    fn test_randomize_request_is_consumed_once() {
        let simulation = blinker_simulation(true);
        simulation.request_randomize();

        assert_eq!(simulation.step(), StepOutcome::Randomized);
        assert_eq!(simulation.generation(), 0);
        assert_eq!(simulation.step(), StepOutcome::Advanced);
    }

    #[test]
    fn test_from_settings_with_pattern() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("blinker.csv");
        std::fs::write(&pattern, encode_text("0,0,0\n1,1,1\n", InputEncoding::Utf16Le)).unwrap();

        let mut settings = Settings::default();
        settings.grid.rows = 4;
        settings.grid.columns = 5;
        settings.input.pattern_file = Some(pattern);

        let simulation = Simulation::from_settings(&settings, false).unwrap();
        assert_eq!(simulation.automaton().rows(), 4);
        assert_eq!(simulation.automaton().columns(), 5);
        assert_eq!(simulation.automaton().living_count(), 3);
    }

    #[test]
    fn test_from_settings_rejects_invalid_pattern() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("bad.csv");
        std::fs::write(&pattern, "1,5\n").unwrap();

        let mut settings = Settings::default();
        settings.input.pattern_file = Some(pattern);
        settings.input.encoding = InputEncoding::Utf8;

        assert!(Simulation::from_settings(&settings, false).is_err());
    }

    #[test]
    fn test_from_settings_seeded_random() {
        let mut settings = Settings::default();
        settings.grid.rows = 12;
        settings.grid.columns = 12;
        settings.random.seed = Some(99);

        let a = Simulation::from_settings(&settings, false).unwrap();
        let b = Simulation::from_settings(&settings, false).unwrap();
        assert_eq!(a.automaton().snapshot(), b.automaton().snapshot());
    }

    #[test]
    fn test_stepper_advances_in_background() {
        let simulation = Arc::new(blinker_simulation(true));
        let stepper = simulation.spawn_stepper(Duration::from_millis(1)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while simulation.generation() < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }

        stepper.stop().unwrap();
        assert!(simulation.generation() >= 3);
    }
}
