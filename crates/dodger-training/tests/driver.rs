use std::{fs, ops::ControlFlow};

use dodger_neat::{Genome, NeatConfig, PersistError};
use dodger_training::{
    DriverError, EvolutionDriver, FrameObserver, FrameView, Headless, SimulationSettings,
};

fn small_config() -> NeatConfig {
    let mut config = NeatConfig::default();
    config.neat.population_size = 6;
    config.neat.seed = Some(17);
    config
}

fn short_settings() -> SimulationSettings {
    SimulationSettings {
        frame_limit: Some(200),
        seed: 5,
        ..SimulationSettings::default()
    }
}

#[test]
fn run_saves_the_best_genome() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("winner.json");
    let driver = EvolutionDriver::new(small_config(), short_settings())
        .unwrap()
        .generations(3)
        .winner_path(&path);

    let outcome = driver.run(&mut Headless).unwrap();
    assert_eq!(outcome.generations(), 3);
    assert_eq!(outcome.statistics.generations().len(), 3);
    assert_eq!(outcome.saved_to(), Some(path.as_path()));

    let winner = outcome.winner.as_ref().unwrap();
    assert_eq!(&Genome::load_json(&path).unwrap(), winner);
    let best_fitness = outcome
        .statistics
        .best_fitnesses()
        .into_iter()
        .fold(f32::MIN, f32::max);
    assert_eq!(winner.fitness(), best_fitness);

    let best_score = outcome
        .summaries
        .iter()
        .map(|s| s.best_score)
        .fold(0.0, f64::max);
    assert_eq!(outcome.global_best_score, best_score);
    let generations: Vec<_> = outcome.summaries.iter().map(|s| s.generation).collect();
    assert_eq!(generations, vec![1, 2, 3]);
}

#[test]
fn persistence_failure_keeps_the_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("winner.json");
    let driver = EvolutionDriver::new(small_config(), short_settings())
        .unwrap()
        .generations(2)
        .winner_path(&path);

    let outcome = driver.run(&mut Headless).unwrap();
    assert!(matches!(
        outcome.persist_error(),
        Some(PersistError::Io { .. })
    ));
    assert!(outcome.saved_to().is_none());
    assert!(outcome.winner.is_some());
    assert_eq!(outcome.generations(), 2);
}

#[test]
fn invalid_config_file_fails_before_training() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dodger.toml");
    fs::write(&path, "[reproduction]\ntournament_size = 0\n").unwrap();

    let err = EvolutionDriver::from_config_file(&path, short_settings()).unwrap_err();
    assert!(matches!(err, DriverError::Config { .. }), "{err}");

    let err = EvolutionDriver::from_config_file(dir.path().join("missing.toml"), short_settings())
        .unwrap_err();
    assert!(matches!(err, DriverError::Config { .. }), "{err}");
}

#[test]
fn network_inputs_must_match_the_sensor() {
    let mut config = small_config();
    config.genome.num_inputs = 4;
    let err = EvolutionDriver::new(config, short_settings()).unwrap_err();
    assert!(matches!(err, DriverError::Config { .. }), "{err}");
}

#[test]
fn config_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dodger.toml");
    fs::write(&path, "[neat]\npopulation_size = 4\nseed = 1\n").unwrap();

    let driver = EvolutionDriver::from_config_file(&path, short_settings()).unwrap();
    assert_eq!(driver.config().neat.population_size, 4);
}

/// Lets one generation play a few frames, then asks to quit.
struct QuitAfterFirst {
    frames: u64,
}

impl FrameObserver for QuitAfterFirst {
    fn on_frame(&mut self, _view: &FrameView<'_>) -> ControlFlow<()> {
        self.frames += 1;
        if self.frames >= 10 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn quit_requested(&self) -> bool {
        self.frames >= 10
    }
}

#[test]
fn quit_request_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let driver = EvolutionDriver::new(small_config(), short_settings())
        .unwrap()
        .generations(50)
        .winner_path(dir.path().join("winner.json"));

    let mut observer = QuitAfterFirst { frames: 0 };
    let outcome = driver.run(&mut observer).unwrap();
    assert_eq!(outcome.generations(), 1);
    assert!(outcome.summaries[0].termination.is_aborted());
    assert!(outcome.saved_to().is_some());
}
