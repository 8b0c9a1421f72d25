use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use lifestep::grid::{pattern_glider, pattern_r_pentomino};
use lifestep::{Boundary, RuleMode, RuleSequence, Simulation, SimulationConfig, StepEngine};

/// Environment variable holding a `;`-separated rule sequence, e.g. `B3/S23;B36/S23`.
const RULES_ENV: &str = "LIFESTEP_RULES";

/// Settings for the headless demo run.
#[derive(Debug, Clone)]
struct DemoConfig {
    /// Grid width and height in cells.
    width: usize,
    height: usize,
    /// Initial random fill, percent.
    alive_chance: u8,
    /// Number of generations to run.
    generations: u64,
    /// Simulated frame length fed to the driver each tick.
    frame: Duration,
    step_interval: Duration,
    boundary: Boundary,
    seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
            alive_chance: 25,
            generations: 60,
            frame: Duration::from_millis(16),
            step_interval: Duration::from_millis(48),
            boundary: Boundary::Wrap,
            seed: 42,
        }
    }
}

fn main() {
    env_logger::init();

    let config = DemoConfig::default();

    let sequence = match std::env::var(RULES_ENV) {
        Ok(label) => match label.parse::<RuleSequence>() {
            Ok(sequence) => sequence,
            Err(e) => {
                log::error!("{RULES_ENV}: {e}");
                std::process::exit(2);
            }
        },
        Err(_) => RuleSequence::default(),
    };
    log::info!("lifestep - rule sequence {sequence}");

    let mut engine = StepEngine::new();
    engine.set_boundary(config.boundary);

    let mut sim = Simulation::new(
        SimulationConfig {
            width: config.width,
            height: config.height,
            step_interval: config.step_interval,
            alive_chance: config.alive_chance,
        },
        engine,
        RuleMode::Sequence(sequence),
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    sim.randomize(&mut rng);
    sim.stamp(&pattern_glider(), (2, 2));
    sim.stamp(&pattern_r_pentomino(), (config.width / 2, config.height / 2));

    sim.toggle_run();
    while sim.generation() < config.generations {
        if sim.tick(config.frame) {
            log::info!(
                "generation {:>4}  rule {}  population {}",
                sim.generation(),
                sim.mode().rule_for(sim.generation() - 1),
                sim.grid().population()
            );
        }
    }
    sim.toggle_run();

    println!("{}", sim.grid());
}
