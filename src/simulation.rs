use std::time::Duration;

use rand::Rng;

use crate::engine::StepEngine;
use crate::grid::Grid;
use crate::rule::Rule;
use crate::sequence::RuleSequence;

/// How the rule for each generation is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleMode {
    /// The same rule every generation.
    Single(Rule),
    /// `sequence.at(generation)`.
    Sequence(RuleSequence),
}

impl RuleMode {
    /// Rule used to step from `generation` to `generation + 1`.
    pub fn rule_for(&self, generation: u64) -> &Rule {
        match self {
            RuleMode::Single(rule) => rule,
            RuleMode::Sequence(sequence) => sequence.at(generation),
        }
    }
}

impl Default for RuleMode {
    fn default() -> Self {
        RuleMode::Single(Rule::default())
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Minimum time between automatic steps while running.
    pub step_interval: Duration,
    /// Percent chance (0-100) of a cell starting alive when randomized.
    pub alive_chance: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            step_interval: Duration::from_millis(500),
            alive_chance: 25,
        }
    }
}

/// Drives a grid forward one generation per tick.
///
/// Owns the current grid, the generation counter and the step timer. The
/// engine is borrowed for each step and never retains the grid.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    engine: StepEngine,
    mode: RuleMode,
    grid: Grid,
    generation: u64,
    running: bool,
    /// Time accumulated toward the next step.
    timer: Duration,
}

impl Simulation {
    /// Starts paused at generation 0 with every cell dead.
    pub fn new(config: SimulationConfig, engine: StepEngine, mode: RuleMode) -> Self {
        assert!(
            config.alive_chance <= 100,
            "alive chance must be within 0..=100, got {}",
            config.alive_chance
        );
        let grid = Grid::new(config.width, config.height);
        log::info!(
            "simulation created: {}x{} grid, {:?} boundary, rule {}",
            config.width,
            config.height,
            engine.boundary(),
            mode.rule_for(0)
        );
        Self {
            config,
            engine,
            mode,
            grid,
            generation: 0,
            running: false,
            timer: Duration::ZERO,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn engine(&self) -> &StepEngine {
        &self.engine
    }

    /// Boundary settings can be changed between ticks.
    pub fn engine_mut(&mut self) -> &mut StepEngine {
        &mut self.engine
    }

    pub fn mode(&self) -> &RuleMode {
        &self.mode
    }

    pub fn set_mode(&mut self, mode: RuleMode) {
        log::info!("rule mode changed at generation {}", self.generation);
        self.mode = mode;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_step_interval(&mut self, interval: Duration) {
        self.config.step_interval = interval;
    }

    pub fn set_alive_chance(&mut self, alive_chance: u8) {
        assert!(
            alive_chance <= 100,
            "alive chance must be within 0..=100, got {alive_chance}"
        );
        self.config.alive_chance = alive_chance;
    }

    /// Rule the next step will use.
    pub fn current_rule(&self) -> &Rule {
        self.mode.rule_for(self.generation)
    }

    /// Advance the simulation by one generation.
    pub fn step(&mut self) {
        let rule = self.mode.rule_for(self.generation);
        self.grid = self.engine.step(&self.grid, rule);
        self.generation += 1;
        log::trace!(
            "generation {} population {}",
            self.generation,
            self.grid.population()
        );
    }

    /// Feeds elapsed real time to the step timer. While running, performs one
    /// step once the accumulated time reaches the step interval and restarts
    /// the timer. Returns whether a step ran.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.timer += dt;
        if self.timer >= self.config.step_interval {
            self.step();
            self.timer = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Starts or pauses automatic stepping. Pausing discards accumulated time.
    /// Returns the new running state.
    pub fn toggle_run(&mut self) -> bool {
        self.running = !self.running;
        if !self.running {
            self.timer = Duration::ZERO;
        }
        log::debug!(
            "simulation {} at generation {}",
            if self.running { "started" } else { "paused" },
            self.generation
        );
        self.running
    }

    /// Kills every cell, rewinds to generation 0 and pauses.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.generation = 0;
        self.timer = Duration::ZERO;
        self.running = false;
        log::info!("simulation reset");
    }

    /// Re-seeds the grid using the configured alive chance and rewinds to
    /// generation 0.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid.randomize(self.config.alive_chance, rng);
        self.generation = 0;
        self.timer = Duration::ZERO;
        log::info!(
            "grid randomized at {}% alive chance, population {}",
            self.config.alive_chance,
            self.grid.population()
        );
    }

    /// Replaces the grid with a new all-dead grid of the given size and
    /// rewinds to generation 0.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.grid = Grid::new(width, height);
        self.config.width = width;
        self.config.height = height;
        self.generation = 0;
        self.timer = Duration::ZERO;
        log::info!("grid resized to {width}x{height}");
    }

    /// Flips one cell directly, bypassing the engine. Returns `false` outside
    /// the grid.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> bool {
        let toggled = self.grid.toggle(x, y);
        if !toggled {
            log::debug!("ignored toggle outside grid at ({x}, {y})");
        }
        toggled
    }

    /// Stamps a pattern onto the grid; see [`Grid::stamp`].
    pub fn stamp(&mut self, pattern: &[(i32, i32)], origin: (usize, usize)) -> usize {
        self.grid.stamp(pattern, origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{pattern_blinker, pattern_glider};
    use crate::rule::TABLE_LEN;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sim() -> Simulation {
        Simulation::new(
            SimulationConfig::default(),
            StepEngine::new(),
            RuleMode::default(),
        )
    }

    #[test]
    fn starts_paused_and_empty() {
        let s = sim();
        assert_eq!(s.generation(), 0);
        assert!(!s.is_running());
        assert_eq!(s.grid().width(), 10);
        assert_eq!(s.grid().height(), 10);
        assert_eq!(s.grid().population(), 0);
        assert_eq!(s.current_rule(), &Rule::conway());
    }

    #[test]
    fn step_advances_generation() {
        let mut s = sim();
        s.stamp(&pattern_blinker(), (5, 5));
        s.step();
        assert_eq!(s.generation(), 1);
        assert!(s.grid().is_alive(5, 4));
        assert!(s.grid().is_alive(5, 6));
        assert!(!s.grid().is_alive(4, 5));
    }

    #[test]
    fn tick_waits_for_interval() {
        let mut s = sim();
        let interval = s.config().step_interval;

        // Paused: time is ignored.
        assert!(!s.tick(interval * 3));
        assert_eq!(s.generation(), 0);

        assert!(s.toggle_run());
        assert!(!s.tick(interval / 2));
        assert!(!s.tick(interval / 4));
        assert!(s.tick(interval / 4));
        assert_eq!(s.generation(), 1);

        // Timer restarts at zero after a step, so one long frame is one step.
        assert!(s.tick(interval * 5));
        assert_eq!(s.generation(), 2);
        assert!(!s.tick(interval / 2));
    }

    #[test]
    fn pausing_discards_accumulated_time() {
        let mut s = sim();
        s.set_step_interval(Duration::from_millis(100));
        s.toggle_run();
        s.tick(Duration::from_millis(90));
        assert!(!s.toggle_run());
        s.toggle_run();
        assert!(!s.tick(Duration::from_millis(20)));
        assert_eq!(s.generation(), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = sim();
        s.stamp(&pattern_glider(), (4, 4));
        s.toggle_run();
        s.step();
        s.step();
        s.reset();
        assert_eq!(s.generation(), 0);
        assert_eq!(s.grid().population(), 0);
        assert!(!s.is_running());
    }

    #[test]
    fn sequence_mode_rotates_by_generation() {
        let fill = Rule::new([true; TABLE_LEN], [true; TABLE_LEN]);
        let kill = Rule::new([false; TABLE_LEN], [false; TABLE_LEN]);
        let seq = RuleSequence::new(vec![fill, kill]).unwrap();
        let mut s = Simulation::new(
            SimulationConfig::default(),
            StepEngine::wrapping(),
            RuleMode::Sequence(seq),
        );

        assert_eq!(s.current_rule(), &fill);
        s.step();
        assert_eq!(s.grid().population(), 100);
        assert_eq!(s.current_rule(), &kill);
        s.step();
        assert_eq!(s.grid().population(), 0);
        s.step();
        assert_eq!(s.grid().population(), 100);
        assert_eq!(s.generation(), 3);
    }

    #[test]
    fn randomize_uses_alive_chance() {
        let mut s = sim();
        s.set_alive_chance(100);
        s.step();
        s.randomize(&mut StdRng::seed_from_u64(1));
        assert_eq!(s.grid().population(), 100);
        assert_eq!(s.generation(), 0);

        s.set_alive_chance(0);
        s.randomize(&mut StdRng::seed_from_u64(1));
        assert_eq!(s.grid().population(), 0);
    }

    #[test]
    fn resize_replaces_grid() {
        let mut s = sim();
        s.stamp(&pattern_glider(), (4, 4));
        s.step();
        s.resize(7, 3);
        assert_eq!(s.grid().width(), 7);
        assert_eq!(s.grid().height(), 3);
        assert_eq!(s.grid().population(), 0);
        assert_eq!(s.generation(), 0);
        assert_eq!(s.config().width, 7);
    }

    #[test]
    fn toggle_cell_bypasses_engine() {
        let mut s = sim();
        assert!(s.toggle_cell(2, 3));
        assert!(s.grid().is_alive(2, 3));
        assert_eq!(s.generation(), 0);
        assert!(!s.toggle_cell(10, 3));
    }

    #[test]
    fn boundary_changes_apply_between_steps() {
        let mut s = sim();
        s.engine_mut().set_edge_alive(true);
        let mut rule = Rule::new([false; TABLE_LEN], [false; TABLE_LEN]);
        rule.set_dead(5, true);
        s.set_mode(RuleMode::Single(rule));
        s.step();
        // Only the four corners see five live edge neighbors.
        assert_eq!(s.grid().population(), 4);
        assert!(s.grid().is_alive(9, 9));
    }

    #[test]
    #[should_panic(expected = "alive chance")]
    fn alive_chance_over_100_panics() {
        sim().set_alive_chance(150);
    }
}
