//! Generation-stepping engine for Life-like cellular automata.
//!
//! A [`StepEngine`] turns one [`Grid`] snapshot into the next using a [`Rule`]
//! and its boundary settings. Rules can rotate per generation through a
//! [`RuleSequence`], and [`Simulation`] ties it together into a tick-driven
//! driver for a presentation layer.
//!
//! ```
//! use lifestep::{Grid, Rule, StepEngine};
//!
//! let blinker: Grid = ".....\n.###.\n.....".parse().unwrap();
//! let next = StepEngine::new().step(&blinker, &Rule::conway());
//! assert_eq!(next.to_string(), "..#..\n..#..\n..#..\n");
//! ```

pub mod engine;
pub mod error;
pub mod grid;
pub mod rule;
pub mod sequence;
pub mod simulation;

pub use engine::{Boundary, StepEngine};
pub use error::{ParseGridError, RuleError};
pub use grid::Grid;
pub use rule::Rule;
pub use sequence::RuleSequence;
pub use simulation::{RuleMode, Simulation, SimulationConfig};
