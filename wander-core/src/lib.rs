//! Lattice random walks.
//!
//! A walk of `n` steps in `d` dimensions moves by exactly ±1 along every axis
//! at every step, each sign drawn independently. [`simulate`] produces the
//! visited positions, [`calculate_stats`] summarises them, and [`run`] does
//! both at once.
//!
//! ```
//! use wander_core::{RngSteps, WalkParameters, run};
//!
//! let walk = run(WalkParameters::new(100, 2), RngSteps::seeded(7)).unwrap();
//! assert_eq!(walk.path.len(), 100);
//! assert!(walk.stats.total_distance <= 100.0 * 2f64.sqrt());
//! ```

mod error;
mod generator;
mod path;
mod stats;
mod step;

pub use error::{Result, WalkError};
pub use generator::{MAX_COORDINATES, Walk, WalkGenerator, WalkParameters, run, simulate};
pub use path::Path;
pub use stats::{Stats, calculate_stats, euclidean_norm};
pub use step::{RngSteps, ScriptedSteps, Step, StepSource, UnitStep, random_seed};
