use rand::rngs::StdRng;
use tracing::debug;

use crate::{Path, Result, RngSteps, Stats, StepSource, WalkError, calculate_stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkParameters {
    pub num_steps: usize,
    pub dimensions: usize,
}

impl WalkParameters {
    pub fn new(num_steps: usize, dimensions: usize) -> Self {
        Self {
            num_steps,
            dimensions,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_steps < 1 {
            return Err(WalkError::InvalidParameter {
                name: "num_steps",
                value: self.num_steps,
                reason: "a walk needs at least one step",
            });
        }
        if self.dimensions < 1 {
            return Err(WalkError::InvalidParameter {
                name: "dimensions",
                value: self.dimensions,
                reason: "a walk needs at least one axis",
            });
        }
        Ok(())
    }
}

impl Default for WalkParameters {
    fn default() -> Self {
        Self::new(1000, 2)
    }
}

/// Largest `num_steps × dimensions` a single walk may hold (2 GiB of
/// coordinates).
pub const MAX_COORDINATES: usize = 1 << 28;

/// Draws `num_steps × dimensions` unit steps from `source` and accumulates
/// them into a path.
///
/// Walks larger than [`MAX_COORDINATES`], or whose buffer cannot be
/// allocated, are rejected with `InvalidParameter` before any step is drawn.
pub fn simulate<S>(params: WalkParameters, mut source: S) -> Result<Path>
where
    S: StepSource,
{
    params.validate()?;

    let too_large = WalkError::InvalidParameter {
        name: "num_steps",
        value: params.num_steps,
        reason: "walk exceeds the supported number of coordinates",
    };
    let len = params
        .num_steps
        .checked_mul(params.dimensions)
        .filter(|&len| len <= MAX_COORDINATES)
        .ok_or(too_large)?;

    let mut steps = Vec::new();
    steps
        .try_reserve_exact(len)
        .map_err(|_| WalkError::InvalidParameter {
            name: "num_steps",
            value: params.num_steps,
            reason: "path does not fit in memory",
        })?;
    for _ in 0..len {
        steps.push(i64::from(source.next_step()?));
    }

    debug!(
        num_steps = params.num_steps,
        dimensions = params.dimensions,
        "simulated walk"
    );

    Ok(Path::from_steps(params.dimensions, steps))
}

/// A path together with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    pub path: Path,
    pub stats: Stats,
}

/// Simulates a walk and summarises it in one go.
pub fn run<S>(params: WalkParameters, source: S) -> Result<Walk>
where
    S: StepSource,
{
    let path = simulate(params, source)?;
    let stats = calculate_stats(&path)?;
    Ok(Walk { path, stats })
}

/// Owns a step source and remembers the most recent path it produced.
#[derive(Debug)]
pub struct WalkGenerator<S = RngSteps<StdRng>> {
    source: S,
    path: Option<Path>,
}

impl WalkGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngSteps::seeded(seed))
    }
}

impl<S: StepSource> WalkGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source, path: None }
    }

    /// Replaces the stored path with a fresh walk.
    ///
    /// On error the previous path is discarded.
    pub fn simulate(&mut self, num_steps: usize, dimensions: usize) -> Result<&Path> {
        self.path = None;
        let path = simulate(
            WalkParameters::new(num_steps, dimensions),
            &mut self.source,
        )?;
        Ok(&*self.path.insert(path))
    }

    /// Statistics of the most recent walk.
    pub fn calculate_stats(&self) -> Result<Stats> {
        let path = self
            .path
            .as_ref()
            .ok_or(WalkError::InvalidState("no walk has been simulated yet"))?;
        calculate_stats(path)
    }

    pub fn run(&mut self, params: WalkParameters) -> Result<Walk> {
        let path = self.simulate(params.num_steps, params.dimensions)?.clone();
        let stats = calculate_stats(&path)?;
        Ok(Walk { path, stats })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSteps;

    fn script(values: &[i64]) -> ScriptedSteps {
        ScriptedSteps::from_values(values.iter().copied()).unwrap()
    }

    #[test]
    fn one_dimensional_scripted_walk() {
        let walk = run(WalkParameters::new(3, 1), script(&[1, -1, 1])).unwrap();

        assert_eq!(walk.path.as_flat(), &[1, 0, 1]);
        assert_eq!(walk.stats.start_position, vec![1]);
        assert_eq!(walk.stats.final_position, vec![1]);
        assert_eq!(walk.stats.total_distance, 1.0);
    }

    #[test]
    fn two_dimensional_scripted_walk() {
        let walk = run(WalkParameters::new(2, 2), script(&[1, 1, -1, 1])).unwrap();

        assert_eq!(walk.path.iter().collect::<Vec<_>>(), vec![&[1, 1][..], &[0, 2][..]]);
        assert_eq!(walk.stats.start_position, vec![1, 1]);
        assert_eq!(walk.stats.final_position, vec![0, 2]);
        assert_eq!(walk.stats.total_distance, 2.0);
    }

    #[test]
    fn single_step_walk_is_the_step() {
        let path = simulate(WalkParameters::new(1, 3), script(&[-1, 1, -1])).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(&path[0], &[-1, 1, -1]);
    }

    #[test]
    fn rejects_zero_steps_and_zero_dimensions() {
        let err = simulate(WalkParameters::new(0, 2), RngSteps::seeded(1)).unwrap_err();
        assert!(matches!(
            err,
            WalkError::InvalidParameter {
                name: "num_steps",
                value: 0,
                ..
            }
        ));

        let err = simulate(WalkParameters::new(10, 0), RngSteps::seeded(1)).unwrap_err();
        assert!(matches!(
            err,
            WalkError::InvalidParameter {
                name: "dimensions",
                ..
            }
        ));
    }

    #[test]
    fn oversized_walk_is_rejected_before_drawing() {
        let empty = || ScriptedSteps::new(Vec::new());

        let err = simulate(WalkParameters::new(MAX_COORDINATES + 1, 1), empty()).unwrap_err();
        assert!(matches!(
            err,
            WalkError::InvalidParameter {
                name: "num_steps",
                ..
            }
        ));

        let err = simulate(WalkParameters::new(MAX_COORDINATES / 2 + 1, 2), empty()).unwrap_err();
        assert!(matches!(err, WalkError::InvalidParameter { .. }));

        let err = simulate(WalkParameters::new(usize::MAX, 3), empty()).unwrap_err();
        assert!(matches!(err, WalkError::InvalidParameter { .. }));
    }

    #[test]
    fn short_script_is_an_error() {
        let err = simulate(WalkParameters::new(2, 2), script(&[1, 1, 1])).unwrap_err();
        assert_eq!(err, WalkError::ScriptExhausted(3));
    }

    #[test]
    fn stats_before_simulate_is_invalid_state() {
        let generator = WalkGenerator::seeded(3);
        assert!(matches!(
            generator.calculate_stats(),
            Err(WalkError::InvalidState(_))
        ));
    }

    #[test]
    fn generator_keeps_latest_path() {
        let mut generator = WalkGenerator::new(script(&[1, 1, -1, 1, -1, 1, -1]));

        generator.simulate(4, 1).unwrap();
        assert_eq!(generator.calculate_stats().unwrap().final_position, vec![2]);

        generator.simulate(3, 1).unwrap();
        let stats = generator.calculate_stats().unwrap();
        assert_eq!(stats.start_position, vec![-1]);
        assert_eq!(stats.final_position, vec![-1]);
    }

    #[test]
    fn failed_simulate_clears_previous_path() {
        let mut generator = WalkGenerator::seeded(5);
        generator.simulate(10, 2).unwrap();
        assert!(generator.simulate(0, 2).is_err());
        assert!(generator.path().is_none());
        assert!(generator.calculate_stats().is_err());
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let params = WalkParameters::new(500, 3);
        let a = WalkGenerator::seeded(42).run(params).unwrap();
        let b = WalkGenerator::seeded(42).run(params).unwrap();
        assert_eq!(a, b);
    }
}
