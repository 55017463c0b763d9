//! Where the signs of each step come from.
//!
//! Generation never touches process-wide random state: every walk is driven
//! by a [`StepSource`] handed in by the caller. [`RngSteps`] adapts any
//! [`rand::Rng`], and [`ScriptedSteps`] replays a fixed sequence.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::Distribution;

use crate::{Result, WalkError};

/// A signed unit increment along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Back,
    Forward,
}

impl Step {
    #[inline]
    pub fn value(self) -> i64 {
        match self {
            Step::Back => -1,
            Step::Forward => 1,
        }
    }
}

impl TryFrom<i64> for Step {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Step::Back),
            1 => Ok(Step::Forward),
            other => Err(other),
        }
    }
}

impl From<Step> for i64 {
    fn from(step: Step) -> Self {
        step.value()
    }
}

/// Uniform distribution over {-1, +1}.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitStep;

impl Distribution<Step> for UnitStep {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Step {
        if rng.random::<bool>() {
            Step::Forward
        } else {
            Step::Back
        }
    }
}

pub trait StepSource {
    /// Draws the next step. Steps are requested row-major: every axis of
    /// step 0, then every axis of step 1, and so on.
    fn next_step(&mut self) -> Result<Step>;
}

impl<S: StepSource + ?Sized> StepSource for &mut S {
    fn next_step(&mut self) -> Result<Step> {
        (**self).next_step()
    }
}

/// Steps drawn from a random number generator.
#[derive(Debug, Clone)]
pub struct RngSteps<R> {
    rng: R,
}

impl<R: Rng> RngSteps<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSteps<StdRng> {
    /// Reproducible steps: the same seed always yields the same walk.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

/// A fresh seed from the thread-local generator, for callers that want to
/// report the seed of an otherwise unseeded walk.
pub fn random_seed() -> u64 {
    rand::rng().random()
}

impl<R: Rng> StepSource for RngSteps<R> {
    #[inline]
    fn next_step(&mut self) -> Result<Step> {
        Ok(UnitStep.sample(&mut self.rng))
    }
}

/// Replays a fixed sequence of steps, e.g. one recorded from an earlier
/// walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedSteps {
    steps: Vec<Step>,
    cursor: usize,
}

impl ScriptedSteps {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps, cursor: 0 }
    }

    /// Builds a script from raw increments, rejecting anything but ±1.
    pub fn from_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let steps = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                Step::try_from(value).map_err(|value| WalkError::InvalidStep { index, value })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(steps))
    }

    pub fn remaining(&self) -> usize {
        self.steps.len() - self.cursor
    }
}

impl StepSource for ScriptedSteps {
    fn next_step(&mut self) -> Result<Step> {
        let step = self
            .steps
            .get(self.cursor)
            .copied()
            .ok_or(WalkError::ScriptExhausted(self.cursor))?;
        self.cursor += 1;
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_step_only_yields_unit_values() {
        let mut source = RngSteps::seeded(7);
        let mut seen = [false; 2];
        for _ in 0..256 {
            match source.next_step().unwrap() {
                Step::Back => seen[0] = true,
                Step::Forward => seen[1] = true,
            }
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn scripted_rejects_non_unit_values() {
        let err = ScriptedSteps::from_values([1, -1, 2]).unwrap_err();
        assert_eq!(err, WalkError::InvalidStep { index: 2, value: 2 });
    }

    #[test]
    fn scripted_reports_exhaustion() {
        let mut script = ScriptedSteps::from_values([1, -1]).unwrap();
        assert_eq!(script.next_step(), Ok(Step::Forward));
        assert_eq!(script.next_step(), Ok(Step::Back));
        assert_eq!(script.remaining(), 0);
        assert_eq!(script.next_step(), Err(WalkError::ScriptExhausted(2)));
    }

    #[test]
    fn seeded_sources_agree() {
        let mut a = RngSteps::seeded(99);
        let mut b = RngSteps::seeded(99);
        for _ in 0..64 {
            assert_eq!(a.next_step(), b.next_step());
        }
    }
}
