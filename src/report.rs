use std::fmt;

use itertools::Itertools;
use wander_core::Stats;

/// Human-readable summary of a walk, one statistic per line.
pub struct StatsReport<'a>(pub &'a Stats);

impl fmt::Display for StatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        writeln!(
            f,
            "Start position: [{}]",
            stats.start_position.iter().join(", ")
        )?;
        writeln!(
            f,
            "Final position: [{}]",
            stats.final_position.iter().join(", ")
        )?;
        write!(f, "Total distance: {:.2}", stats.total_distance)
    }
}
