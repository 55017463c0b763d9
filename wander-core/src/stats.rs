use crate::{Path, Result, WalkError};

/// Summary of a finished walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub start_position: Vec<i64>,
    pub final_position: Vec<i64>,
    /// Net displacement: the Euclidean norm of `final_position`, not the
    /// length of the path travelled.
    pub total_distance: f64,
}

pub fn calculate_stats(path: &Path) -> Result<Stats> {
    let (Some(start), Some(end)) = (path.first(), path.last()) else {
        return Err(WalkError::InvalidState("cannot summarise an empty path"));
    };

    Ok(Stats {
        start_position: start.to_vec(),
        final_position: end.to_vec(),
        total_distance: euclidean_norm(end),
    })
}

pub fn euclidean_norm(position: &[i64]) -> f64 {
    position
        .iter()
        .map(|&c| {
            let c = c as f64;
            c * c
        })
        .sum::<f64>()
        .sqrt()
}
