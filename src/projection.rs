//! Flattening walks onto the plot plane.

use std::f64::consts::FRAC_1_SQRT_2;

use wander_core::Path;

use crate::PlotError;

/// Depth axis scale of the cabinet projection.
const DEPTH_SCALE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub depth_label: Option<&'static str>,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Which axes the plane shows, e.g. `Step vs Position`.
    pub fn axes_caption(&self) -> String {
        match self.depth_label {
            Some(depth) => format!(
                "{}, {}, {depth} in oblique view",
                self.x_label, self.y_label
            ),
            None => format!("{} vs {}", self.x_label, self.y_label),
        }
    }
}

/// 1D walks are drawn as position over step number, 2D walks directly, and
/// 3D walks through a cabinet projection with the depth axis at 45°.
pub fn project(path: &Path) -> Result<Projection, PlotError> {
    if path.is_empty() {
        return Err(PlotError::EmptyPath);
    }

    let dimensions = path.dimensions();
    let title = format!("Random walk in {dimensions}D");

    let projection = match dimensions {
        1 => Projection {
            title,
            x_label: "Step",
            y_label: "Position",
            depth_label: None,
            xs: (0..path.len()).map(|i| i as f64).collect(),
            ys: path.axis(0).map(|p| p as f64).collect(),
        },
        2 => Projection {
            title,
            x_label: "X coordinate",
            y_label: "Y coordinate",
            depth_label: None,
            xs: path.axis(0).map(|p| p as f64).collect(),
            ys: path.axis(1).map(|p| p as f64).collect(),
        },
        3 => {
            let (xs, ys) = path
                .iter()
                .map(|position| cabinet(position[0], position[1], position[2]))
                .unzip();
            Projection {
                title,
                x_label: "X",
                y_label: "Y",
                depth_label: Some("Z"),
                xs,
                ys,
            }
        }
        other => return Err(PlotError::UnsupportedDimensions(other)),
    };

    Ok(projection)
}

fn cabinet(x: i64, y: i64, z: i64) -> (f64, f64) {
    let depth = DEPTH_SCALE * z as f64 * FRAC_1_SQRT_2;
    (x as f64 + depth, y as f64 + depth)
}
