use std::ops::{Add, AddAssign};

/// Window size and how a walk is drawn into it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    /// Logical window size.
    pub size: (f64, f64),
    pub padding: Padding,
    /// Fraction of the walk's extent left empty on each side.
    pub data_margin: f64,
    /// Stroke width of the path, in logical pixels.
    pub path_width: f64,
    /// Radius of the start and end markers, in logical pixels.
    pub marker_radius: f64,
    /// Overrides the view fitted to the walk.
    pub initial_bounds: Option<Bounds>,
    /// Panning and zooming never leave these bounds.
    pub interaction_bounds: Bounds,
}

impl PlotLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(self, width: f64, height: f64) -> Self {
        Self {
            size: (width, height),
            ..self
        }
    }

    pub fn with_padding(self, padding: Padding) -> Self {
        Self { padding, ..self }
    }

    pub fn with_data_margin(self, data_margin: f64) -> Self {
        Self {
            data_margin,
            ..self
        }
    }

    pub fn with_path_width(self, path_width: f64) -> Self {
        Self { path_width, ..self }
    }

    pub fn with_marker_radius(self, marker_radius: f64) -> Self {
        Self {
            marker_radius,
            ..self
        }
    }

    pub fn with_initial_bounds(self, bounds: Bounds) -> Self {
        Self {
            initial_bounds: Some(bounds),
            ..self
        }
    }

    pub fn with_interaction_bounds(self, interaction_bounds: Bounds) -> Self {
        Self {
            interaction_bounds,
            ..self
        }
    }

    /// Fixes the layout to a window showing `walk_bounds`, unless explicit
    /// initial bounds were given.
    pub(crate) fn instantiate(&self, scale_factor: f64, walk_bounds: Option<Bounds>) -> Viewport {
        let data_bounds = self
            .initial_bounds
            .or(walk_bounds)
            .unwrap_or(Bounds::UNIT);

        Viewport {
            logical_width: self.size.0,
            logical_height: self.size.1,
            padding: self.padding,
            data_bounds,
            interaction_bounds: self.interaction_bounds,
            scale_factor,
        }
    }
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            size: (800.0, 600.0),
            padding: Padding {
                top: 20.0,
                bottom: 20.0,
                left: 50.0,
                right: 20.0,
            },
            data_margin: 0.05,
            path_width: 1.0,
            marker_radius: 4.0,
            initial_bounds: None,
            interaction_bounds: Bounds::INFINITY,
        }
    }
}

/// Smallest and largest scale applied by a single zoom step.
const ZOOM_LIMITS: (f64, f64) = (0.1, 10.0);

/// The part of data space currently on screen, and how it maps to pixels.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Viewport {
    pub(crate) logical_width: f64,
    pub(crate) logical_height: f64,
    pub(crate) padding: Padding,

    pub(crate) data_bounds: Bounds,
    pub(crate) interaction_bounds: Bounds,

    pub(crate) scale_factor: f64,
}

impl Viewport {
    fn is_on_inner(&self, mouse_position: (f64, f64)) -> bool {
        let (mut x, mut y) = mouse_position;
        x /= self.scale_factor;
        y /= self.scale_factor;

        x >= self.padding.left
            && x <= self.logical_width - self.padding.right
            && y >= self.padding.top
            && y <= self.logical_height - self.padding.bottom
    }

    pub(crate) fn inner_width(&self) -> f64 {
        self.logical_width - self.padding.left - self.padding.right
    }

    pub(crate) fn inner_height(&self) -> f64 {
        self.logical_height - self.padding.top - self.padding.bottom
    }

    /// Physical pixel coordinates of a data point. The y axis points up.
    pub(crate) fn to_physical(&self, data: (f64, f64)) -> (f64, f64) {
        let x = self.padding.left
            + (data.0 - self.data_bounds.x.min) / self.data_bounds.x.size() * self.inner_width();
        let y = self.logical_height
            - self.padding.bottom
            - (data.1 - self.data_bounds.y.min) / self.data_bounds.y.size() * self.inner_height();

        (x * self.scale_factor, y * self.scale_factor)
    }

    fn convert_to_data_position(&self, mouse_position: (f64, f64)) -> Option<(f64, f64)> {
        let logical_position = (
            mouse_position.0 / self.scale_factor,
            self.logical_height - mouse_position.1 / self.scale_factor,
        );
        let logical_plot_position = (
            logical_position.0 - self.padding.left,
            logical_position.1 - self.padding.bottom,
        );
        let percentage_plot_position = (
            logical_plot_position.0 / self.inner_width(),
            logical_plot_position.1 / self.inner_height(),
        );

        if (0.0..=1.0).contains(&percentage_plot_position.0)
            && (0.0..=1.0).contains(&percentage_plot_position.1)
        {
            Some((
                self.data_bounds.x.min + percentage_plot_position.0 * self.data_bounds.x.size(),
                self.data_bounds.y.min + percentage_plot_position.1 * self.data_bounds.y.size(),
            ))
        } else {
            None
        }
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.logical_width = width as f64 / self.scale_factor;
        self.logical_height = height as f64 / self.scale_factor;
    }

    /// Pans so the data under the cursor follows it from `pre_position` to
    /// `current_position`.
    pub(crate) fn drag(
        &mut self,
        start_drag_mouse_position: (f64, f64),
        pre_position: (f64, f64),
        current_position: (f64, f64),
    ) {
        if !self.is_on_inner(start_drag_mouse_position)
            || !self.is_on_inner(pre_position)
            || !self.is_on_inner(current_position)
        {
            return;
        }

        let change = (
            current_position.0 - pre_position.0,
            current_position.1 - pre_position.1,
        );

        let data_x =
            change.0 * self.data_bounds.x.size() / (self.scale_factor * self.inner_width());
        let data_y =
            change.1 * self.data_bounds.y.size() / (self.scale_factor * self.inner_height());

        // screen y grows downwards
        self.data_bounds.x += -data_x;
        self.data_bounds.y += data_y;

        self.data_bounds = self.interaction_bounds.bound(self.data_bounds);
    }

    /// Scales the view around the data point under the cursor. A factor
    /// above one zooms out. Factors are clamped to `ZOOM_LIMITS`, and a NaN
    /// factor is ignored.
    pub(crate) fn zoom(&mut self, mouse_position: (f64, f64), factor: f64) {
        if factor.is_nan() {
            return;
        }
        let factor = factor.clamp(ZOOM_LIMITS.0, ZOOM_LIMITS.1);

        if let Some(data_position) = self.convert_to_data_position(mouse_position) {
            self.data_bounds = Bounds {
                x: Interval {
                    min: data_position.0 - (data_position.0 - self.data_bounds.x.min) * factor,
                    max: data_position.0 + (self.data_bounds.x.max - data_position.0) * factor,
                },
                y: Interval {
                    min: data_position.1 - (data_position.1 - self.data_bounds.y.min) * factor,
                    max: data_position.1 + (self.data_bounds.y.max - data_position.1) * factor,
                },
            };

            self.data_bounds = self.interaction_bounds.bound(self.data_bounds);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: Interval,
    pub y: Interval,
}

impl Bounds {
    pub const UNIT: Self = Self {
        x: Interval::UNIT,
        y: Interval::UNIT,
    };

    pub const INFINITY: Self = Self {
        x: Interval::INFINITY,
        y: Interval::INFINITY,
    };

    /// Smallest bounds holding every point, widened by `margin` of each
    /// side's extent. `None` when there are no points.
    pub fn enclosing<I>(points: I, margin: f64) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut points = points.into_iter();
        let (x0, y0) = points.next()?;
        let mut x = Interval { min: x0, max: x0 };
        let mut y = Interval { min: y0, max: y0 };
        for (px, py) in points {
            x = x.including(px);
            y = y.including(py);
        }

        Some(Self {
            x: x.widen(margin),
            y: y.widen(margin),
        })
    }

    #[inline]
    pub fn bound(self, other: Self) -> Self {
        Self {
            x: self.x.bound(other.x),
            y: self.y.bound(other.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    pub const INFINITY: Self = Self {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    #[inline]
    pub fn size(self) -> f64 {
        self.max - self.min
    }

    #[inline]
    fn including(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Grows both ends by `fraction` of the size. A single point becomes a
    /// unit interval centred on it so it never maps to zero pixels.
    fn widen(self, fraction: f64) -> Self {
        if self.size() == 0.0 {
            return Self {
                min: self.min - 0.5,
                max: self.max + 0.5,
            };
        }
        let pad = self.size() * fraction;
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Shifts `other` to lie inside `self`, keeping its size. Falls back to
    /// `self` if `other` is larger.
    #[inline]
    pub fn bound(self, other: Self) -> Self {
        if other.size() > self.size() {
            self
        } else if other.min < self.min {
            let shift = self.min - other.min;
            Self {
                min: self.min,
                max: other.max + shift,
            }
        } else if other.max > self.max {
            let shift = other.max - self.max;
            Self {
                min: other.min - shift,
                max: self.max,
            }
        } else {
            other
        }
    }
}

impl Add<f64> for Interval {
    type Output = Interval;

    fn add(self, other: f64) -> Self::Output {
        Interval {
            min: self.min + other,
            max: self.max + other,
        }
    }
}

impl AddAssign<f64> for Interval {
    fn add_assign(&mut self, other: f64) {
        *self = *self + other;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        PlotLayout::new()
            .with_size(100.0, 100.0)
            .with_padding(Padding {
                top: 0.0,
                bottom: 0.0,
                left: 0.0,
                right: 0.0,
            })
            .instantiate(
                1.0,
                Some(Bounds {
                    x: Interval { min: 0.0, max: 10.0 },
                    y: Interval { min: 0.0, max: 10.0 },
                }),
            )
    }

    #[test]
    fn bound_shifts_without_resizing() {
        let outer = Interval { min: 0.0, max: 10.0 };
        assert_eq!(
            outer.bound(Interval { min: -2.0, max: 3.0 }),
            Interval { min: 0.0, max: 5.0 }
        );
        assert_eq!(
            outer.bound(Interval { min: 8.0, max: 12.0 }),
            Interval { min: 6.0, max: 10.0 }
        );
        assert_eq!(outer.bound(Interval { min: -5.0, max: 20.0 }), outer);
        assert_eq!(
            Interval::INFINITY.bound(Interval { min: 1.0, max: 2.0 }),
            Interval { min: 1.0, max: 2.0 }
        );
    }

    #[test]
    fn enclosing_adds_margin_and_handles_single_point() {
        let bounds = Bounds::enclosing([(0.0, 0.0), (10.0, -4.0)], 0.1).unwrap();
        assert_eq!(bounds.x, Interval { min: -1.0, max: 11.0 });
        assert!((bounds.y.min - -4.4).abs() < 1e-12);
        assert!((bounds.y.max - 0.4).abs() < 1e-12);

        let point = Bounds::enclosing([(3.0, 3.0)], 0.1).unwrap();
        assert_eq!(point.x, Interval { min: 2.5, max: 3.5 });

        assert_eq!(Bounds::enclosing(std::iter::empty(), 0.1), None);
    }

    #[test]
    fn explicit_initial_bounds_win() {
        let layout = PlotLayout::new().with_initial_bounds(Bounds::UNIT);
        let viewport = layout.instantiate(2.0, Some(Bounds::INFINITY));
        assert_eq!(viewport.data_bounds, Bounds::UNIT);
        assert_eq!(viewport.scale_factor, 2.0);
    }

    #[test]
    fn maps_corners_to_pixels() {
        let viewport = viewport();
        assert_eq!(viewport.to_physical((0.0, 0.0)), (0.0, 100.0));
        assert_eq!(viewport.to_physical((10.0, 10.0)), (100.0, 0.0));
        assert_eq!(viewport.to_physical((5.0, 5.0)), (50.0, 50.0));
    }

    #[test]
    fn zoom_keeps_cursor_point_fixed() {
        let mut viewport = viewport();
        viewport.zoom((50.0, 50.0), 0.5);
        assert_eq!(viewport.data_bounds.x, Interval { min: 2.5, max: 7.5 });
        assert_eq!(viewport.data_bounds.y, Interval { min: 2.5, max: 7.5 });
    }

    #[test]
    fn oversized_wheel_delta_cannot_invert_bounds() {
        let mut viewport = viewport();
        viewport.zoom((50.0, 50.0), 1.0 - 4000.0 / 500.0);
        assert_eq!(viewport.data_bounds.x, Interval { min: 4.5, max: 5.5 });
        assert!(viewport.data_bounds.y.size() > 0.0);

        viewport.zoom((50.0, 50.0), f64::NAN);
        assert_eq!(viewport.data_bounds.x, Interval { min: 4.5, max: 5.5 });

        viewport.zoom((50.0, 50.0), 1e9);
        assert_eq!(viewport.data_bounds.x, Interval { min: 0.0, max: 10.0 });
    }

    #[test]
    fn zoom_outside_plot_is_ignored() {
        let mut viewport = viewport();
        viewport.zoom((150.0, 50.0), 0.5);
        assert_eq!(viewport.data_bounds.x, Interval { min: 0.0, max: 10.0 });
    }

    #[test]
    fn drag_follows_cursor() {
        let mut viewport = viewport();
        viewport.drag((50.0, 50.0), (50.0, 50.0), (60.0, 40.0));
        assert_eq!(viewport.data_bounds.x, Interval { min: -1.0, max: 9.0 });
        assert_eq!(viewport.data_bounds.y, Interval { min: -1.0, max: 9.0 });
    }

    #[test]
    fn drag_respects_interaction_bounds() {
        let mut viewport = viewport();
        viewport.interaction_bounds = Bounds {
            x: Interval { min: 0.0, max: 10.0 },
            y: Interval { min: 0.0, max: 10.0 },
        };
        viewport.drag((50.0, 50.0), (50.0, 50.0), (60.0, 40.0));
        assert_eq!(viewport.data_bounds.x, Interval { min: 0.0, max: 10.0 });
    }

    #[test]
    fn resize_uses_logical_pixels() {
        let mut viewport = viewport();
        viewport.scale_factor = 2.0;
        viewport.resize(400, 300);
        assert_eq!(viewport.logical_width, 200.0);
        assert_eq!(viewport.logical_height, 150.0);
    }
}
