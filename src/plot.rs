use itertools::zip_eq;
use vello::{
    Scene,
    kurbo::{self, Affine, Cap, PathEl},
    peniko::{
        self, Color, Mix,
        color::{AlphaColor, Srgb},
    },
};
use wander_core::Path;

use crate::{Bounds, PlotError, PlotLayout, Projection, layout::Viewport, project};

const PATH_COLOR: Color = Color::from_rgb8(31, 119, 180);
const START_COLOR: Color = Color::from_rgb8(44, 160, 44);
const END_COLOR: Color = Color::from_rgb8(214, 39, 40);

const TICKS: usize = 10;
const TICK_LENGTH: f64 = 5.;
const AXIS_WIDTH: f64 = 1.5;

pub struct Plot {
    pub title: String,
    pub axes_caption: String,
    pub layout: PlotLayout,
    pub padding_layers: Vec<PaddingLayer>,
    pub data_layers: Vec<DataLayer>,
}

impl Plot {
    /// A plot of the walk's projection with its start and end marked.
    pub fn from_walk(path: &Path, layout: PlotLayout) -> Result<Self, PlotError> {
        let projection = project(path)?;
        Ok(Self::from_projection(projection, layout))
    }

    pub fn from_projection(projection: Projection, layout: PlotLayout) -> Self {
        let axes_caption = projection.axes_caption();
        let last = projection.len().saturating_sub(1);
        let markers = [(0, START_COLOR), (last, END_COLOR)]
            .into_iter()
            .filter(|&(i, _)| i < projection.len())
            .collect::<Vec<_>>();
        let scatter = DataLayer::Scatter {
            xs: markers.iter().map(|&(i, _)| projection.xs[i]).collect(),
            ys: markers.iter().map(|&(i, _)| projection.ys[i]).collect(),
            color: markers.iter().map(|&(_, color)| color).collect(),
            size: vec![layout.marker_radius; markers.len()],
        };
        let line = DataLayer::Line {
            xs: projection.xs,
            ys: projection.ys,
            color: PATH_COLOR,
            width: layout.path_width,
        };

        Self {
            axes_caption,
            title: projection.title,
            layout,
            padding_layers: vec![PaddingLayer::XAxis, PaddingLayer::YAxis],
            data_layers: vec![line, scatter],
        }
    }

    /// Title for the window: the plot title and which axes are shown.
    pub fn window_title(&self) -> String {
        format!("{} ({})", self.title, self.axes_caption)
    }

    /// Bounds enclosing every data layer, with a margin.
    pub fn data_bounds(&self) -> Option<Bounds> {
        let points = self.data_layers.iter().flat_map(|layer| {
            let (xs, ys) = match layer {
                DataLayer::Line { xs, ys, .. } | DataLayer::Scatter { xs, ys, .. } => (xs, ys),
            };
            zip_eq(xs.iter().copied(), ys.iter().copied())
        });
        Bounds::enclosing(points, self.layout.data_margin)
    }

    pub(crate) fn render(&self, viewport: &Viewport) -> Scene {
        let mut scene = Scene::new();
        let scale_factor = viewport.scale_factor;

        let rect = kurbo::Rect {
            x0: scale_factor * viewport.padding.left,
            y0: scale_factor * viewport.padding.top,
            x1: scale_factor * (viewport.logical_width - viewport.padding.right),
            y1: scale_factor * (viewport.logical_height - viewport.padding.bottom),
        };
        scene.push_layer(Mix::Clip, 1.0, Affine::IDENTITY, &rect);

        for layer in &self.data_layers {
            match layer {
                DataLayer::Scatter {
                    xs,
                    ys,
                    color,
                    size,
                } => {
                    draw_scatter(
                        viewport,
                        xs.iter().cloned(),
                        ys.iter().cloned(),
                        color.iter().cloned(),
                        size.iter().cloned(),
                        &mut scene,
                    );
                }
                DataLayer::Line {
                    xs,
                    ys,
                    color,
                    width,
                } => {
                    draw_line(
                        viewport,
                        xs.iter().cloned(),
                        ys.iter().cloned(),
                        *color,
                        *width,
                        &mut scene,
                    );
                }
            }
        }

        scene.pop_layer();

        for layer in &self.padding_layers {
            match layer {
                PaddingLayer::XAxis => draw_x_axis(viewport, &mut scene),
                PaddingLayer::YAxis => draw_y_axis(viewport, &mut scene),
            }
        }

        scene
    }
}

fn stroke_segment(scene: &mut Scene, from: (f64, f64), to: (f64, f64), width: f64) {
    let path = [PathEl::MoveTo(from.into()), PathEl::LineTo(to.into())];
    let style = kurbo::Stroke::new(width).with_caps(Cap::Square);
    scene.stroke(
        &style,
        Affine::IDENTITY,
        peniko::BrushRef::Solid(AlphaColor::BLACK),
        None,
        &path.as_slice(),
    );
}

fn draw_x_axis(viewport: &Viewport, scene: &mut Scene) {
    let s = viewport.scale_factor;
    let y = s * (viewport.logical_height - viewport.padding.bottom);
    let x0 = s * viewport.padding.left;
    let x1 = s * (viewport.logical_width - viewport.padding.right);

    stroke_segment(scene, (x0, y), (x1, y), s * AXIS_WIDTH);

    for i in 1..TICKS {
        let x = x0 + i as f64 * (x1 - x0) / TICKS as f64;
        stroke_segment(scene, (x, y), (x, y + s * TICK_LENGTH), s * AXIS_WIDTH);
    }
}

fn draw_y_axis(viewport: &Viewport, scene: &mut Scene) {
    let s = viewport.scale_factor;
    let x = s * viewport.padding.left;
    let y0 = s * (viewport.logical_height - viewport.padding.bottom);
    let y1 = s * viewport.padding.top;

    stroke_segment(scene, (x, y0), (x, y1), s * AXIS_WIDTH);

    for i in 1..TICKS {
        let y = y0 - i as f64 * (y0 - y1) / TICKS as f64;
        stroke_segment(scene, (x - s * TICK_LENGTH, y), (x, y), s * AXIS_WIDTH);
    }
}

fn draw_scatter<I, J, K, L>(
    viewport: &Viewport,
    x: I,
    y: J,
    color: K,
    size: L,
    scene: &mut Scene,
) where
    I: Iterator<Item = f64>,
    J: Iterator<Item = f64>,
    K: Iterator<Item = AlphaColor<Srgb>>,
    L: Iterator<Item = f64>,
{
    zip_eq(zip_eq(zip_eq(x, y), color), size).for_each(|(((xi, yi), colour), size)| {
        let centre = viewport.to_physical((xi, yi));

        scene.fill(
            peniko::Fill::NonZero,
            Affine::IDENTITY,
            peniko::BrushRef::Solid(colour),
            None,
            &kurbo::Circle::new(centre, viewport.scale_factor * size),
        );
    });
}

fn draw_line<I, J>(
    viewport: &Viewport,
    x: I,
    y: J,
    colour: AlphaColor<Srgb>,
    width: f64,
    scene: &mut Scene,
) where
    I: Iterator<Item = f64>,
    J: Iterator<Item = f64>,
{
    let path = zip_eq(x, y)
        .map(|point| viewport.to_physical(point))
        .enumerate()
        .map(|(i, point)| {
            if i == 0 {
                PathEl::MoveTo(point.into())
            } else {
                PathEl::LineTo(point.into())
            }
        })
        // TODO: upstream impl Shape for Iterator<Item = PathEl>
        .collect::<Vec<_>>();

    let style = kurbo::Stroke::new(viewport.scale_factor * width);
    scene.stroke(
        &style,
        Affine::IDENTITY,
        peniko::BrushRef::Solid(colour),
        None,
        &path.as_slice(),
    );
}

pub enum PaddingLayer {
    XAxis,
    YAxis,
}

pub enum DataLayer {
    Line {
        xs: Vec<f64>,
        ys: Vec<f64>,
        color: AlphaColor<Srgb>,
        width: f64,
    },
    Scatter {
        xs: Vec<f64>,
        ys: Vec<f64>,
        color: Vec<AlphaColor<Srgb>>,
        size: Vec<f64>,
    },
}

#[cfg(test)]
mod tests {
    use wander_core::{ScriptedSteps, WalkParameters, simulate};

    use super::*;
    use crate::Interval;

    fn plot(steps: &[i64], dimensions: usize) -> Plot {
        let script = ScriptedSteps::from_values(steps.iter().copied()).unwrap();
        let path = simulate(
            WalkParameters::new(steps.len() / dimensions, dimensions),
            script,
        )
        .unwrap();
        Plot::from_walk(&path, PlotLayout::new()).unwrap()
    }

    #[test]
    fn marks_start_and_end() {
        let plot = plot(&[1, 1, -1, 1, -1, 1], 2);
        assert_eq!(plot.title, "Random walk in 2D");
        assert_eq!(
            plot.window_title(),
            "Random walk in 2D (X coordinate vs Y coordinate)"
        );

        let Some(DataLayer::Scatter { xs, ys, color, .. }) = plot.data_layers.get(1) else {
            panic!("expected start/end markers");
        };
        assert_eq!(xs, &vec![1.0, -1.0]);
        assert_eq!(ys, &vec![1.0, 3.0]);
        assert_eq!(color, &vec![START_COLOR, END_COLOR]);
    }

    #[test]
    fn data_bounds_cover_the_walk() {
        let plot = plot(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 1], 1);
        let bounds = plot.data_bounds().unwrap();
        assert!((bounds.x.min - -0.45).abs() < 1e-12);
        assert!((bounds.x.max - 9.45).abs() < 1e-12);
        assert!(bounds.y.min < 1.0 && bounds.y.max > 10.0);
    }

    #[test]
    fn layout_controls_margin_and_marker_size() {
        let script = ScriptedSteps::from_values([1, 1, 1, -1]).unwrap();
        let path = simulate(WalkParameters::new(2, 2), script).unwrap();
        let layout = PlotLayout::new()
            .with_data_margin(0.0)
            .with_marker_radius(6.0)
            .with_path_width(2.0);
        let plot = Plot::from_walk(&path, layout).unwrap();

        let bounds = plot.data_bounds().unwrap();
        assert_eq!(bounds.x, Interval { min: 1.0, max: 2.0 });
        assert_eq!(bounds.y, Interval { min: 0.0, max: 1.0 });

        let Some(DataLayer::Line { width, .. }) = plot.data_layers.first() else {
            panic!("expected the path line first");
        };
        assert_eq!(*width, 2.0);
        let Some(DataLayer::Scatter { size, .. }) = plot.data_layers.get(1) else {
            panic!("expected start/end markers");
        };
        assert_eq!(size, &vec![6.0, 6.0]);
    }

    #[test]
    fn single_step_walk_gets_nonempty_bounds() {
        let plot = plot(&[-1], 1);
        let bounds = plot.data_bounds().unwrap();
        assert_eq!(bounds.x, Interval { min: -0.5, max: 0.5 });
        assert_eq!(bounds.y, Interval { min: -1.5, max: -0.5 });
    }
}
