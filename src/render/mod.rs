//! Drawing a painting onto a 2D surface.
//!
//! Nodes become small circular markers in their own color. Every distinct
//! edge becomes a wave path (see [`wave`]) stroked with a gradient running
//! from the source node's color to the destination's.

pub mod recording;
pub mod svg;
pub mod wave;

use crate::error::{PaintError, PaintResult};
use crate::painting::{EdgeProperties, Node, Painting};
use serde::Serialize;
use tracing::debug;

pub use wave::{wave_info, wave_path, wave_segments, WaveInfo, WaveSegment, WaveShape};

/// Radius of the node markers, in logical units.
pub const NODE_RADIUS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<&Node> for Point {
    fn from(node: &Node) -> Self {
        Point::new(node.x, node.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
}

/// A sequence of line and quadratic-curve segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

/// Two-stop linear gradient, in the coordinates of the current transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearGradient {
    pub from: Point,
    pub to: Point,
    pub start_color: String,
    pub end_color: String,
}

/// Immediate-mode 2D drawing context.
pub trait Surface {
    fn clear(&mut self, region: Rect);

    fn stroke_circle(&mut self, center: Point, radius: f64, color: &str);

    fn stroke_path(&mut self, path: &Path, gradient: &LinearGradient);

    /// Translate then rotate (radians) everything drawn until the matching pop.
    fn push_transform(&mut self, translate: Point, rotate: f64);

    fn pop_transform(&mut self);
}

/// Something that may provide a [`Surface`], sized in logical units.
pub trait Canvas {
    fn width(&self) -> f64;

    fn height(&self) -> f64;

    fn context_2d(&mut self) -> Option<&mut dyn Surface>;
}

/// A canvas known to have a drawing context.
pub struct ArtTarget<C: Canvas> {
    canvas: C,
}

impl<C: Canvas> ArtTarget<C> {
    /// Fails with [`PaintError::MissingDrawingContext`] when the canvas has
    /// no 2D context.
    pub fn new(mut canvas: C) -> PaintResult<Self> {
        if canvas.context_2d().is_none() {
            return Err(PaintError::MissingDrawingContext);
        }
        Ok(Self { canvas })
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Clear the surface and draw `painting` onto it.
    pub fn display(&mut self, painting: &Painting) -> PaintResult<()> {
        let region = Rect::new(0.0, 0.0, self.canvas.width(), self.canvas.height());
        let ctx = self
            .canvas
            .context_2d()
            .ok_or(PaintError::MissingDrawingContext)?;

        ctx.clear(region);
        for node in painting.nodes() {
            ctx.stroke_circle(node.into(), NODE_RADIUS, &node.color);
        }

        let distinct = painting.compute_distinct_edges();
        let mut stroked = 0usize;
        for (src, dst, props) in distinct.entries() {
            let (Some(n1), Some(n2)) = (painting.node(src), painting.node(dst)) else {
                continue;
            };
            if draw_edge(ctx, n1, n2, props) {
                stroked += 1;
            }
        }

        debug!(
            nodes = painting.nodes().len(),
            distinct_edges = distinct.len(),
            stroked,
            "displayed painting"
        );
        Ok(())
    }
}

/// Stroke one edge as a wave. Returns false for zero-length edges.
fn draw_edge(ctx: &mut dyn Surface, n1: &Node, n2: &Node, props: EdgeProperties) -> bool {
    let shape = WaveShape::from_wave_factor(props.wave_factor);
    let p1 = Point::from(n1);
    let info = wave_info(p1, Point::from(n2), shape.num_waves);
    let segments = wave_segments(&info, &shape);
    if segments.is_empty() {
        return false;
    }

    let gradient = LinearGradient {
        from: Point::ORIGIN,
        to: Point::new(info.target, 0.0),
        start_color: n1.color.clone(),
        end_color: n2.color.clone(),
    };
    ctx.push_transform(p1, info.theta);
    ctx.stroke_path(&wave_path(&segments), &gradient);
    ctx.pop_transform();
    true
}
