//! A canvas that records draw calls instead of rasterizing them.

use super::{Canvas, LinearGradient, Path, Point, Rect, Surface};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear(Rect),
    StrokeCircle {
        center: Point,
        radius: f64,
        color: String,
    },
    StrokePath {
        path: Path,
        gradient: LinearGradient,
    },
    PushTransform {
        translate: Point,
        rotate: f64,
    },
    PopTransform,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, region: Rect) {
        self.commands.push(DrawCommand::Clear(region));
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn stroke_path(&mut self, path: &Path, gradient: &LinearGradient) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            gradient: gradient.clone(),
        });
    }

    fn push_transform(&mut self, translate: Point, rotate: f64) {
        self.commands.push(DrawCommand::PushTransform { translate, rotate });
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
    }
}

#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    surface: Option<RecordingSurface>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            surface: Some(RecordingSurface::default()),
        }
    }

    /// A canvas that cannot hand out a drawing context.
    pub fn without_context(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            surface: None,
        }
    }

    /// Every command recorded so far, across all frames.
    pub fn commands(&self) -> &[DrawCommand] {
        self.surface
            .as_ref()
            .map(|s| s.commands())
            .unwrap_or_default()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn context_2d(&mut self) -> Option<&mut dyn Surface> {
        self.surface.as_mut().map(|s| s as &mut dyn Surface)
    }
}
