//! Wave geometry for a single edge.
//!
//! An edge is drawn in a frame translated to its first endpoint and rotated
//! by the edge angle, so every segment lies on the local x-axis between 0
//! and the edge length. The wave factor sets both the amplitude and the
//! number of alternating up/down quadratic segments.

use super::{Path, PathSegment, Point};

/// Amplitude multiplier applied to the wave factor.
pub const WAVE_HEIGHT_SCALE: f64 = 50.0;

/// Segment-count multiplier applied to the wave factor.
pub const WAVE_COUNT_SCALE: f64 = 20.0;

/// Segment count of a wave factor of 1; larger factors are capped here.
pub const MAX_WAVES: usize = WAVE_COUNT_SCALE as usize + 1;

/// Orientation and stepping of an edge in its local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveInfo {
    /// Absolute edge angle, `atan2(dy, dx)`.
    pub theta: f64,
    /// Local x-distance covered by one full segment.
    pub step: f64,
    /// Edge length; the walk ends exactly here.
    pub target: f64,
}

pub fn wave_info(p1: Point, p2: Point, num_waves: usize) -> WaveInfo {
    let theta = (p2.y - p1.y).atan2(p2.x - p1.x);
    let dist = p1.distance(p2);
    WaveInfo {
        theta,
        step: dist / num_waves.max(1) as f64,
        target: dist,
    }
}

/// Amplitude and segment count derived from a wave factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveShape {
    pub wave_height: f64,
    pub num_waves: usize,
}

impl WaveShape {
    /// `wave_height = wf * 50`, `num_waves = floor(wf * 20) + 1`.
    ///
    /// A flat edge (`wf = 0`) still gets one segment, with zero amplitude.
    /// The count never exceeds [`MAX_WAVES`].
    pub fn from_wave_factor(wave_factor: f64) -> Self {
        // negative and NaN factors saturate to zero extra waves
        let extra = (wave_factor * WAVE_COUNT_SCALE).floor().max(0.0) as usize;
        Self {
            wave_height: wave_factor * WAVE_HEIGHT_SCALE,
            num_waves: extra.saturating_add(1).min(MAX_WAVES),
        }
    }
}

/// One quadratic segment along the local x-axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSegment {
    pub start: f64,
    pub control: Point,
    pub end: f64,
}

impl WaveSegment {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// Walk the edge and emit its segments.
///
/// The running position is clipped to `target` on the segment that crosses
/// it (or on the last segment, absorbing rounding), and the walk stops there.
/// Even segments bend toward negative y, odd ones toward positive y. Jumping
/// the index to the end of the walk is parity-corrected, so the clipped tail
/// keeps the sign its own index gives it. Zero-length edges yield nothing.
pub fn wave_segments(info: &WaveInfo, shape: &WaveShape) -> Vec<WaveSegment> {
    if !(info.target > 0.0) {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(shape.num_waves);
    let mut position = 0.0;
    for i in 0..shape.num_waves {
        let old = position;
        position += info.step;

        let crossed = (old < info.target) != (position < info.target);
        let done = crossed || i + 1 == shape.num_waves;
        if done {
            position = info.target;
        }

        let sign = if terminal_index(i, shape.num_waves, done) % 2 == 0 {
            -1.0
        } else {
            1.0
        };
        segments.push(WaveSegment {
            start: old,
            control: Point::new(old + (position - old) / 2.0, sign * shape.wave_height),
            end: position,
        });

        if done {
            break;
        }
    }
    segments
}

/// Index used for the offset sign. A terminating segment jumps to
/// `num_waves`, then steps once more if that jump flipped its parity.
fn terminal_index(i: usize, num_waves: usize, done: bool) -> usize {
    if !done {
        return i;
    }
    let jumped = num_waves;
    if (i % 2 == 0) != (jumped % 2 == 0) {
        jumped + 1
    } else {
        jumped
    }
}

/// Local-frame path: start at the origin, one quadratic per segment.
pub fn wave_path(segments: &[WaveSegment]) -> Path {
    let mut path = Path::new();
    path.push(PathSegment::MoveTo(Point::ORIGIN));
    for segment in segments {
        path.push(PathSegment::QuadTo {
            control: segment.control,
            to: Point::new(segment.end, 0.0),
        });
    }
    path
}
