//! Wavepaint - generative paintings of colored nodes joined by waves.
//!
//! A painting is a random graph: nodes are colored points on a 640 x 480
//! logical canvas, edges carry a wave factor that sets how strongly the
//! rendered curve oscillates. Paintings are drawn onto any [`render::Surface`]
//! and refreshed into a gallery of SVG slots on a timer.

pub mod config;
pub mod error;
pub mod gallery;
pub mod painting;
pub mod random;
pub mod render;

pub use config::WavepaintConfig;
pub use error::{PaintError, PaintResult};
pub use gallery::{Gallery, GalleryScheduler};
pub use painting::{Painting, PaintingOptions};
pub use render::ArtTarget;
