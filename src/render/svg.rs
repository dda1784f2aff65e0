//! SVG canvas.
//!
//! Draw calls are collected as SVG elements; transforms become nested `<g>`
//! groups and every stroked path gets its own `linearGradient` in user space
//! of the group it is drawn in. The viewBox is the logical canvas, while
//! `width`/`height` set the displayed size.

use super::{Canvas, LinearGradient, Path, PathSegment, Point, Rect, Surface};
use crate::painting::CanvasSize;
use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgContext {
    size: CanvasSize,
    defs: Vec<String>,
    elements: Vec<String>,
    open_groups: usize,
    next_gradient: usize,
    background: Option<String>,
}

impl SvgContext {
    fn new(size: CanvasSize) -> Self {
        Self {
            size,
            defs: Vec::new(),
            elements: Vec::new(),
            open_groups: 0,
            next_gradient: 0,
            background: None,
        }
    }

    fn covers(&self, region: &Rect) -> bool {
        region.x <= 0.0
            && region.y <= 0.0
            && region.x + region.width >= self.size.width
            && region.y + region.height >= self.size.height
    }

    fn path_data(path: &Path) -> String {
        let mut d = String::new();
        for segment in path.segments() {
            if !d.is_empty() {
                d.push(' ');
            }
            // writing to a String cannot fail
            let _ = match segment {
                PathSegment::MoveTo(p) => write!(d, "M {:.2} {:.2}", p.x, p.y),
                PathSegment::LineTo(p) => write!(d, "L {:.2} {:.2}", p.x, p.y),
                PathSegment::QuadTo { control, to } => write!(
                    d,
                    "Q {:.2} {:.2} {:.2} {:.2}",
                    control.x, control.y, to.x, to.y
                ),
            };
        }
        d
    }
}

/// Escape a value for use inside a double-quoted XML attribute.
fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

impl Surface for SvgContext {
    fn clear(&mut self, region: Rect) {
        // nothing is retained under a cleared area, so a full clear resets
        // the document; partial clears paint the background over it
        if self.covers(&region) {
            self.defs.clear();
            self.elements.clear();
            self.open_groups = 0;
            self.next_gradient = 0;
        }
        if let Some(bg) = &self.background {
            self.elements.push(format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                region.x,
                region.y,
                region.width,
                region.height,
                escape_attr(bg)
            ));
        }
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.elements.push(format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="none" stroke="{}"/>"#,
            center.x,
            center.y,
            radius,
            escape_attr(color)
        ));
    }

    fn stroke_path(&mut self, path: &Path, gradient: &LinearGradient) {
        let id = format!("edge{}", self.next_gradient);
        self.next_gradient += 1;

        self.defs.push(format!(
            r#"<linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"><stop offset="0" stop-color="{}"/><stop offset="1" stop-color="{}"/></linearGradient>"#,
            id,
            gradient.from.x,
            gradient.from.y,
            gradient.to.x,
            gradient.to.y,
            escape_attr(&gradient.start_color),
            escape_attr(&gradient.end_color)
        ));
        self.elements.push(format!(
            r#"<path d="{}" fill="none" stroke="url(#{})"/>"#,
            Self::path_data(path),
            id
        ));
    }

    fn push_transform(&mut self, translate: Point, rotate: f64) {
        self.open_groups += 1;
        self.elements.push(format!(
            r#"<g transform="translate({:.2} {:.2}) rotate({:.4})">"#,
            translate.x,
            translate.y,
            rotate.to_degrees()
        ));
    }

    fn pop_transform(&mut self) {
        if self.open_groups > 0 {
            self.open_groups -= 1;
            self.elements.push("</g>".to_string());
        }
    }
}

/// One gallery slot rendered as an SVG document.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    logical: CanvasSize,
    width: u32,
    height: u32,
    context: Option<SvgContext>,
}

impl SvgCanvas {
    /// A canvas over `logical` units displayed at `width` x `height`.
    ///
    /// A logical canvas without positive finite area has no drawing context.
    pub fn new(logical: CanvasSize, width: u32, height: u32) -> Self {
        let drawable = logical.width.is_finite()
            && logical.height.is_finite()
            && logical.width > 0.0
            && logical.height > 0.0;
        Self {
            logical,
            width,
            height,
            context: drawable.then(|| SvgContext::new(logical)),
        }
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        if let Some(ctx) = self.context.as_mut() {
            ctx.background = Some(background.into());
        }
        self
    }

    /// The current document.
    pub fn to_svg(&self) -> String {
        let (defs, elements, open_groups) = match &self.context {
            Some(ctx) => (ctx.defs.join("\n    "), ctx.elements.join("\n  "), ctx.open_groups),
            None => (String::new(), String::new(), 0),
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">
  <defs>
    {}
  </defs>
  {}{}
</svg>"#,
            self.logical.width,
            self.logical.height,
            self.width,
            self.height,
            defs,
            elements,
            "</g>".repeat(open_groups)
        )
    }

    pub fn write_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_svg())
    }
}

impl Canvas for SvgCanvas {
    fn width(&self) -> f64 {
        self.logical.width
    }

    fn height(&self) -> f64 {
        self.logical.height
    }

    fn context_2d(&mut self) -> Option<&mut dyn Surface> {
        self.context.as_mut().map(|c| c as &mut dyn Surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painting::{EdgeProperties, Node, Painting};
    use crate::render::ArtTarget;

    fn canvas() -> SvgCanvas {
        SvgCanvas::new(CanvasSize::default(), 320, 240)
    }

    #[test]
    fn zero_area_canvas_has_no_context() {
        let mut canvas = SvgCanvas::new(
            CanvasSize {
                width: 0.0,
                height: 480.0,
            },
            320,
            240,
        );
        assert!(canvas.context_2d().is_none());
    }

    #[test]
    fn renders_gradient_per_edge_inside_rotated_group() {
        let mut painting = Painting::new();
        let a = painting.add_node(Node::new("#80add7", 0.0, 0.0));
        let b = painting.add_node(Node::new("#f1931b", 0.0, 100.0));
        let c = painting.add_node(Node::new("#0abda0", 100.0, 0.0));
        painting.connect_nodes(a, b, Some(EdgeProperties::new(0.2)));
        painting.connect_nodes(a, c, None);

        let mut target = ArtTarget::new(canvas()).unwrap();
        target.display(&painting).unwrap();
        let svg = target.canvas().to_svg();

        assert!(svg.contains(r#"viewBox="0 0 640 480" width="320" height="240""#));
        assert_eq!(svg.matches("<linearGradient").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains(r#"<g transform="translate(0.00 0.00) rotate(90.0000)">"#));
        assert!(svg.contains(r##"stop-color="#f1931b""##));
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        // flat edge: a single zero-amplitude quad
        assert!(svg.contains("M 0.00 0.00 Q 50.00 -0.00 100.00 0.00")
            || svg.contains("M 0.00 0.00 Q 50.00 0.00 100.00 0.00"));
    }

    #[test]
    fn colors_are_escaped_in_attributes() {
        let mut painting = Painting::new();
        let a = painting.add_node(Node::new(r#""><script/>"#, 0.0, 0.0));
        let b = painting.add_node(Node::new("a&b", 10.0, 0.0));
        painting.connect_nodes(a, b, None);

        let mut target = ArtTarget::new(canvas().with_background("'bg'")).unwrap();
        target.display(&painting).unwrap();
        let svg = target.canvas().to_svg();

        assert!(!svg.contains("<script"));
        assert!(svg.contains(r#"stroke="&quot;&gt;&lt;script/&gt;""#));
        assert!(svg.contains(r#"stop-color="a&amp;b""#));
        assert!(svg.contains(r#"fill="&apos;bg&apos;""#));
    }

    #[test]
    fn full_clear_resets_document() {
        let mut canvas = canvas().with_background("#101010");
        {
            let ctx = canvas.context_2d().unwrap();
            ctx.stroke_circle(Point::new(1.0, 1.0), 3.0, "#ffffff");
            ctx.push_transform(Point::new(1.0, 1.0), 0.0);
            ctx.clear(Rect::new(0.0, 0.0, 640.0, 480.0));
        }
        let svg = canvas.to_svg();
        assert!(!svg.contains("<circle"));
        assert!(!svg.contains("</g>"));
        assert!(svg.contains(r##"fill="#101010""##));
    }
}
