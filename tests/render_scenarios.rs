use rand::rngs::StdRng;
use rand::SeedableRng;
use wavepaint::painting::CanvasSize;
use wavepaint::random::Range;
use wavepaint::render::recording::{DrawCommand, RecordingCanvas};
use wavepaint::render::svg::SvgCanvas;
use wavepaint::render::{PathSegment, NODE_RADIUS};
use wavepaint::{ArtTarget, PaintError, Painting, PaintingOptions};

fn flat_painting(seed: u64) -> Painting {
    let opts = PaintingOptions::default()
        .with_num_nodes(3)
        .with_links_per_node(Range::new(1.0, 2.0))
        .with_wave_factor(Range::new(0.0, 0.0));
    Painting::generate(&opts, &mut StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn flat_painting_renders_straight_edges() {
    let painting = flat_painting(7);
    let distinct = painting.compute_distinct_edges();

    let mut target = ArtTarget::new(RecordingCanvas::new(640.0, 480.0)).unwrap();
    target.display(&painting).unwrap();
    let commands = target.canvas().commands();

    let circles = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::StrokeCircle { radius, .. } if *radius == NODE_RADIUS))
        .count();
    assert_eq!(circles, 3);

    let coincident = distinct
        .entries()
        .into_iter()
        .filter(|(s, d, _)| {
            let (a, b) = (painting.node(*s).unwrap(), painting.node(*d).unwrap());
            a.x == b.x && a.y == b.y
        })
        .count();

    let mut paths = 0;
    for command in commands {
        if let DrawCommand::StrokePath { path, .. } = command {
            paths += 1;
            assert_eq!(path.segments().len(), 2);
            match path.segments()[1] {
                PathSegment::QuadTo { control, .. } => assert_eq!(control.y.abs(), 0.0),
                other => panic!("expected quad, got {:?}", other),
            }
        }
    }
    assert_eq!(paths + coincident, distinct.len());
}

#[test]
fn transforms_are_balanced() {
    let opts = PaintingOptions::default().with_num_nodes(40);
    let painting = Painting::generate(&opts, &mut StdRng::seed_from_u64(99)).unwrap();

    let mut target = ArtTarget::new(RecordingCanvas::new(640.0, 480.0)).unwrap();
    target.display(&painting).unwrap();

    let mut depth = 0i32;
    for command in target.canvas().commands() {
        match command {
            DrawCommand::PushTransform { .. } => depth += 1,
            DrawCommand::PopTransform => depth -= 1,
            DrawCommand::StrokePath { .. } => assert_eq!(depth, 1),
            _ => assert_eq!(depth, 0),
        }
    }
    assert_eq!(depth, 0);
}

#[test]
fn recorded_commands_serialize_with_op_tags() {
    let mut target = ArtTarget::new(RecordingCanvas::new(640.0, 480.0)).unwrap();
    target.display(&flat_painting(3)).unwrap();

    let json = serde_json::to_value(target.canvas().commands()).unwrap();
    assert_eq!(json[0]["op"], "clear");
    assert_eq!(json[1]["op"], "stroke_circle");
}

#[test]
fn svg_document_has_one_gradient_per_stroked_edge() {
    let painting = flat_painting(11);
    let canvas = SvgCanvas::new(CanvasSize::default(), 320, 240);
    let mut target = ArtTarget::new(canvas).unwrap();
    target.display(&painting).unwrap();

    let svg = target.canvas().to_svg();
    assert_eq!(svg.matches("<circle").count(), 3);
    assert_eq!(
        svg.matches("<linearGradient").count(),
        svg.matches("<path").count()
    );
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn canvas_without_area_is_rejected() {
    let canvas = SvgCanvas::new(
        CanvasSize {
            width: 640.0,
            height: 0.0,
        },
        320,
        240,
    );
    assert!(matches!(
        ArtTarget::new(canvas),
        Err(PaintError::MissingDrawingContext)
    ));
}

#[test]
fn snapshot_lists_distinct_edges() {
    let painting = flat_painting(5);
    let snapshot = painting.snapshot();
    assert_eq!(snapshot.nodes.len(), 3);
    assert_eq!(snapshot.edges.len(), painting.compute_distinct_edges().len());

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["fingerprint"], painting.fingerprint());
    assert!(json["edges"][0]["wave_factor"].is_number());
}
