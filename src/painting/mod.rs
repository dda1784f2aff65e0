//! Randomly generated wave-graph paintings.
//!
//! A [`Painting`] is a node arena plus an [`EdgeMap`] holding both directed
//! entries of every undirected edge. [`Painting::generate`] builds one from
//! [`PaintingOptions`]; every field is optional and falls back to the
//! defaults below.

pub mod distinct;
pub mod graph;

use crate::error::{PaintError, PaintResult};
use crate::random::{rand_int, rand_number, Range};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::debug;

pub use distinct::compute_distinct_edges;
pub use graph::{EdgeMap, EdgeProperties, Node, NodeId, DEFAULT_EDGE_PROPS};

/// Default node palette.
pub mod palette {
    pub const COLORS: [&str; 10] = [
        "#80add7", "#0abda0", "#ebf2ea", "#d4dca9", "#bf9d7a", // cool
        "#c0334d", "#d6618f", "#f3d4a0", "#f1931b", "#8f715b", // warm
    ];

    pub fn default_colors() -> Vec<String> {
        COLORS.iter().map(|c| c.to_string()).collect()
    }
}

/// Logical canvas that node coordinates are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
        }
    }
}

/// Rejection sampling gives up after this many draws per requested link and
/// samples the remaining candidates without replacement instead.
const REJECTION_ATTEMPTS_PER_LINK: usize = 8;

/// Generation options. `None` fields use the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintingOptions {
    /// Default: random integer in [50, 100).
    pub num_nodes: Option<usize>,
    /// Default: a random sub-range of [1, 7).
    pub links_per_node_range: Option<Range>,
    /// Default: [0, 1). Must lie within [0, 1].
    pub wave_factor_range: Option<Range>,
    /// Default: [`palette::COLORS`].
    pub colors: Option<Vec<String>>,
    /// Default: 640 x 480.
    pub canvas: Option<CanvasSize>,
}

impl PaintingOptions {
    pub fn with_num_nodes(mut self, num_nodes: usize) -> Self {
        self.num_nodes = Some(num_nodes);
        self
    }

    pub fn with_links_per_node(mut self, range: Range) -> Self {
        self.links_per_node_range = Some(range);
        self
    }

    pub fn with_wave_factor(mut self, range: Range) -> Self {
        self.wave_factor_range = Some(range);
        self
    }

    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_canvas(mut self, canvas: CanvasSize) -> Self {
        self.canvas = Some(canvas);
        self
    }
}

/// Two independent draws in [1, 6) and [1, 7), sorted into a range.
fn links_per_node_range<R: Rng + ?Sized>(rng: &mut R) -> PaintResult<Range> {
    let mut values = [rand_int(rng, (1.0, 6.0))?, rand_int(rng, (1.0, 7.0))?];
    values.sort_unstable();
    Ok(Range::new(values[0] as f64, values[1] as f64))
}

/// One generated graph: nodes plus both directions of every edge.
#[derive(Debug, Clone, Default)]
pub struct Painting {
    nodes: Vec<Node>,
    pub edges: EdgeMap,
}

impl Painting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a random painting.
    pub fn generate<R: Rng + ?Sized>(opts: &PaintingOptions, rng: &mut R) -> PaintResult<Self> {
        let num_nodes = match opts.num_nodes {
            Some(0) => return Err(PaintError::invalid_options("num_nodes must be positive")),
            Some(n) => n,
            None => rand_int(rng, (50.0, 100.0))? as usize,
        };
        let links_range = match opts.links_per_node_range {
            Some(range) if range.min < 0.0 => {
                return Err(PaintError::invalid_options(format!(
                    "links_per_node_range must not be negative, got [{}, {})",
                    range.min, range.max
                )))
            }
            Some(range) => range,
            None => links_per_node_range(rng)?,
        };
        let wave_range = opts.wave_factor_range.unwrap_or(Range::new(0.0, 1.0));
        if !(wave_range.min >= 0.0 && wave_range.max <= 1.0) {
            return Err(PaintError::invalid_options(format!(
                "wave_factor_range must lie within [0, 1], got [{}, {})",
                wave_range.min, wave_range.max
            )));
        }
        let default_colors;
        let colors: &[String] = match &opts.colors {
            Some(colors) => colors,
            None => {
                default_colors = palette::default_colors();
                &default_colors
            }
        };
        if colors.is_empty() {
            return Err(PaintError::invalid_options("palette must not be empty"));
        }
        let canvas = opts.canvas.unwrap_or_default();

        let mut painting = Painting::new();
        for _ in 0..num_nodes {
            let color = &colors[rand_int(rng, (0.0, colors.len() as f64))? as usize];
            let x = rand_int(rng, (0.0, canvas.width))? as f64;
            let y = rand_int(rng, (0.0, canvas.height))? as f64;
            painting.add_node(Node::new(color.clone(), x, y));
        }

        for i in 0..num_nodes {
            let num_links = rand_int(rng, links_range)? as usize;
            for partner in pick_partners(rng, i, num_nodes, num_links)? {
                let properties = EdgeProperties::new(rand_number(rng, wave_range)?);
                painting.connect_nodes(NodeId(i), NodeId(partner), Some(properties));
            }
        }

        debug!(
            nodes = painting.nodes.len(),
            directed_edges = painting.edges.len(),
            fingerprint = %painting.fingerprint(),
            "generated painting"
        );
        Ok(painting)
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Insert both directions of an undirected edge with the same properties.
    pub fn connect_nodes(&mut self, a: NodeId, b: NodeId, properties: Option<EdgeProperties>) {
        let properties = properties.unwrap_or_default();
        self.edges.add_edge(a, b, Some(properties));
        self.edges.add_edge(b, a, Some(properties));
    }

    pub fn disconnect_nodes(&mut self, a: NodeId, b: NodeId) {
        self.edges.remove_edge(a, b);
        self.edges.remove_edge(b, a);
    }

    /// Edges with the second of each bidirectional pair dropped.
    pub fn compute_distinct_edges(&self) -> EdgeMap {
        compute_distinct_edges(&self.edges)
    }

    /// Short hex digest of nodes and edges, stable for a given painting.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for node in &self.nodes {
            hasher.update(node.color.as_bytes());
            hasher.update(node.x.to_le_bytes());
            hasher.update(node.y.to_le_bytes());
        }
        for (src, dst, props) in self.edges.entries() {
            hasher.update((src.index() as u64).to_le_bytes());
            hasher.update((dst.index() as u64).to_le_bytes());
            hasher.update(props.wave_factor.to_le_bytes());
        }
        let digest = hasher.finalize();
        digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Serializable view: nodes plus the distinct edges.
    pub fn snapshot(&self) -> PaintingSnapshot {
        let edges = self
            .compute_distinct_edges()
            .entries()
            .into_iter()
            .map(|(src, dst, props)| SnapshotEdge {
                source: src,
                target: dst,
                wave_factor: props.wave_factor,
            })
            .collect();
        PaintingSnapshot {
            fingerprint: self.fingerprint(),
            nodes: self.nodes.clone(),
            edges,
        }
    }
}

/// JSON dump of a painting.
#[derive(Debug, Clone, Serialize)]
pub struct PaintingSnapshot {
    pub fingerprint: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<SnapshotEdge>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub wave_factor: f64,
}

/// Choose `num_links` distinct partners for `node`, never `node` itself.
fn pick_partners<R: Rng + ?Sized>(
    rng: &mut R,
    node: usize,
    num_nodes: usize,
    num_links: usize,
) -> PaintResult<Vec<usize>> {
    let available = num_nodes.saturating_sub(1);
    if num_links > available {
        return Err(PaintError::DegenerateDegreeRequest {
            requested: num_links,
            available,
        });
    }

    let mut used: HashSet<usize> = HashSet::from([node]);
    let mut partners = Vec::with_capacity(num_links);
    let mut attempts = num_links * REJECTION_ATTEMPTS_PER_LINK;

    while partners.len() < num_links && attempts > 0 {
        attempts -= 1;
        let candidate = rand_int(rng, (0.0, num_nodes as f64))? as usize;
        if used.insert(candidate) {
            partners.push(candidate);
        }
    }

    if partners.len() < num_links {
        let remaining: Vec<usize> = (0..num_nodes).filter(|n| !used.contains(n)).collect();
        partners.extend(remaining.choose_multiple(rng, num_links - partners.len()).copied());
    }

    Ok(partners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generates_exact_node_count() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1, 2, 7, 30] {
            let opts = PaintingOptions::default()
                .with_num_nodes(n)
                .with_links_per_node(Range::new(0.0, 1.0));
            let painting = Painting::generate(&opts, &mut rng).unwrap();
            assert_eq!(painting.nodes().len(), n);
            assert!(painting.edges.is_empty());
        }
    }

    #[test]
    fn default_options_stay_in_documented_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let painting = Painting::generate(&PaintingOptions::default(), &mut rng).unwrap();

        assert!((50..100).contains(&painting.nodes().len()));
        for node in painting.nodes() {
            assert!(palette::COLORS.contains(&node.color.as_str()));
            assert!((0.0..640.0).contains(&node.x));
            assert!((0.0..480.0).contains(&node.y));
            assert_eq!(node.x.fract(), 0.0);
        }
        for (_, _, props) in painting.edges.entries() {
            assert!((0.0..1.0).contains(&props.wave_factor));
        }
    }

    #[test]
    fn default_links_range_is_sorted_sub_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let range = links_per_node_range(&mut rng).unwrap();
            assert!(range.min <= range.max);
            assert!(range.min >= 1.0 && range.max < 7.0);
        }
    }

    #[test]
    fn connect_inserts_both_directions_with_same_properties() {
        let mut painting = Painting::new();
        let a = painting.add_node(Node::new("#000000", 0.0, 0.0));
        let b = painting.add_node(Node::new("#ffffff", 1.0, 1.0));
        painting.connect_nodes(a, b, Some(EdgeProperties::new(0.25)));

        assert_eq!(painting.edges.get_edge_properties(a, b), Some(EdgeProperties::new(0.25)));
        assert_eq!(painting.edges.get_edge_properties(b, a), Some(EdgeProperties::new(0.25)));

        painting.disconnect_nodes(a, b);
        assert!(painting.edges.is_empty());
    }

    #[test]
    fn degenerate_degree_is_reported() {
        let mut rng = StdRng::seed_from_u64(3);
        let opts = PaintingOptions::default()
            .with_num_nodes(3)
            .with_links_per_node(Range::new(5.0, 6.0));
        let err = Painting::generate(&opts, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            PaintError::DegenerateDegreeRequest {
                requested: 5,
                available: 2
            }
        ));
    }

    #[test]
    fn full_degree_terminates() {
        let mut rng = StdRng::seed_from_u64(5);
        let partners = pick_partners(&mut rng, 3, 6, 5).unwrap();
        let unique: HashSet<usize> = partners.iter().copied().collect();
        assert_eq!(partners.len(), 5);
        assert_eq!(unique.len(), 5);
        assert!(!unique.contains(&3));
    }

    #[test]
    fn empty_palette_and_zero_nodes_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let opts = PaintingOptions::default().with_colors(Vec::new());
        assert!(matches!(
            Painting::generate(&opts, &mut rng),
            Err(PaintError::InvalidOptions(_))
        ));

        let opts = PaintingOptions::default().with_num_nodes(0);
        assert!(matches!(
            Painting::generate(&opts, &mut rng),
            Err(PaintError::InvalidOptions(_))
        ));
    }

    #[test]
    fn wave_factor_range_outside_unit_interval_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        for range in [
            Range::new(1e18, 1e18),
            Range::new(0.5, 1.5),
            Range::new(-0.1, 0.5),
            Range::new(f64::NAN, 0.5),
        ] {
            let opts = PaintingOptions::default()
                .with_num_nodes(3)
                .with_links_per_node(Range::new(1.0, 2.0))
                .with_wave_factor(range);
            assert!(matches!(
                Painting::generate(&opts, &mut rng),
                Err(PaintError::InvalidOptions(_))
            ));
        }

        let opts = PaintingOptions::default()
            .with_num_nodes(3)
            .with_wave_factor(Range::new(1.0, 1.0));
        assert!(Painting::generate(&opts, &mut rng).is_ok());
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let mut rng = StdRng::seed_from_u64(21);
        let opts = PaintingOptions::default().with_num_nodes(10);
        let original = Painting::generate(&opts, &mut rng).unwrap();
        let mut copy = original.clone();
        let before = original.fingerprint();

        copy.add_node(Node::new("#123456", 1.0, 2.0));
        copy.connect_nodes(NodeId(0), NodeId(10), None);

        assert_eq!(original.fingerprint(), before);
        assert_eq!(original.nodes().len(), 10);
        assert_ne!(copy.fingerprint(), before);
    }

    #[test]
    fn same_seed_same_fingerprint() {
        let opts = PaintingOptions::default().with_num_nodes(25);
        let a = Painting::generate(&opts, &mut StdRng::seed_from_u64(77)).unwrap();
        let b = Painting::generate(&opts, &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 16);
    }
}
