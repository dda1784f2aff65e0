//! Nodes and the directed edge map of a painting.
//!
//! Nodes live in an arena owned by the painting and are addressed by
//! [`NodeId`]. Edges are a single mapping from an ordered `(src, dst)` pair
//! to its [`EdgeProperties`]; adjacency is derived from that mapping, so
//! there is no second structure to keep in sync.

use serde::Serialize;
use std::collections::HashMap;

/// Index of a node in its painting's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A colored point in logical canvas space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub color: String,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(color: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            color: color.into(),
            x,
            y,
        }
    }
}

/// Per-edge visual parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeProperties {
    /// Controls wave amplitude and segment count, conventionally in [0, 1].
    pub wave_factor: f64,
}

/// The flat (straight) edge used when no properties are supplied.
pub const DEFAULT_EDGE_PROPS: EdgeProperties = EdgeProperties { wave_factor: 0.0 };

impl Default for EdgeProperties {
    fn default() -> Self {
        DEFAULT_EDGE_PROPS
    }
}

impl EdgeProperties {
    pub fn new(wave_factor: f64) -> Self {
        Self { wave_factor }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    properties: EdgeProperties,
    /// Insertion sequence; overwriting a pair keeps its original value.
    seq: u64,
}

/// Directed edges keyed by ordered node pair.
///
/// Iteration visits sources in the order they first received a (still
/// present) edge, then each source's destinations in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EdgeMap {
    slots: HashMap<(NodeId, NodeId), Slot>,
    next_seq: u64,
}

impl EdgeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `src -> dst`, or overwrite the properties of an existing pair.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, properties: Option<EdgeProperties>) {
        let properties = properties.unwrap_or_default();
        match self.slots.get_mut(&(src, dst)) {
            Some(slot) => slot.properties = properties,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.slots.insert((src, dst), Slot { properties, seq });
            }
        }
    }

    /// Remove `src -> dst`, returning its properties if it was present.
    pub fn remove_edge(&mut self, src: NodeId, dst: NodeId) -> Option<EdgeProperties> {
        self.slots.remove(&(src, dst)).map(|slot| slot.properties)
    }

    pub fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.slots.contains_key(&(src, dst))
    }

    /// Destinations of `src` in insertion order; empty for an unknown source.
    ///
    /// Scans every stored pair, which is linear in the edge count.
    pub fn get_edges(&self, src: NodeId) -> Vec<NodeId> {
        let mut dsts: Vec<(u64, NodeId)> = self
            .slots
            .iter()
            .filter(|((s, _), _)| *s == src)
            .map(|((_, d), slot)| (slot.seq, *d))
            .collect();
        dsts.sort_unstable_by_key(|(seq, _)| *seq);
        dsts.into_iter().map(|(_, d)| d).collect()
    }

    pub fn get_edge_properties(&self, src: NodeId, dst: NodeId) -> Option<EdgeProperties> {
        self.slots.get(&(src, dst)).map(|slot| slot.properties)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Every stored `(src, dst, properties)` triple in iteration order.
    ///
    /// Collected and sorted on each call, so hold on to the result rather
    /// than calling this in a loop.
    pub fn entries(&self) -> Vec<(NodeId, NodeId, EdgeProperties)> {
        let mut first_seen: HashMap<NodeId, u64> = HashMap::new();
        for ((src, _), slot) in &self.slots {
            let entry = first_seen.entry(*src).or_insert(slot.seq);
            if slot.seq < *entry {
                *entry = slot.seq;
            }
        }

        let mut entries: Vec<(u64, u64, NodeId, NodeId, EdgeProperties)> = self
            .slots
            .iter()
            .map(|((src, dst), slot)| (first_seen[src], slot.seq, *src, *dst, slot.properties))
            .collect();
        entries.sort_unstable_by_key(|(rank, seq, ..)| (*rank, *seq));
        entries
            .into_iter()
            .map(|(_, _, src, dst, props)| (src, dst, props))
            .collect()
    }

    /// Visit every stored pair as `visit(dst, src, properties)`.
    pub fn for_each(&self, mut visit: impl FnMut(NodeId, NodeId, EdgeProperties)) {
        for (src, dst, props) in self.entries() {
            visit(dst, src, props);
        }
    }
}
