//! Single-direction view of a bidirectional edge map.

use super::graph::EdgeMap;

/// Keep one directed entry per unordered pair.
///
/// The first orientation met while iterating `edges` wins, along with its
/// properties; the reverse is skipped when the result already holds it.
pub fn compute_distinct_edges(edges: &EdgeMap) -> EdgeMap {
    let mut result = EdgeMap::new();
    for (src, dst, props) in edges.entries() {
        if !result.has_edge(dst, src) {
            result.add_edge(src, dst, Some(props));
        }
    }
    result
}
