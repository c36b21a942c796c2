//! Connected-component extraction via union-find.

use dupliq_core::types::collections::FxHashMap;
use petgraph::unionfind::UnionFind;

use super::SimilarityGraph;

/// The partition of retained-edge nodes into connected components.
///
/// Members within a component are in lexicographic question-id order;
/// components are ordered by size descending, then by smallest member id.
/// Every node with at least one retained edge appears in exactly one
/// component.
#[derive(Debug, Default)]
pub struct ComponentSet {
    components: Vec<Vec<usize>>,
    membership: Vec<usize>,
}

impl ComponentSet {
    /// Components as dense node indices.
    pub fn components(&self) -> &[Vec<usize>] {
        &self.components
    }

    /// Maps a dense node index to its slot in `components`.
    pub fn membership(&self) -> &[usize] {
        &self.membership
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Resolve components into question-id lists.
    pub fn id_components(&self, graph: &SimilarityGraph) -> Vec<Vec<String>> {
        self.components
            .iter()
            .map(|component| {
                component
                    .iter()
                    .map(|&idx| graph.node(idx).to_string())
                    .collect()
            })
            .collect()
    }
}

/// Compute connected components over the retained graph.
///
/// Union-find with union by rank and path compression, so even a fully
/// connected component resolves in near-linear time instead of by pairwise
/// scanning. Nodes with no retained edges were never interned and cannot
/// appear.
pub fn connected_components(graph: &SimilarityGraph) -> ComponentSet {
    let node_count = graph.node_count();
    if node_count == 0 {
        return ComponentSet::default();
    }

    let mut uf = UnionFind::<usize>::new(node_count);
    for edge in graph.edges() {
        uf.union(edge.a, edge.b);
    }
    let labels = uf.into_labeling();

    let mut by_root: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
    for (idx, &root) in labels.iter().enumerate() {
        by_root.entry(root).or_default().push(idx);
    }

    let mut components: Vec<Vec<usize>> = by_root.into_values().collect();
    for component in &mut components {
        component.sort_unstable_by(|&x, &y| graph.node(x).cmp(graph.node(y)));
    }
    components.sort_unstable_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| graph.node(a[0]).cmp(graph.node(b[0])))
    });

    let mut membership = vec![0usize; node_count];
    for (slot, component) in components.iter().enumerate() {
        for &idx in component {
            membership[idx] = slot;
        }
    }

    ComponentSet {
        components,
        membership,
    }
}
