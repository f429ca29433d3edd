//! Adjacency indexes and reachability over the direct referral graph.
//!
//! Equation synthesis needs both directions: the forward index drives the
//! reachability sweep from a source node, while the reverse index enumerates
//! the last-hop predecessors of a sink. The two indexes are kept as separate
//! maps; a [`DiGraphMap`] built from the same edges exists only to drive the
//! depth-first traversal.

use crate::referral::Link;
use petgraph::{
    graphmap::DiGraphMap,
    visit::{depth_first_search, DfsEvent},
};
use std::collections::{BTreeMap, BTreeSet};

/// Node set plus forward (`out[i]`) and reverse (`in[j]`) adjacency indexes.
#[derive(Debug, Default, Clone)]
pub struct TrustGraph {
    nodes: BTreeSet<u64>,
    sources: BTreeMap<u64, BTreeSet<u64>>,
    sinks: BTreeMap<u64, BTreeSet<u64>>,
    traversal: DiGraphMap<u64, ()>,
}

impl TrustGraph {
    /// Indexes an edge iterable. Order is irrelevant and duplicate links are
    /// tolerated.
    pub fn from_links<I>(links: I) -> Self
    where
        I: IntoIterator<Item = Link>,
    {
        let mut graph = TrustGraph::default();
        for link in links {
            graph.nodes.insert(link.from);
            graph.nodes.insert(link.to);
            graph
                .sources
                .entry(link.from)
                .or_default()
                .insert(link.to);
            graph.sinks.entry(link.to).or_default().insert(link.from);
            graph.traversal.add_edge(link.from, link.to, ());
        }
        graph
    }

    /// Every node id appearing as a source or a sink.
    pub fn nodes(&self) -> &BTreeSet<u64> {
        &self.nodes
    }

    /// The sinks directly referred to by `node` (`out[node]`).
    pub fn targets_of(&self, node: u64) -> Option<&BTreeSet<u64>> {
        self.sources.get(&node)
    }

    /// The sources directly referring to `node` (`in[node]`).
    pub fn referrals_to(&self, node: u64) -> Option<&BTreeSet<u64>> {
        self.sinks.get(&node)
    }

    /// All nodes reachable from `start` along direct edges, `start` included.
    pub fn reachable_from(&self, start: u64) -> BTreeSet<u64> {
        let mut reach = BTreeSet::from([start]);
        if self.traversal.contains_node(start) {
            depth_first_search(&self.traversal, Some(start), |event| {
                if let DfsEvent::Discover(node, _) = event {
                    reach.insert(node);
                }
            });
        }
        reach
    }
}
