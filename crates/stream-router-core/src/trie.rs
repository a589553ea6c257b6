// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Route trie.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]; the root is always
//! `NodeId(0)`. Each node has literal children keyed by segment text and at
//! most one wildcard child shared by every parameter segment at that depth.
//! Nodes are only ever added.
//!
//! Matching is greedy: a literal child always wins over the wildcard child and
//! a failed literal branch is not retried through the wildcard.

use std::collections::BTreeMap;

use crate::params::RouteParams;
use crate::pattern::{split_segments, Pattern, Segment};

/// Arena index of a trie node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A trie node carrying an optional payload `H` (the router stores its
/// per-pattern channels here).
#[derive(Debug)]
pub struct RouteNode<H> {
    children: BTreeMap<String, NodeId>,
    param_child: Option<NodeId>,
    param_names: Option<Vec<String>>,
    depth: usize,
    handle: Option<H>,
}

impl<H> RouteNode<H> {
    fn new(depth: usize) -> Self {
        Self {
            children: BTreeMap::new(),
            param_child: None,
            param_names: None,
            depth,
            handle: None,
        }
    }

    /// Literal child for `segment`.
    pub fn child(&self, segment: &str) -> Option<NodeId> {
        self.children.get(segment).copied()
    }

    /// The wildcard child, if any parameter segment was registered here.
    pub fn param_child(&self) -> Option<NodeId> {
        self.param_child
    }

    /// Parameter names attached by the last registration ending here.
    /// `None` for nodes that only lie on the way to a terminal.
    pub fn param_names(&self) -> Option<&[String]> {
        self.param_names.as_deref()
    }

    /// True when some pattern terminates at this node.
    pub fn is_terminal(&self) -> bool {
        self.param_names.is_some()
    }

    /// Distance from the root in segments.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Payload attached to this node.
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// Attach a payload, returning the previous one.
    pub fn set_handle(&mut self, handle: H) -> Option<H> {
        self.handle.replace(handle)
    }

    /// Zip `captures` with this node's parameter names. `None` if the node is
    /// not a terminal.
    pub fn params<V: AsRef<str>>(&self, captures: &[V]) -> Option<RouteParams> {
        self.param_names
            .as_deref()
            .map(|names| RouteParams::zip(names, captures))
    }
}

/// Outcome of [`RouteTrie::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Terminal node of the pattern.
    pub node: NodeId,
    /// Names that were attached before this registration overwrote them.
    pub previous_names: Option<Vec<String>>,
}

impl Registration {
    /// True when an earlier registration attached a different name list to
    /// the same terminal (e.g. `/a/:x` then `/a/:y`).
    pub fn renamed_params(&self, current: &[String]) -> bool {
        self.previous_names
            .as_deref()
            .is_some_and(|prev| prev != current)
    }
}

/// Result of a successful [`RouteTrie::lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieMatch<'p> {
    /// Node reached after consuming every path segment.
    pub node: NodeId,
    /// Segments consumed through wildcard children, in traversal order.
    pub captures: Vec<&'p str>,
}

/// Arena-backed route trie.
#[derive(Debug)]
pub struct RouteTrie<H> {
    nodes: Vec<RouteNode<H>>,
}

impl<H> Default for RouteTrie<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTrie<H> {
    /// Trie holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![RouteNode::new(0)],
        }
    }

    /// The root node id.
    pub const fn root() -> NodeId {
        NodeId(0)
    }

    /// Node by id.
    ///
    /// Ids are only minted by this trie and nodes are never removed, so any
    /// id obtained from it stays valid.
    pub fn node(&self, id: NodeId) -> &RouteNode<H> {
        &self.nodes[id.0]
    }

    /// Mutable node by id.
    pub fn node_mut(&mut self, id: NodeId) -> &mut RouteNode<H> {
        &mut self.nodes[id.0]
    }

    /// Total node count, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Register a pattern string without validation.
    pub fn register(&mut self, pattern: &str) -> Registration {
        self.register_pattern(&Pattern::lenient(pattern))
    }

    /// Walk/create nodes for `pattern` and attach its parameter names to the
    /// terminal, overwriting any names attached before.
    pub fn register_pattern(&mut self, pattern: &Pattern) -> Registration {
        let mut current = Self::root();
        for segment in pattern.segments() {
            current = match segment {
                Segment::Literal(literal) => self.literal_child_or_insert(current, literal),
                Segment::Param(_) => self.param_child_or_insert(current),
            };
        }
        let names = pattern.param_names();
        let previous_names = self.nodes[current.0].param_names.replace(names);
        Registration {
            node: current,
            previous_names,
        }
    }

    /// Descend along `path`; succeeds only if every segment is consumed.
    ///
    /// The returned node may be an intermediate node; check
    /// [`RouteNode::is_terminal`] or use [`RouteTrie::resolve`].
    pub fn lookup<'p>(&self, path: &'p str) -> Option<TrieMatch<'p>> {
        let mut current = Self::root();
        let mut captures = Vec::new();
        for segment in split_segments(path) {
            let node = &self.nodes[current.0];
            current = if let Some(next) = node.child(segment) {
                next
            } else {
                let next = node.param_child?;
                captures.push(segment);
                next
            };
        }
        Some(TrieMatch {
            node: current,
            captures,
        })
    }

    /// Look up `path` and zip its captures into named params. `None` unless
    /// the reached node is a terminal.
    pub fn resolve(&self, path: &str) -> Option<(NodeId, RouteParams)> {
        let found = self.lookup(path)?;
        let params = self.node(found.node).params(&found.captures)?;
        Some((found.node, params))
    }

    fn literal_child_or_insert(&mut self, parent: NodeId, literal: &str) -> NodeId {
        if let Some(existing) = self.nodes[parent.0].child(literal) {
            return existing;
        }
        let id = self.push_node(parent);
        self.nodes[parent.0].children.insert(literal.to_string(), id);
        id
    }

    fn param_child_or_insert(&mut self, parent: NodeId) -> NodeId {
        if let Some(existing) = self.nodes[parent.0].param_child {
            return existing;
        }
        let id = self.push_node(parent);
        self.nodes[parent.0].param_child = Some(id);
        id
    }

    fn push_node(&mut self, parent: NodeId) -> NodeId {
        let depth = self.nodes[parent.0].depth + 1;
        let id = NodeId(self.nodes.len());
        self.nodes.push(RouteNode::new(depth));
        id
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    type Trie = RouteTrie<()>;

    #[test]
    fn same_pattern_converges_on_one_node() {
        let mut trie = Trie::new();
        let a = trie.register("/user/:id");
        let b = trie.register("user/:id");
        assert_eq!(a.node, b.node);
        assert_eq!(trie.len(), 3);
        assert_eq!(b.previous_names, Some(vec!["id".to_string()]));
        assert!(!b.renamed_params(&["id".to_string()]));
    }

    #[test]
    fn literal_and_param_children_coexist() {
        let mut trie = Trie::new();
        let param = trie.register("/user/:id").node;
        let literal = trie.register("/user/settings").node;
        assert_ne!(param, literal);
        assert_eq!(trie.lookup("user/settings").map(|m| m.node), Some(literal));
        assert_eq!(trie.lookup("user/7").map(|m| m.node), Some(param));
    }

    #[test]
    fn captures_in_traversal_order() {
        let mut trie = Trie::new();
        trie.register("/org/:org/repo/:repo");
        let (_, params) = trie.resolve("org/echo/repo/core").unwrap();
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![("org", "echo"), ("repo", "core")]
        );
    }

    #[test]
    fn segment_count_must_match_exactly() {
        let mut trie = Trie::new();
        trie.register("/user/:id");
        assert!(trie.resolve("user").is_none());
        assert!(trie.lookup("user/1/extra").is_none());
    }

    #[test]
    fn intermediate_node_is_not_a_terminal() {
        let mut trie = Trie::new();
        trie.register("/a/b/c");
        let found = trie.lookup("a/b").unwrap();
        assert!(!trie.node(found.node).is_terminal());
        assert!(trie.resolve("a/b").is_none());
    }

    #[test]
    fn literal_branch_is_not_retried_through_wildcard() {
        let mut trie = Trie::new();
        trie.register("/a/b/c");
        trie.register("/a/:x/d");
        assert!(trie.resolve("a/b/d").is_none());
        assert!(trie.resolve("a/z/d").is_some());
    }

    #[test]
    fn shared_wildcard_slot_takes_last_names() {
        let mut trie = Trie::new();
        let first = trie.register("/a/:x");
        let second = trie.register("/a/:y");
        assert_eq!(first.node, second.node);
        assert!(second.renamed_params(&["y".to_string()]));
        let (_, params) = trie.resolve("a/1").unwrap();
        assert_eq!(params.get("y"), Some("1"));
        assert_eq!(params.get("x"), None);
    }

    #[test]
    fn literal_pattern_yields_empty_params() {
        let mut trie = Trie::new();
        trie.register("/about");
        let (_, params) = trie.resolve("about").unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn root_pattern_matches_empty_path() {
        let mut trie = Trie::new();
        assert!(trie.resolve("").is_none());
        let reg = trie.register("");
        assert_eq!(reg.node, Trie::root());
        assert!(trie.resolve("").is_some());
        assert_eq!(trie.node(Trie::root()).depth(), 0);
    }

    #[test]
    fn depth_tracks_segment_count() {
        let mut trie = Trie::new();
        let reg = trie.register("/a/:b/c");
        assert_eq!(trie.node(reg.node).depth(), 3);
    }
}
