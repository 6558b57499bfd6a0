//! Document hierarchy stored as an index-based arena.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed top-level document part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartType {
    /// Everything before the first recognised part title
    Title,
    /// Abstract (реферат); a document may have several
    Abstract,
    /// Table of contents
    Toc,
    /// Introduction
    Introduction,
    /// Numbered main part (chapters)
    Main,
    /// Conclusion
    Conclusion,
    /// List of used sources
    Bibliography,
    /// Annexes
    Annex,
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartType::Title => "title",
            PartType::Abstract => "abstract",
            PartType::Toc => "toc",
            PartType::Introduction => "introduction",
            PartType::Main => "main",
            PartType::Conclusion => "conclusion",
            PartType::Bibliography => "bibliography",
            PartType::Annex => "annex",
        };
        write!(f, "{}", name)
    }
}

/// Index of a node in a [`Hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// One node of the document hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Header paragraph; None only for the synthetic root
    pub header: Option<usize>,

    /// Part type for part titles, None for plain chapters and sections
    pub part: Option<PartType>,

    /// Nesting level (-1 for the root)
    pub level: i32,

    /// Paragraphs between this header and the next one
    pub content: Vec<usize>,

    /// Child nodes in document order
    pub children: Vec<NodeId>,

    /// Parent node; None for the root
    pub parent: Option<NodeId>,
}

impl Node {
    fn new(header: Option<usize>, part: Option<PartType>, level: i32, parent: Option<NodeId>) -> Self {
        Self {
            header,
            part,
            level,
            content: Vec::new(),
            children: Vec::new(),
            parent,
        }
    }
}

/// Tree of headers and their content, rooted at a synthetic node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hierarchy {
    nodes: Vec<Node>,
}

impl Hierarchy {
    /// Level of the synthetic root.
    pub const ROOT_LEVEL: i32 = -1;

    /// Create a hierarchy holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, None, Self::ROOT_LEVEL, None)],
        }
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a node mutably.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the hierarchy holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Append a new child under `parent` and return its id.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        header: usize,
        part: Option<PartType>,
        level: i32,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(Node::new(Some(header), part, level, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Last child of a node, if any.
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.last().copied()
    }

    /// Top-level node of the given part type (last one if duplicated).
    pub fn part(&self, part: PartType) -> Option<NodeId> {
        self.node(self.root())
            .children
            .iter()
            .rev()
            .copied()
            .find(|id| self.node(*id).part == Some(part))
    }

    /// Preorder walk yielding each node with its depth (root = 0).
    pub fn walk(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            for child in self.node(id).children.iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        out
    }

    /// Every paragraph of a subtree (headers and content) in document order.
    pub fn subtree_paragraphs(&self, id: NodeId) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current);
            out.extend(node.header);
            out.extend(node.content.iter().copied());
            stack.extend(node.children.iter().copied());
        }
        out.sort_unstable();
        out
    }

    /// Detach `count` children of `parent` starting at position `start`.
    ///
    /// Detached nodes stay in the arena until [`Hierarchy::compact`] runs.
    pub fn detach_children(&mut self, parent: NodeId, start: usize, count: usize) -> Vec<NodeId> {
        let removed: Vec<NodeId> = self.nodes[parent.0]
            .children
            .drain(start..start + count)
            .collect();
        for id in &removed {
            self.nodes[id.0].parent = None;
        }
        removed
    }

    /// Drop unreachable nodes and renumber the rest in preorder.
    pub fn compact(self) -> Self {
        let order = self.walk();
        let mut remap = vec![None; self.nodes.len()];
        for (new_index, (id, _)) in order.iter().enumerate() {
            remap[id.0] = Some(NodeId(new_index));
        }

        let mut nodes: Vec<Option<Node>> = self.nodes.into_iter().map(Some).collect();
        let mut compacted = Vec::with_capacity(order.len());
        for (id, _) in order {
            if let Some(mut node) = nodes[id.0].take() {
                node.parent = node.parent.and_then(|p| remap[p.0]);
                node.children = node.children.iter().filter_map(|c| remap[c.0]).collect();
                compacted.push(node);
            }
        }
        Self { nodes: compacted }
    }
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hierarchy {
        let mut h = Hierarchy::new();
        let root = h.root();
        let intro = h.add_child(root, 1, Some(PartType::Introduction), 0);
        h.node_mut(intro).content.push(2);
        let chapter = h.add_child(root, 3, None, 0);
        let section = h.add_child(chapter, 4, None, 1);
        h.node_mut(section).content.extend([5, 6]);
        h.node_mut(root).content.push(0);
        h
    }

    #[test]
    fn test_walk_preorder() {
        let h = sample();
        let headers: Vec<Option<usize>> = h
            .walk()
            .iter()
            .map(|(id, _)| h.node(*id).header)
            .collect();
        assert_eq!(headers, vec![None, Some(1), Some(3), Some(4)]);
        assert_eq!(h.walk()[3].1, 2);
    }

    #[test]
    fn test_subtree_paragraphs() {
        let h = sample();
        assert_eq!(h.subtree_paragraphs(h.root()), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(h.subtree_paragraphs(NodeId(2)), vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_part_lookup() {
        let h = sample();
        assert_eq!(h.part(PartType::Introduction), Some(NodeId(1)));
        assert_eq!(h.part(PartType::Bibliography), None);
    }

    #[test]
    fn test_detach_and_compact() {
        let mut h = sample();
        let root = h.root();
        let removed = h.detach_children(root, 1, 1);
        assert_eq!(removed, vec![NodeId(2)]);

        let h = h.compact();
        assert_eq!(h.len(), 2);
        assert_eq!(h.node(h.root()).children, vec![NodeId(1)]);
        assert_eq!(h.node(NodeId(1)).parent, Some(NodeId(0)));
    }
}
