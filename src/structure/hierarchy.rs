//! Hierarchy assembly.
//!
//! Header tokens (part titles and main-part headers) are folded into a tree
//! with a stack of open nodes. Each token is classified by [`plan`] into a
//! [`Transition`] before the tree is touched, which keeps the level logic
//! testable on its own.

use super::headers::Header;
use super::parts::DocumentParts;
use crate::model::{Hierarchy, NodeId, Paragraph, PartType};

/// A header paragraph to place in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Header paragraph
    pub paragraph: usize,

    /// Nesting level
    pub level: i32,

    /// Part type for part titles
    pub part: Option<PartType>,
}

impl From<&Header> for Token {
    fn from(header: &Header) -> Self {
        Self {
            paragraph: header.paragraph,
            level: header.level as i32,
            part: None,
        }
    }
}

/// Merge part titles (level 0) and main-part headers into document order.
pub fn tokens(parts: &DocumentParts, headers: &[Header]) -> Vec<Token> {
    let mut tokens: Vec<Token> = parts
        .title_paragraphs()
        .into_iter()
        .map(|(paragraph, part)| Token {
            paragraph,
            level: 0,
            part: Some(part),
        })
        .chain(headers.iter().map(Token::from))
        .collect();
    tokens.sort_by_key(|t| t.paragraph);
    tokens.dedup_by_key(|t| t.paragraph);
    tokens
}

/// How a token relates to the open nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same level: new sibling under the stack top
    AwaitingSibling,
    /// Deeper: open the given node and append under it; `None` when the
    /// stack top has no child to open
    DescendingInto(Option<NodeId>),
    /// Shallower: close nodes until one below this level is on top
    AscendingTo(i32),
}

/// Decide the transition for a token at `level`.
pub fn plan(last_level: i32, level: i32, last_child: Option<NodeId>) -> Transition {
    if level == last_level {
        Transition::AwaitingSibling
    } else if level > last_level {
        Transition::DescendingInto(last_child)
    } else {
        Transition::AscendingTo(level)
    }
}

/// Stack-based tree builder.
pub struct HierarchyBuilder {
    hierarchy: Hierarchy,
    stack: Vec<NodeId>,
    last_level: i32,
    current: NodeId,
    cursor: usize,
}

impl HierarchyBuilder {
    /// Create a builder holding only the root.
    pub fn new() -> Self {
        let hierarchy = Hierarchy::new();
        let root = hierarchy.root();
        Self {
            hierarchy,
            stack: vec![root],
            last_level: 0,
            current: root,
            cursor: 0,
        }
    }

    fn top(&self) -> NodeId {
        self.stack.last().copied().unwrap_or_else(|| self.hierarchy.root())
    }

    fn flush(&mut self, until: usize) {
        if self.cursor < until {
            let current = self.current;
            self.hierarchy
                .node_mut(current)
                .content
                .extend(self.cursor..until);
        }
    }

    /// Place one token. Tokens must arrive in document order.
    pub fn push(&mut self, token: Token) -> NodeId {
        self.flush(token.paragraph);
        self.cursor = self.cursor.max(token.paragraph + 1);

        let top = self.top();
        let transition = plan(self.last_level, token.level, self.hierarchy.last_child(top));
        let parent = match transition {
            Transition::AwaitingSibling => top,
            Transition::DescendingInto(Some(node)) => {
                self.stack.push(node);
                self.last_level = token.level;
                node
            }
            Transition::DescendingInto(None) => {
                self.last_level = token.level;
                top
            }
            Transition::AscendingTo(level) => {
                while self.stack.len() > 1 && self.hierarchy.node(self.top()).level >= level {
                    self.stack.pop();
                }
                self.last_level = level;
                self.top()
            }
        };

        let id = self
            .hierarchy
            .add_child(parent, token.paragraph, token.part, token.level);
        self.current = id;
        id
    }

    /// Flush trailing paragraphs and return the tree.
    pub fn finish(mut self, paragraph_count: usize) -> Hierarchy {
        self.flush(paragraph_count);
        self.hierarchy
    }
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the document tree and point every paragraph at its node.
pub fn build_hierarchy(paragraphs: &mut [Paragraph], tokens: &[Token]) -> Hierarchy {
    let mut builder = HierarchyBuilder::new();
    for token in tokens {
        builder.push(*token);
    }
    let hierarchy = builder.finish(paragraphs.len());
    let hierarchy = absorb_bibliography_entries(hierarchy, paragraphs);
    assign_nodes(&hierarchy, paragraphs);
    log::debug!("built hierarchy with {} nodes", hierarchy.len());
    hierarchy
}

/// Demote untyped top-level nodes that follow the bibliography.
///
/// Numbered entries such as "1. Шотт, А.В. ..." may be classified as
/// headers. Every root child after the last bibliography node, up to the
/// next typed part, is folded back into the bibliography content.
fn absorb_bibliography_entries(mut hierarchy: Hierarchy, paragraphs: &mut [Paragraph]) -> Hierarchy {
    let root = hierarchy.root();
    let siblings = hierarchy.node(root).children.clone();

    let Some(bib_pos) = siblings
        .iter()
        .rposition(|id| hierarchy.node(*id).part == Some(PartType::Bibliography))
    else {
        return hierarchy;
    };
    let bibliography = siblings[bib_pos];

    let start = bib_pos + 1;
    let end = siblings[start..]
        .iter()
        .position(|id| hierarchy.node(*id).part.is_some())
        .map(|offset| start + offset)
        .unwrap_or(siblings.len());
    if start == end {
        return hierarchy;
    }

    let mut absorbed = Vec::new();
    for id in &siblings[start..end] {
        let node = hierarchy.node(*id);
        if let Some(header) = node.header {
            paragraphs[header].meta.is_header = false;
        }
        absorbed.extend(hierarchy.subtree_paragraphs(*id));
    }
    for index in &absorbed {
        paragraphs[*index].meta.is_header = false;
    }
    log::debug!("moved {} paragraphs back into the bibliography", absorbed.len());

    let content = &mut hierarchy.node_mut(bibliography).content;
    content.extend(absorbed);
    content.sort_unstable();

    hierarchy.detach_children(root, start, end - start);
    hierarchy.compact()
}

fn assign_nodes(hierarchy: &Hierarchy, paragraphs: &mut [Paragraph]) {
    for (id, _) in hierarchy.walk() {
        let node = hierarchy.node(id);
        for index in node.header.iter().chain(node.content.iter()) {
            if let Some(p) = paragraphs.get_mut(*index) {
                p.meta.node = Some(id);
            }
        }
    }
}
