//! Outline tree types: heading levels and the nested node structure.

use serde::{Deserialize, Serialize};

/// Structural level of an outline node.
///
/// `Title` is the document root; `H1`–`H3` are the three heading depths
/// the hierarchy assigner collapses everything into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutlineLevel {
    Title,
    H1,
    H2,
    H3,
}

impl OutlineLevel {
    /// Numeric depth: Title = 0, H1 = 1, H2 = 2, H3 = 3.
    pub fn depth(self) -> u8 {
        match self {
            OutlineLevel::Title => 0,
            OutlineLevel::H1 => 1,
            OutlineLevel::H2 => 2,
            OutlineLevel::H3 => 3,
        }
    }

    /// Heading level from a 1-based depth, capped at H3.
    pub fn from_depth(depth: u8) -> Self {
        match depth {
            0 => OutlineLevel::Title,
            1 => OutlineLevel::H1,
            2 => OutlineLevel::H2,
            _ => OutlineLevel::H3,
        }
    }
}

impl std::fmt::Display for OutlineLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutlineLevel::Title => "Title",
            OutlineLevel::H1 => "H1",
            OutlineLevel::H2 => "H2",
            OutlineLevel::H3 => "H3",
        };
        write!(f, "{}", s)
    }
}

/// A node in the extracted heading hierarchy.
///
/// Invariants: children's levels are strictly deeper than the parent's,
/// and siblings appear in non-decreasing page order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Heading level (H1/H2/H3 below the title)
    pub level: OutlineLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-based)
    pub page: u32,
    /// Nested sub-headings
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a leaf node.
    pub fn new(level: OutlineLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
            children: Vec::new(),
        }
    }
}

/// Extraction result for one document: title plus the top-level sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title (possibly empty when none qualified)
    pub title: String,
    /// Top-level heading nodes
    pub outline: Vec<OutlineNode>,
}

impl DocumentOutline {
    /// Total number of heading nodes in the tree.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[OutlineNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.outline)
    }

    /// Visit every node in the tree depth-first, in page order.
    pub fn walk(&self, mut visit: impl FnMut(&OutlineNode)) {
        fn walk_nodes(nodes: &[OutlineNode], visit: &mut impl FnMut(&OutlineNode)) {
            for node in nodes {
                visit(node);
                walk_nodes(&node.children, visit);
            }
        }
        walk_nodes(&self.outline, &mut visit);
    }

    /// Check the structural invariant: every child strictly deeper than
    /// its parent, siblings non-decreasing by page.
    pub fn is_well_formed(&self) -> bool {
        fn check(nodes: &[OutlineNode], parent_depth: u8) -> bool {
            let mut last_page = 0u32;
            for node in nodes {
                if node.level.depth() <= parent_depth || node.page < last_page {
                    return false;
                }
                last_page = node.page;
                if !check(&node.children, node.level.depth()) {
                    return false;
                }
            }
            true
        }
        check(&self.outline, OutlineLevel::Title.depth())
    }
}
