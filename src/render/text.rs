//! Plain-text tree rendering

use std::collections::HashMap;

use super::{RenderBackend, RenderError, RenderOptions, ViewHandle};
use crate::tree::{format_distance, PhyloTree, TreeEdge, TreeNode};

/// Draws the tree with box-drawing connectors
pub struct TextBackend;

pub struct TextView {
    content: String,
}

impl ViewHandle for TextView {
    /// Text has no viewport
    fn fit(&mut self, _animate: bool) {}

    fn into_string(self) -> String {
        self.content
    }
}

impl RenderBackend for TextBackend {
    type View = TextView;

    fn render(&self, tree: &PhyloTree, _options: &RenderOptions) -> Result<TextView, RenderError> {
        Ok(TextView {
            content: render_to_string(tree),
        })
    }
}

/// A line still to be written: the edge leading to it, the prefix drawn
/// before its connector and whether it is the last of its siblings
struct PendingLine<'t> {
    edge: &'t TreeEdge,
    prefix: String,
    is_last: bool,
}

/// Render a tree to a string, one strain per line
pub fn render_to_string(tree: &PhyloTree) -> String {
    let mut output = String::new();
    let Some(root) = tree.root() else {
        return output;
    };

    let nodes: HashMap<&str, &TreeNode> = tree.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let mut children: HashMap<&str, Vec<&TreeEdge>> = HashMap::new();
    for edge in &tree.edges {
        children.entry(edge.from.as_str()).or_default().push(edge);
    }

    output.push_str(&node_line(root, None));
    output.push('\n');

    let mut stack: Vec<PendingLine> = Vec::new();
    push_children(&mut stack, &children, &root.id, "");

    while let Some(line) = stack.pop() {
        let Some(child) = nodes.get(line.edge.to.as_str()) else {
            continue;
        };
        let connector = if line.is_last { "└── " } else { "├── " };

        output.push_str(&line.prefix);
        output.push_str(connector);
        output.push_str(&node_line(child, Some(line.edge.distance)));
        output.push('\n');

        let child_prefix = format!("{}{}", line.prefix, if line.is_last { "    " } else { "│   " });
        push_children(&mut stack, &children, &child.id, &child_prefix);
    }
    output
}

/// Queue the children of `id` so the first child is popped first
fn push_children<'t>(
    stack: &mut Vec<PendingLine<'t>>,
    children: &HashMap<&str, Vec<&'t TreeEdge>>,
    id: &str,
    prefix: &str,
) {
    let Some(edges) = children.get(id) else {
        return;
    };
    for (i, &edge) in edges.iter().enumerate().rev() {
        stack.push(PendingLine {
            edge,
            prefix: prefix.to_string(),
            is_last: i == edges.len() - 1,
        });
    }
}

fn node_line(node: &TreeNode, distance: Option<f64>) -> String {
    let mut line = node.label.clone();
    if let Some(rsp) = &node.rsp {
        line.push_str(&format!(" ({})", rsp));
    }
    if let Some(d) = distance {
        line.push_str(&format!(" [{}]", format_distance(d)));
    }
    line
}
