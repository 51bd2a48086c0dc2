//! Standalone HTML page that draws the tree with vis-network
//!
//! Layout, physics, hit-testing and drawing all happen in the browser; this
//! module only emits the node and edge DataSets and the network options.

use serde::Serialize;
use serde_json::json;

use super::{RenderBackend, RenderError, RenderOptions, ViewHandle};
use crate::tree::{PhyloTree, TreeEdge, TreeNode};

const PAGE_TEMPLATE: &str = include_str!("page.html");

const VIS_NETWORK_URL: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

const EDGE_COLOR: &str = "#2B7CE9";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VisNode<'a> {
    id: &'a str,
    label: &'a str,
    level: u32,
    color: VisNodeColor<'a>,
    size: f64,
    font: VisFont,
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct VisNodeColor<'a> {
    background: &'a str,
    border: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VisFont {
    size: f64,
    face: &'static str,
    color: &'static str,
    stroke_width: u32,
    stroke_color: &'static str,
}

#[derive(Debug, Serialize)]
struct VisEdge<'a> {
    id: String,
    from: &'a str,
    to: &'a str,
    width: f64,
    color: VisEdgeColor,
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct VisEdgeColor {
    color: &'static str,
    opacity: f64,
}

impl<'a> From<&'a TreeNode> for VisNode<'a> {
    fn from(node: &'a TreeNode) -> Self {
        Self {
            id: &node.id,
            label: &node.label,
            level: node.level,
            color: VisNodeColor {
                background: node.background(),
                border: node.border(),
            },
            size: node.size,
            font: VisFont {
                size: node.font_size,
                face: "arial",
                color: "#000000",
                stroke_width: 2,
                stroke_color: "#ffffff",
            },
            title: &node.tooltip,
        }
    }
}

impl<'a> From<&'a TreeEdge> for VisEdge<'a> {
    fn from(edge: &'a TreeEdge) -> Self {
        Self {
            id: format!("edge_{}", edge.key()),
            from: &edge.from,
            to: &edge.to,
            width: edge.width,
            color: VisEdgeColor {
                color: EDGE_COLOR,
                opacity: edge.opacity,
            },
            title: &edge.tooltip,
        }
    }
}

/// Renders a page that loads vis-network and draws the tree with a
/// hierarchical layout
pub struct HtmlBackend;

/// A rendered page. Each [`ViewHandle::fit`] adds a fit call run once the
/// network has stabilised.
#[derive(Debug, Clone)]
pub struct HtmlView {
    title: String,
    nodes: String,
    edges: String,
    options: String,
    fit_delay_ms: u64,
    fits: Vec<bool>,
}

impl HtmlView {
    pub fn nodes_json(&self) -> &str {
        &self.nodes
    }

    pub fn edges_json(&self) -> &str {
        &self.edges
    }

    pub fn options_json(&self) -> &str {
        &self.options
    }

    fn fit_script(&self) -> String {
        if self.fits.is_empty() {
            return String::new();
        }
        let calls: Vec<String> = self
            .fits
            .iter()
            .map(|animate| format!("    network.fit({{ animation: {} }});", animate))
            .collect();
        format!(
            "network.once('stabilizationIterationsDone', function () {{\n{}\n}});",
            calls.join("\n")
        )
    }
}

impl ViewHandle for HtmlView {
    fn fit(&mut self, animate: bool) {
        self.fits.push(animate);
    }

    fn into_string(self) -> String {
        let title = escape_html(&self.title);
        let fit_delay = self.fit_delay_ms.to_string();
        let fits = self.fit_script();
        let nodes = script_safe(&self.nodes);
        let edges = script_safe(&self.edges);
        let options = script_safe(&self.options);

        fill_template(
            PAGE_TEMPLATE,
            &[
                ("__TITLE__", &title),
                ("__VIS_NETWORK_URL__", VIS_NETWORK_URL),
                ("__FIT_DELAY_MS__", &fit_delay),
                ("__EXTRA_FITS__", &fits),
                ("__NODES__", &nodes),
                ("__EDGES__", &edges),
                ("__OPTIONS__", &options),
            ],
        )
    }
}

impl RenderBackend for HtmlBackend {
    type View = HtmlView;

    fn render(&self, tree: &PhyloTree, options: &RenderOptions) -> Result<HtmlView, RenderError> {
        let nodes: Vec<VisNode> = tree.nodes.iter().map(VisNode::from).collect();
        let edges: Vec<VisEdge> = tree.edges.iter().map(VisEdge::from).collect();

        Ok(HtmlView {
            title: options.view.title.clone(),
            nodes: serde_json::to_string(&nodes)?,
            edges: serde_json::to_string(&edges)?,
            options: serde_json::to_string(&network_options(options))?,
            fit_delay_ms: options.view.fit_delay_ms,
            fits: Vec::new(),
        })
    }
}

fn network_options(options: &RenderOptions) -> serde_json::Value {
    let layout = &options.layout;
    let physics = &options.physics;

    json!({
        "physics": {
            "enabled": true,
            "hierarchicalRepulsion": {
                "nodeDistance": physics.node_distance,
                "springLength": physics.spring_length,
            },
            "stabilization": {
                "iterations": physics.stabilization_iterations,
                "updateInterval": physics.update_interval,
            },
        },
        "layout": {
            "hierarchical": {
                "enabled": true,
                "direction": layout.direction,
                "sortMethod": "directed",
                "levelSeparation": layout.level_separation,
                "nodeSpacing": layout.node_spacing,
                "treeSpacing": layout.tree_spacing,
                "blockShifting": true,
                "edgeMinimization": true,
                "parentCentralization": true,
            },
        },
        "interaction": {
            "dragNodes": false,
            "dragView": true,
            "zoomView": true,
            "hover": true,
            "tooltipDelay": options.view.tooltip_delay_ms,
        },
    })
}

/// Substitute placeholders in one left-to-right pass. Inserted values are
/// never scanned for further placeholders.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|&(placeholder, value)| {
                rest.find(placeholder).map(|pos| (pos, placeholder, value))
            })
            .min_by_key(|&(pos, _, _)| pos);
        let Some((pos, placeholder, value)) = next else {
            break;
        };
        output.push_str(&rest[..pos]);
        output.push_str(value);
        rest = &rest[pos + placeholder.len()..];
    }

    output.push_str(rest);
    output
}

/// Keep embedded JSON from closing the surrounding script element
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
