//! Level-based visual scaling for tree nodes and edges

use crate::strain::{COMPLETE_COLOR, INCOMPLETE_COLOR};

/// Background for nodes without a category
pub const DEFAULT_BACKGROUND: &str = INCOMPLETE_COLOR;
/// Border for every node
pub const DEFAULT_BORDER: &str = COMPLETE_COLOR;

const NODE_SIZE_BASE: f64 = 25.0;
const NODE_SIZE_STEP: f64 = 2.0;
const NODE_SIZE_MIN: f64 = 15.0;

const FONT_SIZE_BASE: f64 = 16.0;
const FONT_SIZE_STEP: f64 = 0.5;
const FONT_SIZE_MIN: f64 = 12.0;

const EDGE_WIDTH_BASE: f64 = 2.0;
const EDGE_WIDTH_STEP: f64 = 0.3;
const EDGE_WIDTH_MIN: f64 = 1.0;

const EDGE_OPACITY_BASE: f64 = 0.8;
const EDGE_OPACITY_STEP: f64 = 0.1;
const EDGE_OPACITY_MIN: f64 = 0.3;

/// Computes sizes, opacities and tooltips from a node's depth in the tree.
///
/// Every value shrinks linearly with the level and is floored at a fixed
/// minimum, so deep nodes stay readable.
pub struct LevelStyler;

impl LevelStyler {
    pub fn new() -> Self {
        Self
    }

    pub fn node_size(&self, level: u32) -> f64 {
        scaled(NODE_SIZE_BASE, NODE_SIZE_STEP, NODE_SIZE_MIN, level)
    }

    pub fn font_size(&self, level: u32) -> f64 {
        scaled(FONT_SIZE_BASE, FONT_SIZE_STEP, FONT_SIZE_MIN, level)
    }

    /// Width of an edge whose parent endpoint sits at `level`
    pub fn edge_width(&self, level: u32) -> f64 {
        scaled(EDGE_WIDTH_BASE, EDGE_WIDTH_STEP, EDGE_WIDTH_MIN, level)
    }

    /// Opacity of an edge whose parent endpoint sits at `level`
    pub fn edge_opacity(&self, level: u32) -> f64 {
        scaled(EDGE_OPACITY_BASE, EDGE_OPACITY_STEP, EDGE_OPACITY_MIN, level)
    }

    pub fn node_tooltip(&self, label: &str, rsp: Option<&str>) -> String {
        format!("{}<br>RSP: {}", label, rsp.unwrap_or("Unknown"))
    }

    pub fn edge_tooltip(&self, distance: f64) -> String {
        format!("Genetic Distance: {}", format_distance(distance))
    }
}

/// Distance with three decimals, halfway cases rounded away from zero.
///
/// `{:.3}` already rounds every inexact value correctly. The only values
/// sitting exactly on a halfway point are odd multiples of 1/16, which
/// `{:.3}` would round to even.
pub fn format_distance(distance: f64) -> String {
    let sixteenths = distance * 16.0;
    let is_halfway = sixteenths.is_finite()
        && sixteenths.fract() == 0.0
        && sixteenths.abs() % 2.0 == 1.0;
    if !is_halfway {
        return format!("{:.3}", distance);
    }

    let thousandths = (distance.abs() * 1000.0).ceil() as u64;
    let sign = if distance < 0.0 { "-" } else { "" };
    format!("{}{}.{:03}", sign, thousandths / 1000, thousandths % 1000)
}

impl Default for LevelStyler {
    fn default() -> Self {
        Self::new()
    }
}

fn scaled(base: f64, step: f64, min: f64, level: u32) -> f64 {
    (base - step * f64::from(level)).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    #[rstest]
    #[case(0, 25.0, 16.0)]
    #[case(1, 23.0, 15.5)]
    #[case(5, 15.0, 13.5)]
    #[case(8, 15.0, 12.0)]
    #[case(40, 15.0, 12.0)]
    fn test_node_scaling(#[case] level: u32, #[case] size: f64, #[case] font: f64) {
        let styler = LevelStyler::new();
        assert!((styler.node_size(level) - size).abs() < EPS);
        assert!((styler.font_size(level) - font).abs() < EPS);
    }

    #[rstest]
    #[case(0, 2.0, 0.8)]
    #[case(1, 1.7, 0.7)]
    #[case(3, 1.1, 0.5)]
    #[case(4, 1.0, 0.4)]
    #[case(10, 1.0, 0.3)]
    fn test_edge_scaling(#[case] level: u32, #[case] width: f64, #[case] opacity: f64) {
        let styler = LevelStyler::new();
        assert!((styler.edge_width(level) - width).abs() < EPS);
        assert!((styler.edge_opacity(level) - opacity).abs() < EPS);
    }

    #[test]
    fn test_scaling_never_increases_with_level() {
        let styler = LevelStyler::new();
        for level in 0..50 {
            assert!(styler.node_size(level + 1) <= styler.node_size(level));
            assert!(styler.font_size(level + 1) <= styler.font_size(level));
            assert!(styler.edge_width(level + 1) <= styler.edge_width(level));
            assert!(styler.edge_opacity(level + 1) <= styler.edge_opacity(level));
        }
    }

    #[test]
    fn test_tooltips() {
        let styler = LevelStyler::new();
        assert_eq!(
            styler.node_tooltip("Blue Dream", Some("RSP10001")),
            "Blue Dream<br>RSP: RSP10001"
        );
        assert_eq!(styler.node_tooltip("Haze", None), "Haze<br>RSP: Unknown");
        assert_eq!(styler.edge_tooltip(0.12345), "Genetic Distance: 0.123");
        assert_eq!(styler.edge_tooltip(0.0625), "Genetic Distance: 0.063");
    }

    #[rstest]
    #[case(0.0625, "0.063")]
    #[case(0.3125, "0.313")]
    #[case(0.1875, "0.188")]
    #[case(1.0625, "1.063")]
    #[case(-0.0625, "-0.063")]
    #[case(0.08, "0.080")]
    #[case(0.12345, "0.123")]
    #[case(0.0005, "0.001")]
    #[case(0.5, "0.500")]
    #[case(0.0, "0.000")]
    fn test_format_distance(#[case] distance: f64, #[case] expected: &str) {
        assert_eq!(format_distance(distance), expected);
    }
}
