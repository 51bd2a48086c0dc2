//! Render backends for built trees
//!
//! A backend takes the node and edge sets plus layout options and returns
//! a view. The view can be asked to fit the whole tree into the viewport
//! and is finally turned into the text handed to the user.

mod html;
mod json;
mod text;

use thiserror::Error;

use crate::config::{Config, LayoutConfig, PhysicsConfig, ViewConfig};
use crate::tree::PhyloTree;

pub use html::{HtmlBackend, HtmlView};
pub use json::{JsonBackend, JsonView};
pub use text::{render_to_string, TextBackend, TextView};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to serialize tree: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Layout, physics and view settings passed to a backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub layout: LayoutConfig,
    pub physics: PhysicsConfig,
    pub view: ViewConfig,
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            layout: config.layout.clone(),
            physics: config.physics.clone(),
            view: config.view.clone(),
        }
    }
}

/// A rendered tree
pub trait ViewHandle {
    /// Fit the whole tree into the viewport
    fn fit(&mut self, animate: bool);

    /// Final output of the view
    fn into_string(self) -> String;
}

pub trait RenderBackend {
    type View: ViewHandle;

    fn render(&self, tree: &PhyloTree, options: &RenderOptions) -> Result<Self::View, RenderError>;
}
