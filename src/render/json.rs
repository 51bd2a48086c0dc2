//! JSON dump of the built tree

use super::{RenderBackend, RenderError, RenderOptions, ViewHandle};
use crate::tree::PhyloTree;

pub struct JsonBackend {
    pub pretty: bool,
}

pub struct JsonView {
    content: String,
}

impl ViewHandle for JsonView {
    fn fit(&mut self, _animate: bool) {}

    fn into_string(self) -> String {
        self.content
    }
}

impl RenderBackend for JsonBackend {
    type View = JsonView;

    fn render(&self, tree: &PhyloTree, _options: &RenderOptions) -> Result<JsonView, RenderError> {
        let content = if self.pretty {
            serde_json::to_string_pretty(tree)?
        } else {
            serde_json::to_string(tree)?
        };
        Ok(JsonView { content })
    }
}
