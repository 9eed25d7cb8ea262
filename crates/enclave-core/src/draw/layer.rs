//! Layer-based z-ordering for SVG output.
//!
//! Painted elements declare which layer they belong to; a [`LayeredOutput`]
//! collects them in any order and emits one `<g data-layer="...">` group per
//! non-empty layer, bottom to top.
//!
//! # Example
//!
//! ```
//! # use enclave_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Rectangle, Text};
//!
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Label, Box::new(Text::new("api")));
//! output.add_to_layer(RenderLayer::Frame, Box::new(Rectangle::new()));
//!
//! // Frame renders first even though it was added last
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers inside one container, bottom to top.
///
/// The `Ord` derive uses declaration order, so the first variant renders first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Boundary frames and fills
    Frame,
    /// Shapes, sprites, raw content, and nested boundary groups
    Content,
    /// Connector lines
    Connector,
    /// Port markers
    Port,
    /// Animated flow tokens
    Flow,
    /// Text nodes, titles, and connector labels
    Label,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Frame => "frame",
            Self::Content => "content",
            Self::Connector => "connector",
            Self::Port => "port",
            Self::Flow => "flow",
            Self::Label => "label",
        }
    }
}

/// SVG nodes grouped by rendering layer.
///
/// Within a layer, nodes keep the order in which they were added.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends all nodes from another `LayeredOutput`.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g data-layer="...">` element; empty
    /// layers are skipped. The sort is stable, so insertion order is kept
    /// within a layer.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
