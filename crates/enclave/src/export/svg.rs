//! SVG paint pass.
//!
//! [`Svg`] resolves everything it needs up front (paint order, containment
//! regions, connector routes, marker colors) and then emits one group per
//! container: the scene root and each boundary. A boundary group carries its
//! `clip-path` or `mask` attribute when the boundary needs containment.

mod connector;
mod containment;
mod node;

use log::{debug, warn};
use svg::{
    Document,
    node::{Value, element as svg_element},
};

use enclave_core::{
    color::Color,
    draw::{ArrowMarkers, LayeredOutput, RenderLayer},
    geometry::{Insets, Rect},
    scene::Node,
};

use crate::{
    config::AppConfig,
    containment::{Containment, collect_with_index, composite},
    enforce::EnforcementResult,
    index::SceneIndex,
    render::{PaintItem, flatten},
};

use connector::{PlacedFlow, PlacedPort, RoutedConnector};

/// Paint state for one validated scene.
pub(crate) struct Svg<'a> {
    config: &'a AppConfig,
    result: &'a EnforcementResult,
    containment: Containment,
    items: Vec<PaintItem<'a>>,
    connectors: Vec<RoutedConnector<'a>>,
    ports: Vec<PlacedPort<'a>>,
    flows: Vec<PlacedFlow<'a>>,
    markers: ArrowMarkers,
}

impl<'a> Svg<'a> {
    pub fn new(config: &'a AppConfig, result: &'a EnforcementResult) -> Self {
        let index = SceneIndex::build(&result.scene);
        let mut markers = ArrowMarkers::new();

        let connectors = connector::route_connectors(result, &index, &mut markers);
        let ports = connector::place_ports(result, &index);
        let flows = connector::place_flows(result, &connectors);

        Self {
            config,
            result,
            containment: collect_with_index(result, &index, config),
            items: flatten(&result.scene, &result.rects),
            connectors,
            ports,
            flows,
            markers,
        }
    }

    /// Renders the complete scene to an SVG document.
    pub fn render_document(self) -> Document {
        let view = self.view_box();
        debug!(view:? = view; "SVG view box");

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("{} {} {} {}", view.x(), view.y(), view.width(), view.height()),
            )
            .set("width", view.width())
            .set("height", view.height());

        if let Some(defs) = self.containment_definitions() {
            doc = doc.add(defs);
        }
        if !self.markers.is_empty() {
            doc = doc.add(self.markers.definitions());
        }
        if let Some(background) = self.background() {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", view.x())
                    .set("y", view.y())
                    .set("width", view.width())
                    .set("height", view.height())
                    .set("fill", &background)
                    .set("fill-opacity", background.alpha()),
            );
        }

        let root = svg_element::Group::new()
            .set("id", format!("scene-{}", self.result.scene.id))
            .set("data-kind", "scene");
        let root = self
            .render_container(None)
            .render()
            .into_iter()
            .fold(root, |group, node| group.add(node));

        doc.add(root)
    }

    /// Canvas rectangle: the scene's explicit size, or the content extent
    /// plus the configured margin.
    fn view_box(&self) -> Rect {
        let scene = &self.result.scene;
        let extent = composite(self.items.iter().map(|item| item.rect))
            .unwrap_or_default()
            .add_padding(Insets::uniform(self.config.render().canvas_margin()));

        let (x, width) = match scene.width {
            Some(width) => (0.0, width),
            None => (extent.x(), extent.width()),
        };
        let (y, height) = match scene.height {
            Some(height) => (0.0, height),
            None => (extent.y(), extent.height()),
        };
        Rect::new(x, y, width, height)
    }

    /// The scene's own background wins over the configured one.
    fn background(&self) -> Option<Color> {
        if let Some(value) = self.result.scene.background.as_deref() {
            match Color::new(value) {
                Ok(color) => return Some(color),
                Err(err) => warn!(err:%; "Invalid scene background, using configured color"),
            }
        }
        match self.config.style().background_color() {
            Ok(color) => color,
            Err(err) => {
                warn!(err:%; "Ignoring configured background");
                None
            }
        }
    }

    /// Paints every item, connector, port, and flow that lives directly in
    /// `container`.
    fn render_container(&self, container: Option<&str>) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        for item in self.items.iter().filter(|item| item.container == container) {
            match item.node {
                Node::Boundary(boundary) => {
                    output.add_to_layer(RenderLayer::Content, self.render_boundary(boundary, item.rect));
                }
                Node::Shape(shape) => {
                    output.add_to_layer(RenderLayer::Content, self.render_shape(shape, item.rect));
                }
                Node::Sprite(sprite) => {
                    output.add_to_layer(RenderLayer::Content, self.render_sprite(sprite, item.rect));
                }
                Node::Raw(raw) => {
                    output.add_to_layer(RenderLayer::Content, self.render_raw(raw, item.rect));
                }
                Node::Text(text) => {
                    output.add_to_layer(RenderLayer::Label, self.render_text(text, item.rect));
                }
                Node::Group(_) => {}
            }
        }

        for routed in self.connectors.iter().filter(|c| c.container == container) {
            output.merge(self.render_connector(routed));
        }
        for placed in self.ports.iter().filter(|p| p.container == container) {
            output.add_to_layer(RenderLayer::Port, self.render_port(placed));
        }
        for placed in self.flows.iter().filter(|f| f.container == container) {
            output.add_to_layer(RenderLayer::Flow, self.render_flow(placed));
        }

        output
    }
}

/// Parses an optional CSS color, falling back when absent or invalid.
fn resolve_color(value: Option<&str>, fallback: &str, owner: &str) -> Color {
    value
        .and_then(|value| {
            Color::new(value)
                .map_err(|err| warn!(owner = owner, err:%; "Invalid color, using fallback"))
                .ok()
        })
        .or_else(|| Color::new(fallback).ok())
        .unwrap_or_default()
}

/// Like [`resolve_color`], but an absent or invalid color paints nothing.
fn fill_or_none(value: Option<&str>, owner: &str) -> Value {
    match value.map(Color::new) {
        Some(Ok(color)) => Value::from(&color),
        Some(Err(err)) => {
            warn!(owner = owner, err:%; "Invalid color, leaving unfilled");
            Value::from("none")
        }
        None => Value::from("none"),
    }
}
