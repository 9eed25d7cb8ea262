//! The two-pass render: validate, then paint.
//!
//! [`Validated`] is the only state between the passes. It is created by
//! running enforcement and consumed (or borrowed) by the paint pass; nothing
//! survives the call.

use chrono::Utc;
use log::info;

use enclave_core::{
    diagnostic::{Diagnostic, DiagnosticSummary},
    geometry::{Point, Rect},
    scene::{Node, Scene},
};

use crate::{
    config::AppConfig,
    enforce::{EnforcementResult, RectTable, enforce},
    export::svg::Svg,
    report::{DiagnosticReport, build_report},
};

/// A scene that has been through the validate pass.
#[derive(Debug, Clone)]
pub struct Validated {
    result: EnforcementResult,
}

impl Validated {
    /// Runs the validate pass.
    pub fn new(scene: &Scene) -> Self {
        Self {
            result: enforce(scene),
        }
    }

    pub fn result(&self) -> &EnforcementResult {
        &self.result
    }

    pub fn into_result(self) -> EnforcementResult {
        self.result
    }

    /// Runs the paint pass and returns the SVG markup.
    pub fn paint(&self, config: &AppConfig) -> String {
        let markup = Svg::new(config, &self.result).render_document().to_string();
        info!(bytes = markup.len(); "Scene painted");
        markup
    }

    /// Builds the diagnostic report of this pass, stamped with the current
    /// time. `scene` is the input the pass ran on.
    pub fn report(&self, scene: &Scene) -> DiagnosticReport {
        build_report(scene, &self.result, Utc::now())
    }
}

/// Markup together with the validate pass diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub markup: String,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: DiagnosticSummary,
}

/// A node ready to paint, with its absolute rectangle.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PaintItem<'a> {
    pub node: &'a Node,
    pub rect: Rect,
    /// Nearest enclosing boundary id; `None` for the scene root.
    pub container: Option<&'a str>,
    pub z: i32,
}

/// Flattens a scene into paint order.
///
/// Rectangles come from the validate pass; a node missing from `rects` falls
/// back to its `at` plus the parent origin. Items are stably sorted by `z`,
/// so declaration order breaks ties. A group adds its own `z` to its
/// children's.
pub(crate) fn flatten<'a>(scene: &'a Scene, rects: &RectTable) -> Vec<PaintItem<'a>> {
    fn visit<'a>(
        node: &'a Node,
        origin: Point,
        container: Option<&'a str>,
        z_base: i32,
        rects: &RectTable,
        items: &mut Vec<PaintItem<'a>>,
    ) {
        let z = z_base + node.z();
        let (Some(at), Some(size)) = (node.at(), node.size()) else {
            for child in node.children() {
                visit(child, origin, container, z, rects, items);
            }
            return;
        };

        let rect = rects
            .get(node.id())
            .unwrap_or_else(|| Rect::from_origin_size(origin.add_point(at), size));
        items.push(PaintItem {
            node,
            rect,
            container,
            z,
        });

        if let Node::Boundary(boundary) = node {
            for child in &boundary.children {
                visit(child, rect.origin(), Some(boundary.id.as_str()), 0, rects, items);
            }
        }
    }

    let mut items = Vec::new();
    for node in &scene.nodes {
        visit(node, Point::default(), None, 0, rects, &mut items);
    }
    items.sort_by_key(|item| item.z);
    items
}
