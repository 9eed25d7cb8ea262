//! Boundary enforcement: the validate pass.
//!
//! [`enforce`] walks a private copy of the scene depth-first, pre-order,
//! children in declaration order. Each positioned node gets an absolute
//! rectangle, optionally snapped to its boundary's grid, checked against the
//! enclosing boundary, and corrected when the boundary's policy says so.
//! The resulting rectangles are recorded in a [`RectTable`] keyed by node id;
//! the caller's scene is never touched.
//!
//! Ports and connectors are checked after the walk, against corrected
//! rectangles.

use indexmap::IndexMap;
use log::{debug, info, trace, warn};

use enclave_core::{
    diagnostic::{Actual, Diagnostic, DiagnosticCode, DiagnosticSummary, Severity, SuggestedFix},
    geometry::{Point, Rect, Size},
    scene::{Grid, Mode, Node, Overflow, Policy, Scene, SnapOrigin},
};

use crate::{
    index::SceneIndex,
    port::{PortBoundary, PortHost, validate_port},
};

/// Absolute rectangles computed by the validate pass, keyed by node id.
///
/// Groups have no rectangle and never appear in the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RectTable {
    rects: IndexMap<String, Rect>,
}

impl RectTable {
    pub fn get(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    pub(crate) fn insert(&mut self, id: impl Into<String>, rect: Rect) {
        self.rects.insert(id.into(), rect);
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Iterates rectangles in walk order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rect)> {
        self.rects.iter().map(|(id, rect)| (id.as_str(), *rect))
    }
}

/// Output of the validate pass.
#[derive(Debug, Clone)]
pub struct EnforcementResult {
    /// Copy of the input with corrected `at`/`size` on affected nodes.
    pub scene: Scene,
    pub rects: RectTable,
    /// Walk diagnostics in pre-order, then ports, then connectors.
    pub diagnostics: Vec<Diagnostic>,
    pub summary: DiagnosticSummary,
}

/// The boundary enclosing the nodes currently being visited.
#[derive(Debug)]
struct Enclosing<'a> {
    id: &'a str,
    rect: Rect,
    policy: Policy,
    grid: Option<Grid>,
}

/// Mutable state for one enforcement call.
#[derive(Debug, Default)]
struct EnforceContext {
    rects: RectTable,
    diagnostics: Vec<Diagnostic>,
}

impl EnforceContext {
    fn visit(&mut self, node: &mut Node, origin: Point, enclosing: Option<&Enclosing<'_>>) {
        trace!(node_id = node.id(), kind = node.kind_name(); "Visiting node");

        let (Some(at), Some(size)) = (node.at(), node.size()) else {
            // Groups pass their parent's origin and boundary straight through.
            if let Some(children) = node.children_mut() {
                for child in children {
                    self.visit(child, origin, enclosing);
                }
            }
            return;
        };

        let (at, size) = place_in_grid(node, at, size, enclosing);
        let id = node.id().to_string();
        let declared = Rect::from_origin_size(origin.add_point(at), size);

        if size.is_negative() {
            let mut diag = Diagnostic::error(
                DiagnosticCode::NegSize,
                &id,
                format!(
                    "node `{id}` has negative size {}x{}",
                    size.width(),
                    size.height()
                ),
            )
            .with_actual(Actual::Size(size));
            if let Some(boundary) = enclosing {
                diag = diag.with_boundary(boundary.id);
            }
            self.diagnostics.push(diag);
        }

        let corrected = match enclosing {
            Some(boundary) => self.contain(&id, declared, origin, boundary),
            None => declared,
        };

        if corrected != declared {
            debug!(node_id = id, rect:? = corrected; "Corrected node");
            node.set_at(corrected.origin().sub_point(origin));
            node.set_size(corrected.size());
        }
        self.rects.insert(id.as_str(), corrected);

        if let Node::Boundary(boundary) = node {
            let inner = Enclosing {
                id: &boundary.id,
                rect: corrected,
                policy: boundary.effective_policy(),
                grid: boundary.grid,
            };
            for child in &mut boundary.children {
                self.visit(child, corrected.origin(), Some(&inner));
            }
        }
    }

    /// Applies the enclosing boundary's policy and returns the settled rect.
    fn contain(&mut self, id: &str, declared: Rect, origin: Point, boundary: &Enclosing<'_>) -> Rect {
        let policy = boundary.policy;
        let candidate = match policy.snap {
            Some(snap) if snap.grid > 1.0 => {
                let reference = match snap.origin {
                    SnapOrigin::Scene => Point::default(),
                    SnapOrigin::Boundary => boundary.rect.origin(),
                };
                declared.with_origin(declared.origin().snap(snap.grid, reference))
            }
            _ => declared,
        };

        let strict = policy.mode == Mode::Strict;
        // Loose boundaries report against the snapped rect but keep the original.
        let settled = if strict { candidate } else { declared };

        if boundary.rect.contains(&candidate, policy.tolerance) {
            return settled;
        }

        let clamped = candidate.clamp_to(&boundary.rect);
        let severity = if strict {
            Severity::Error
        } else {
            Severity::Warning
        };
        self.diagnostics.push(
            Diagnostic::new(
                DiagnosticCode::OutOfBounds,
                severity,
                id,
                format!(
                    "node `{id}` {} exceeds boundary `{}` {}",
                    describe(candidate),
                    boundary.id,
                    describe(boundary.rect)
                ),
            )
            .with_boundary(boundary.id)
            .with_actual(Actual::Rect(candidate))
            .with_suggested_fix(SuggestedFix::move_to(clamped.origin().sub_point(origin))),
        );

        match (policy.mode, policy.overflow) {
            (Mode::Strict, Overflow::Clip) => clamped,
            (Mode::Strict, Overflow::Resize) => clamped.with_size(Size::new(
                clamped.width().min(boundary.rect.right() - clamped.x()),
                clamped.height().min(boundary.rect.bottom() - clamped.y()),
            )),
            _ => settled,
        }
    }
}

/// Derives a node's local position, and a zero size, from its grid cell.
fn place_in_grid(
    node: &mut Node,
    at: Point,
    size: Size,
    enclosing: Option<&Enclosing<'_>>,
) -> (Point, Size) {
    let Some(cell) = node.cell() else {
        return (at, size);
    };
    let Some((grid, width)) = enclosing.and_then(|b| b.grid.map(|grid| (grid, b.rect.width())))
    else {
        warn!(node_id = node.id(); "Node has a grid cell but its boundary has no grid");
        return (at, size);
    };

    let cell_rect = grid.cell_rect(cell, width);
    let size = if size.is_zero() {
        cell_rect.size()
    } else {
        size
    };
    node.set_at(cell_rect.origin());
    node.set_size(size);
    (cell_rect.origin(), size)
}

fn describe(rect: Rect) -> String {
    format!(
        "({}, {}, {}x{})",
        rect.x(),
        rect.y(),
        rect.width(),
        rect.height()
    )
}

/// Runs the validate pass over `scene`.
///
/// Returns a corrected copy of the scene together with the rectangle table
/// and every diagnostic found. Never fails: a malformed scene produces
/// diagnostics, not errors.
///
/// # Examples
///
/// ```
/// # use enclave::enforce::enforce;
/// # use enclave_core::geometry::{Point, Size};
/// # use enclave_core::scene::{BoundaryNode, Node, Policy, Scene, ShapeNode};
/// let boundary = BoundaryNode::new("vpc", Point::new(0.0, 0.0), Size::new(200.0, 100.0))
///     .with_policy(Policy::strict_clip())
///     .with_child(Node::Shape(ShapeNode::new("db", Point::new(150.0, 80.0), Size::new(100.0, 50.0))));
/// let scene = Scene::new("demo").with_node(Node::Boundary(boundary));
///
/// let result = enforce(&scene);
/// assert_eq!(result.summary.errors, 1);
/// assert_eq!(result.rects.get("db").map(|r| r.origin()), Some(Point::new(100.0, 50.0)));
/// ```
pub fn enforce(scene: &Scene) -> EnforcementResult {
    info!(scene_id = scene.id.as_str(); "Validating scene");

    let mut corrected = scene.clone();
    let mut ctx = EnforceContext::default();
    for node in &mut corrected.nodes {
        ctx.visit(node, Point::default(), None);
    }

    let index = SceneIndex::build(&corrected);
    check_ports(&corrected, &index, &mut ctx);
    check_connector_leaks(&corrected, &index, &mut ctx);

    let summary = DiagnosticSummary::from_diagnostics(&ctx.diagnostics);
    info!(
        errors = summary.errors,
        warnings = summary.warnings,
        nodes = ctx.rects.len();
        "Scene validated"
    );

    EnforcementResult {
        scene: corrected,
        rects: ctx.rects,
        diagnostics: ctx.diagnostics,
        summary,
    }
}

fn check_ports(scene: &Scene, index: &SceneIndex<'_>, ctx: &mut EnforceContext) {
    for port in &scene.ports {
        let Some(host_rect) = ctx.rects.get(&port.node_id) else {
            warn!(port_id = port.id.as_str(), node_id = port.node_id.as_str(); "Port host not found, skipping");
            continue;
        };
        let Some(boundary_id) = index.enclosing_boundary_id(&port.node_id) else {
            continue;
        };
        let (Some(boundary), Some(boundary_rect)) =
            (index.boundary(boundary_id), ctx.rects.get(boundary_id))
        else {
            continue;
        };

        let local_at = index
            .node(&port.node_id)
            .and_then(Node::at)
            .unwrap_or_default();
        let host = PortHost {
            rect: host_rect,
            parent_origin: host_rect.origin().sub_point(local_at),
        };
        let bounds = PortBoundary {
            id: boundary_id,
            rect: boundary_rect,
            tolerance: boundary.effective_policy().tolerance,
        };

        if let Some(diag) = validate_port(port, host, bounds) {
            debug!(port_id = port.id.as_str(), boundary_id; "Port outside boundary");
            ctx.diagnostics.push(diag);
        }
    }
}

/// Reports connectors that cross the edge of a boundary without a policy.
fn check_connector_leaks(scene: &Scene, index: &SceneIndex<'_>, ctx: &mut EnforceContext) {
    for connector in &scene.connectors {
        let (Some(from), Some(to)) = (
            index.resolve_endpoint(&connector.from, &ctx.rects),
            index.resolve_endpoint(&connector.to, &ctx.rects),
        ) else {
            warn!(connector_id = connector.id.as_str(); "Connector endpoint unresolved, skipping leak check");
            continue;
        };

        let from_chain = index.endpoint_chain(from.host_id);
        let to_chain = index.endpoint_chain(to.host_id);
        if from_chain.first() == to_chain.first() {
            continue;
        }

        let crossed = from_chain
            .iter()
            .filter(|&&id| !to_chain.contains(&id))
            .chain(to_chain.iter().filter(|&&id| !from_chain.contains(&id)));

        for &boundary_id in crossed {
            if index
                .boundary(boundary_id)
                .is_some_and(|boundary| boundary.policy.is_none())
            {
                ctx.diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticCode::ConnectorLeak,
                        &connector.id,
                        format!(
                            "connector `{}` crosses boundary `{boundary_id}` which has no containment policy",
                            connector.id
                        ),
                    )
                    .with_boundary(boundary_id),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use enclave_core::scene::{
        BoundaryNode, Cell, Connector, GroupNode, Port, ShapeNode, Side, Snap,
    };

    use super::*;

    fn shape(id: &str, x: f32, y: f32, w: f32, h: f32) -> Node {
        Node::Shape(ShapeNode::new(id, Point::new(x, y), Size::new(w, h)))
    }

    fn boxed_scene(policy: Option<Policy>, child: Node) -> Scene {
        let mut boundary =
            BoundaryNode::new("b", Point::new(0.0, 0.0), Size::new(200.0, 100.0)).with_child(child);
        boundary.policy = policy;
        Scene::new("s").with_node(Node::Boundary(boundary))
    }

    fn child_at(result: &EnforcementResult, path: &[usize]) -> Point {
        result
            .scene
            .node_at_path(path)
            .and_then(Node::at)
            .unwrap()
    }

    #[test]
    fn test_strict_clip_moves_child_inside() {
        let scene = boxed_scene(
            Some(Policy::strict_clip()),
            shape("c", 150.0, 80.0, 100.0, 50.0),
        );

        let result = enforce(&scene);

        assert_eq!(result.diagnostics.len(), 1);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.code(), DiagnosticCode::OutOfBounds);
        assert_eq!(diag.severity(), Severity::Error);
        assert_eq!(diag.boundary_id(), Some("b"));
        assert_eq!(
            diag.actual(),
            Some(Actual::Rect(Rect::new(150.0, 80.0, 100.0, 50.0)))
        );
        assert_eq!(
            diag.suggested_fix().and_then(|fix| fix.at),
            Some(Point::new(100.0, 50.0))
        );

        assert_eq!(child_at(&result, &[0, 0]), Point::new(100.0, 50.0));
        assert_eq!(result.rects.get("c"), Some(Rect::new(100.0, 50.0, 100.0, 50.0)));
    }

    #[test]
    fn test_loose_reports_without_moving() {
        let scene = boxed_scene(
            Some(Policy::new(Mode::Loose, Overflow::Clip)),
            shape("c", 150.0, 80.0, 100.0, 50.0),
        );

        let result = enforce(&scene);

        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity(), Severity::Warning);
        assert_eq!(
            result.diagnostics[0].suggested_fix().and_then(|fix| fix.at),
            Some(Point::new(100.0, 50.0))
        );
        assert_eq!(child_at(&result, &[0, 0]), Point::new(150.0, 80.0));
        assert_eq!(result.scene, scene);
        assert_eq!(result.summary.warnings, 1);
        assert_eq!(result.summary.errors, 0);
    }

    #[test]
    fn test_strict_resize_shrinks_to_edge() {
        let scene = boxed_scene(
            Some(Policy::new(Mode::Strict, Overflow::Resize)),
            shape("c", 150.0, 80.0, 300.0, 50.0),
        );

        let result = enforce(&scene);

        // Wider than the boundary: pinned to x=0, then shrunk to 200.
        assert_eq!(result.rects.get("c"), Some(Rect::new(0.0, 50.0, 200.0, 50.0)));
        let node = result.scene.node_at_path(&[0, 0]).unwrap();
        assert_eq!(node.size(), Some(Size::new(200.0, 50.0)));
    }

    #[test]
    fn test_strict_error_and_mask_do_not_mutate() {
        for overflow in [Overflow::Error, Overflow::Mask] {
            let scene = boxed_scene(
                Some(Policy::new(Mode::Strict, overflow)),
                shape("c", 150.0, 80.0, 100.0, 50.0),
            );

            let result = enforce(&scene);

            assert_eq!(result.summary.errors, 1, "{overflow:?}");
            assert_eq!(child_at(&result, &[0, 0]), Point::new(150.0, 80.0));
        }
    }

    #[test]
    fn test_missing_policy_warns() {
        let scene = boxed_scene(None, shape("c", 190.0, 10.0, 20.0, 20.0));

        let result = enforce(&scene);

        assert_eq!(result.summary.warnings, 1);
        assert_eq!(child_at(&result, &[0, 0]), Point::new(190.0, 10.0));
    }

    #[test]
    fn test_tolerance_absorbs_small_overflow() {
        let scene = boxed_scene(
            Some(Policy::strict_clip().with_tolerance(5.0)),
            shape("c", 185.0, 10.0, 20.0, 20.0),
        );

        let result = enforce(&scene);

        assert!(result.diagnostics.is_empty());
        assert_eq!(result.rects.get("c"), Some(Rect::new(185.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn test_snap_happens_before_containment() {
        // 183 snaps to 180: fits exactly, no diagnostic.
        let scene = boxed_scene(
            Some(Policy::strict_clip().with_snap(Snap::new(10.0))),
            shape("c", 183.0, 12.0, 20.0, 20.0),
        );

        let result = enforce(&scene);

        assert!(result.diagnostics.is_empty());
        assert_eq!(child_at(&result, &[0, 0]), Point::new(180.0, 10.0));
    }

    #[test]
    fn test_snap_relative_to_boundary_origin() {
        let boundary = BoundaryNode::new("b", Point::new(5.0, 5.0), Size::new(200.0, 100.0))
            .with_policy(Policy::strict_clip().with_snap(Snap {
                grid: 10.0,
                origin: SnapOrigin::Boundary,
            }))
            .with_child(shape("c", 13.0, 16.0, 10.0, 10.0));
        let scene = Scene::new("s").with_node(Node::Boundary(boundary));

        let result = enforce(&scene);

        assert_eq!(result.rects.get("c"), Some(Rect::new(15.0, 25.0, 10.0, 10.0)));
        assert_eq!(child_at(&result, &[0, 0]), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_loose_snap_keeps_original_position() {
        let scene = boxed_scene(
            Some(Policy::new(Mode::Loose, Overflow::Clip).with_snap(Snap::new(10.0))),
            shape("c", 13.0, 12.0, 20.0, 20.0),
        );

        let result = enforce(&scene);

        assert!(result.diagnostics.is_empty());
        assert_eq!(result.scene, scene);
    }

    #[test]
    fn test_negative_size_reported_and_still_checked() {
        let scene = boxed_scene(Some(Policy::strict_clip()), shape("c", -5.0, 10.0, -10.0, 5.0));

        let result = enforce(&scene);

        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![DiagnosticCode::NegSize, DiagnosticCode::OutOfBounds]);
        assert_eq!(
            result.diagnostics[0].actual(),
            Some(Actual::Size(Size::new(-10.0, 5.0)))
        );
    }

    #[test]
    fn test_children_use_corrected_parent_origin() {
        let inner = BoundaryNode::new("inner", Point::new(250.0, 10.0), Size::new(50.0, 50.0))
            .with_child(shape("leaf", 5.0, 5.0, 10.0, 10.0));
        let scene = boxed_scene(Some(Policy::strict_clip()), Node::Boundary(inner));

        let result = enforce(&scene);

        assert_eq!(result.rects.get("inner"), Some(Rect::new(150.0, 10.0, 50.0, 50.0)));
        assert_eq!(result.rects.get("leaf"), Some(Rect::new(155.0, 15.0, 10.0, 10.0)));
        // The leaf itself was not corrected: only its parent moved.
        assert_eq!(child_at(&result, &[0, 0, 0]), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_groups_pass_origin_and_boundary_through() {
        let group = Node::Group(GroupNode {
            id: "g".to_string(),
            z: 0,
            children: vec![shape("c", 190.0, 10.0, 20.0, 20.0)],
        });
        let scene = boxed_scene(Some(Policy::strict_clip()), group);

        let result = enforce(&scene);

        assert!(result.rects.get("g").is_none());
        assert_eq!(result.diagnostics[0].boundary_id(), Some("b"));
        assert_eq!(result.rects.get("c"), Some(Rect::new(180.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn test_root_nodes_are_unchecked() {
        let scene = Scene::new("s").with_node(shape("free", -50.0, -50.0, 10.0, 10.0));

        let result = enforce(&scene);

        assert!(result.diagnostics.is_empty());
        assert_eq!(result.rects.get("free"), Some(Rect::new(-50.0, -50.0, 10.0, 10.0)));
    }

    #[test]
    fn test_grid_cell_places_and_sizes_child() {
        let mut cell_child = ShapeNode::new("c", Point::default(), Size::default());
        cell_child.cell = Some(Cell::new(1, 0));
        let mut boundary = BoundaryNode::new("b", Point::new(10.0, 10.0), Size::new(220.0, 100.0))
            .with_policy(Policy::strict_clip())
            .with_child(Node::Shape(cell_child));
        boundary.grid = Some(Grid {
            columns: 2,
            row_height: 40.0,
            gutter: 10.0,
            padding: 5.0,
        });
        let scene = Scene::new("s").with_node(Node::Boundary(boundary));

        let result = enforce(&scene);

        assert!(result.diagnostics.is_empty());
        assert_eq!(result.rects.get("c"), Some(Rect::new(125.0, 15.0, 100.0, 40.0)));
        let node = result.scene.node_at_path(&[0, 0]).unwrap();
        assert_eq!(node.at(), Some(Point::new(115.0, 5.0)));
        assert_eq!(node.size(), Some(Size::new(100.0, 40.0)));
    }

    #[test]
    fn test_port_outside_even_in_loose_boundary() {
        let boundary = BoundaryNode::new("b", Point::new(0.0, 0.0), Size::new(40.0, 100.0))
            .with_policy(Policy::new(Mode::Loose, Overflow::Clip))
            .with_child(shape("host", 0.0, 0.0, 50.0, 50.0));
        let scene = Scene::new("s")
            .with_node(Node::Boundary(boundary))
            .with_port(Port::new("p", "host", Side::Right, 10.0));

        let result = enforce(&scene);

        let port_diag = result
            .diagnostics
            .iter()
            .find(|d| d.code() == DiagnosticCode::PortOutside)
            .unwrap();
        assert_eq!(port_diag.severity(), Severity::Error);
        assert_eq!(port_diag.actual(), Some(Actual::Point(Point::new(50.0, 10.0))));
        // Walk diagnostics come first.
        assert_eq!(result.diagnostics[0].code(), DiagnosticCode::OutOfBounds);
        assert_eq!(result.diagnostics[0].severity(), Severity::Warning);
    }

    #[test]
    fn test_port_on_unknown_host_is_skipped() {
        let scene = Scene::new("s").with_port(Port::new("p", "ghost", Side::Left, 0.0));
        assert!(enforce(&scene).diagnostics.is_empty());
    }

    fn leak_scene(left_policy: Option<Policy>) -> Scene {
        let mut left = BoundaryNode::new("left", Point::new(0.0, 0.0), Size::new(100.0, 100.0))
            .with_child(shape("a", 10.0, 10.0, 20.0, 20.0));
        left.policy = left_policy;
        let right = BoundaryNode::new("right", Point::new(200.0, 0.0), Size::new(100.0, 100.0))
            .with_policy(Policy::strict_clip())
            .with_child(shape("b", 10.0, 10.0, 20.0, 20.0));
        Scene::new("s")
            .with_node(Node::Boundary(left))
            .with_node(Node::Boundary(right))
            .with_connector(Connector::new("c1", "a", "b"))
    }

    #[test]
    fn test_connector_leak_on_unpoliced_boundary() {
        let result = enforce(&leak_scene(None));

        assert_eq!(result.diagnostics.len(), 1);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.code(), DiagnosticCode::ConnectorLeak);
        assert_eq!(diag.severity(), Severity::Warning);
        assert_eq!(diag.node_id(), "c1");
        assert_eq!(diag.boundary_id(), Some("left"));
    }

    #[test]
    fn test_no_leak_when_both_boundaries_have_policies() {
        assert!(enforce(&leak_scene(Some(Policy::strict_clip()))).diagnostics.is_empty());
    }

    #[test]
    fn test_connector_within_one_boundary_does_not_leak() {
        let boundary = BoundaryNode::new("b", Point::new(0.0, 0.0), Size::new(100.0, 100.0))
            .with_child(shape("x", 0.0, 0.0, 10.0, 10.0))
            .with_child(shape("y", 50.0, 50.0, 10.0, 10.0));
        let scene = Scene::new("s")
            .with_node(Node::Boundary(boundary))
            .with_connector(Connector::new("c", "x", "y"))
            .with_connector(Connector::new("to-frame", "x", "b"));

        assert!(enforce(&scene).diagnostics.is_empty());
    }

    #[test]
    fn test_enforce_leaves_input_untouched_and_repeats() {
        let scene = boxed_scene(
            Some(Policy::strict_clip()),
            shape("c", 150.0, 80.0, 100.0, 50.0),
        );
        let snapshot = scene.clone();

        let first = enforce(&scene);
        let second = enforce(&scene);

        assert_eq!(scene, snapshot);
        assert_eq!(first.diagnostics, second.diagnostics);
        assert_eq!(first.rects, second.rects);
        assert_eq!(first.scene, second.scene);
    }

    #[test]
    fn test_enforcing_corrected_scene_is_clean() {
        let scene = boxed_scene(
            Some(Policy::strict_clip()),
            shape("c", 150.0, 80.0, 100.0, 50.0),
        );

        let corrected = enforce(&scene).scene;
        let again = enforce(&corrected);

        assert!(again.diagnostics.is_empty());
        assert_eq!(again.scene, corrected);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use enclave_core::scene::{BoundaryNode, ShapeNode};

    use super::*;

    fn scene_with(policy: Policy, boundary: Rect, child: Rect) -> Scene {
        let node = BoundaryNode::new("b", boundary.origin(), boundary.size())
            .with_policy(policy)
            .with_child(Node::Shape(ShapeNode::new(
                "c",
                child.origin(),
                child.size(),
            )));
        Scene::new("s").with_node(Node::Boundary(node))
    }

    fn boundary_strategy() -> impl Strategy<Value = Rect> {
        (-200i32..200, -200i32..200, 50i32..400, 50i32..400)
            .prop_map(|(x, y, w, h)| Rect::new(x as f32, y as f32, w as f32, h as f32))
    }

    fn child_strategy() -> impl Strategy<Value = Rect> {
        (-500i32..500, -500i32..500, 0i32..50, 0i32..50)
            .prop_map(|(x, y, w, h)| Rect::new(x as f32, y as f32, w as f32, h as f32))
    }

    proptest! {
        #[test]
        fn strict_clip_contains_fitting_children(
            boundary in boundary_strategy(),
            child in child_strategy(),
            tolerance in 0i32..5,
        ) {
            let tolerance = tolerance as f32;
            let scene = scene_with(Policy::strict_clip().with_tolerance(tolerance), boundary, child);

            let result = enforce(&scene);
            let corrected = result.rects.get("c").unwrap();

            prop_assert!(boundary.contains(&corrected, tolerance));
        }

        #[test]
        fn loose_never_mutates(
            boundary in boundary_strategy(),
            child in child_strategy(),
            overflow in prop_oneof![
                Just(Overflow::Clip),
                Just(Overflow::Mask),
                Just(Overflow::Resize),
                Just(Overflow::Error),
            ],
        ) {
            let scene = scene_with(Policy::new(Mode::Loose, overflow), boundary, child);
            let absolute = child.translate(boundary.origin());

            let result = enforce(&scene);

            prop_assert_eq!(result.rects.get("c"), Some(absolute));
            prop_assert_eq!(&result.scene, &scene);

            let escapes = !boundary.contains(&absolute, 0.0);
            prop_assert_eq!(result.diagnostics.len(), usize::from(escapes));
            for diag in &result.diagnostics {
                prop_assert_eq!(diag.code(), DiagnosticCode::OutOfBounds);
                prop_assert_eq!(diag.severity(), Severity::Warning);
            }
        }

        #[test]
        fn enforcement_is_deterministic(
            boundary in boundary_strategy(),
            child in child_strategy(),
        ) {
            let scene = scene_with(Policy::new(Mode::Strict, Overflow::Resize), boundary, child);
            let first = enforce(&scene);
            let second = enforce(&scene);

            prop_assert_eq!(first.diagnostics, second.diagnostics);
            prop_assert_eq!(first.rects, second.rects);
        }
    }
}
