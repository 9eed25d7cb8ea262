//! The scene document: a tree of typed visual nodes plus ports, connectors,
//! and animated flows.
//!
//! Scenes are plain data. They are supplied by a caller (usually deserialized
//! from JSON), read by the enforcement engine, and copied into a corrected
//! scene; nothing in this module validates or mutates geometry.
//!
//! # JSON shape
//!
//! ```
//! # use enclave_core::scene::{Node, Scene};
//! let scene = Scene::from_json(r#"{
//!     "id": "demo",
//!     "nodes": [{
//!         "kind": "boundary",
//!         "id": "vpc",
//!         "at": { "x": 0, "y": 0 },
//!         "size": { "w": 200, "h": 100 },
//!         "policy": { "mode": "strict", "overflow": "clip", "tolerance": 0 },
//!         "children": [
//!             { "kind": "shape", "id": "db", "at": { "x": 150, "y": 80 }, "size": { "w": 100, "h": 50 } }
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! assert_eq!(scene.nodes.len(), 1);
//! assert!(matches!(scene.nodes[0], Node::Boundary(_)));
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// A complete scene document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    /// Explicit canvas width; derived from content when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Explicit canvas height; derived from content when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connectors: Vec<Connector>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flows: Vec<Flow>,
}

impl Scene {
    /// Creates an empty scene with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Appends a root node (builder style).
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Appends a port (builder style).
    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    /// Appends a connector (builder style).
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connectors.push(connector);
        self
    }

    /// Appends a flow (builder style).
    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.flows.push(flow);
        self
    }

    /// Parses a scene from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] when the document is not
    /// valid JSON or does not match the scene shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the scene to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Visits every node in pre-order, children in declaration order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        for node in &self.nodes {
            node.walk(visit);
        }
    }

    /// Returns the node at a child-index path, starting from the root list.
    pub fn node_at_path(&self, path: &[usize]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.nodes.get(*first)?;
        for index in rest {
            node = node.children().get(*index)?;
        }
        Some(node)
    }

    /// Mutable counterpart of [`Scene::node_at_path`].
    pub fn node_at_path_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.nodes.get_mut(*first)?;
        for index in rest {
            node = node.children_mut()?.get_mut(*index)?;
        }
        Some(node)
    }
}

/// A node in the scene tree, discriminated by its `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    Group(GroupNode),
    Boundary(BoundaryNode),
    Sprite(SpriteNode),
    Shape(ShapeNode),
    Text(TextNode),
    #[serde(rename = "raw-content", alias = "raw")]
    Raw(RawNode),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Group(node) => &node.id,
            Node::Boundary(node) => &node.id,
            Node::Sprite(node) => &node.id,
            Node::Shape(node) => &node.id,
            Node::Text(node) => &node.id,
            Node::Raw(node) => &node.id,
        }
    }

    /// Returns the lowercase kind tag used in the JSON document.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Group(_) => "group",
            Node::Boundary(_) => "boundary",
            Node::Sprite(_) => "sprite",
            Node::Shape(_) => "shape",
            Node::Text(_) => "text",
            Node::Raw(_) => "raw-content",
        }
    }

    /// Returns the node's position relative to its parent origin.
    ///
    /// Groups have no position of their own and return `None`.
    pub fn at(&self) -> Option<Point> {
        match self {
            Node::Group(_) => None,
            Node::Boundary(node) => Some(node.at),
            Node::Sprite(node) => Some(node.at),
            Node::Shape(node) => Some(node.at),
            Node::Text(node) => Some(node.at),
            Node::Raw(node) => Some(node.at),
        }
    }

    /// Replaces the node's relative position. No-op for groups.
    pub fn set_at(&mut self, at: Point) {
        match self {
            Node::Group(_) => {}
            Node::Boundary(node) => node.at = at,
            Node::Sprite(node) => node.at = at,
            Node::Shape(node) => node.at = at,
            Node::Text(node) => node.at = at,
            Node::Raw(node) => node.at = at,
        }
    }

    /// Returns the declared size, or `None` for groups.
    pub fn size(&self) -> Option<Size> {
        match self {
            Node::Group(_) => None,
            Node::Boundary(node) => Some(node.size),
            Node::Sprite(node) => Some(node.size),
            Node::Shape(node) => Some(node.size),
            Node::Text(node) => Some(node.size),
            Node::Raw(node) => Some(node.size),
        }
    }

    /// Replaces the declared size. No-op for groups.
    pub fn set_size(&mut self, size: Size) {
        match self {
            Node::Group(_) => {}
            Node::Boundary(node) => node.size = size,
            Node::Sprite(node) => node.size = size,
            Node::Shape(node) => node.size = size,
            Node::Text(node) => node.size = size,
            Node::Raw(node) => node.size = size,
        }
    }

    /// Returns the grid cell this node occupies in a gridded boundary.
    pub fn cell(&self) -> Option<Cell> {
        match self {
            Node::Group(_) => None,
            Node::Boundary(node) => node.cell,
            Node::Sprite(node) => node.cell,
            Node::Shape(node) => node.cell,
            Node::Text(node) => node.cell,
            Node::Raw(node) => node.cell,
        }
    }

    /// Paint order within the enclosing container.
    pub fn z(&self) -> i32 {
        match self {
            Node::Group(node) => node.z,
            Node::Boundary(node) => node.z,
            Node::Sprite(node) => node.z,
            Node::Shape(node) => node.z,
            Node::Text(node) => node.z,
            Node::Raw(node) => node.z,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group(node) => &node.children,
            Node::Boundary(node) => &node.children,
            _ => &[],
        }
    }

    /// Mutable access to children; `None` for leaf kinds.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Group(node) => Some(&mut node.children),
            Node::Boundary(node) => Some(&mut node.children),
            _ => None,
        }
    }

    pub fn as_boundary(&self) -> Option<&BoundaryNode> {
        match self {
            Node::Boundary(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_boundary_mut(&mut self) -> Option<&mut BoundaryNode> {
        match self {
            Node::Boundary(node) => Some(node),
            _ => None,
        }
    }

    /// Visits this node and its descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// A positionless container; its children share the group's parent origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupNode {
    pub id: String,
    #[serde(default)]
    pub z: i32,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A rectangular container that enforces a containment policy on its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryNode {
    pub id: String,
    #[serde(default)]
    pub at: Point,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,
    /// Corner radius for the frame and its clip/mask region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default)]
    pub z: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<Cell>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl BoundaryNode {
    pub fn new(id: impl Into<String>, at: Point, size: Size) -> Self {
        Self {
            id: id.into(),
            at,
            size,
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// The policy in force for this boundary.
    ///
    /// A boundary without a declared policy is treated as
    /// [`Policy::unenforced`]: violations are reported as warnings and
    /// nothing is corrected or clipped.
    pub fn effective_policy(&self) -> Policy {
        self.policy.unwrap_or_else(Policy::unenforced)
    }

    /// Whether the paint stage attaches a clip-path or mask to this boundary.
    ///
    /// True only for `strict` boundaries whose overflow is `clip`, `mask`, or
    /// `resize`.
    pub fn needs_containment(&self) -> bool {
        self.policy.is_some_and(|policy| {
            policy.mode == Mode::Strict
                && matches!(
                    policy.overflow,
                    Overflow::Clip | Overflow::Mask | Overflow::Resize
                )
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteNode {
    pub id: String,
    #[serde(default)]
    pub at: Point,
    #[serde(default)]
    pub size: Size,
    /// Reference to an externally supplied symbol definition.
    pub symbol: String,
    #[serde(default)]
    pub z: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeNode {
    pub id: String,
    #[serde(default)]
    pub at: Point,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub shape: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default)]
    pub z: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<Cell>,
}

impl ShapeNode {
    pub fn new(id: impl Into<String>, at: Point, size: Size) -> Self {
        Self {
            id: id.into(),
            at,
            size,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    #[default]
    Rect,
    Ellipse,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub id: String,
    #[serde(default)]
    pub at: Point,
    #[serde(default)]
    pub size: Size,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default)]
    pub z: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<Cell>,
}

/// Opaque markup emitted verbatim inside a positioned group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub id: String,
    #[serde(default)]
    pub at: Point,
    #[serde(default)]
    pub size: Size,
    pub content: String,
    #[serde(default)]
    pub z: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<Cell>,
}

/// Containment policy of a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub mode: Mode,
    pub overflow: Overflow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap: Option<Snap>,
    #[serde(default)]
    pub tolerance: f32,
}

impl Policy {
    pub fn new(mode: Mode, overflow: Overflow) -> Self {
        Self {
            mode,
            overflow,
            snap: None,
            tolerance: 0.0,
        }
    }

    /// `strict` + `clip` with zero tolerance.
    pub fn strict_clip() -> Self {
        Self::new(Mode::Strict, Overflow::Clip)
    }

    /// The implicit policy of a boundary that declares none.
    pub fn unenforced() -> Self {
        Self::new(Mode::Loose, Overflow::Error)
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_snap(mut self, snap: Snap) -> Self {
        self.snap = Some(snap);
        self
    }
}

/// Whether violations are corrected (`strict`) or only reported (`loose`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Strict,
    Loose,
}

/// How a strict boundary deals with overflowing children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Overflow {
    /// Move the child inside; paint clips.
    Clip,
    /// Leave geometry alone; paint masks.
    Mask,
    /// Move and shrink the child to fit.
    Resize,
    /// Report only.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snap {
    pub grid: f32,
    #[serde(default)]
    pub origin: SnapOrigin,
}

impl Snap {
    pub fn new(grid: f32) -> Self {
        Self {
            grid,
            origin: SnapOrigin::default(),
        }
    }
}

/// The reference point snapping is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapOrigin {
    /// Absolute scene coordinates.
    #[default]
    Scene,
    /// The enclosing boundary's top-left corner.
    Boundary,
}

/// Column layout of a boundary, used to place children by cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub columns: u32,
    pub row_height: f32,
    #[serde(default)]
    pub gutter: f32,
    #[serde(default)]
    pub padding: f32,
}

impl Grid {
    /// Width of a single column inside a boundary of the given width.
    pub fn column_width(&self, boundary_width: f32) -> f32 {
        let columns = self.columns.max(1) as f32;
        let inner = boundary_width - 2.0 * self.padding - (columns - 1.0) * self.gutter;
        inner / columns
    }

    /// Local rectangle (relative to the boundary origin) covered by `cell`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use enclave_core::scene::{Cell, Grid};
    /// # use enclave_core::geometry::Rect;
    /// let grid = Grid { columns: 2, row_height: 40.0, gutter: 10.0, padding: 5.0 };
    ///
    /// // Boundary 220 wide: (220 - 10 - 10) / 2 = 100 per column
    /// let rect = grid.cell_rect(Cell::new(1, 1), 220.0);
    /// assert_eq!(rect, Rect::new(115.0, 55.0, 100.0, 40.0));
    /// ```
    pub fn cell_rect(&self, cell: Cell, boundary_width: f32) -> Rect {
        let column_width = self.column_width(boundary_width);
        let col_span = cell.col_span.max(1) as f32;
        let row_span = cell.row_span.max(1) as f32;
        Rect::new(
            self.padding + cell.col as f32 * (column_width + self.gutter),
            self.padding + cell.row as f32 * (self.row_height + self.gutter),
            col_span * column_width + (col_span - 1.0) * self.gutter,
            row_span * self.row_height + (row_span - 1.0) * self.gutter,
        )
    }
}

/// A grid cell reference, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub col: u32,
    pub row: u32,
    #[serde(default = "default_span")]
    pub col_span: u32,
    #[serde(default = "default_span")]
    pub row_span: u32,
}

impl Cell {
    pub fn new(col: u32, row: u32) -> Self {
        Self {
            col,
            row,
            col_span: 1,
            row_span: 1,
        }
    }
}

fn default_span() -> u32 {
    1
}

/// A named attachment point on one side of a host node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub id: String,
    pub node_id: String,
    pub side: Side,
    #[serde(default)]
    pub offset: f32,
}

impl Port {
    pub fn new(id: impl Into<String>, node_id: impl Into<String>, side: Side, offset: f32) -> Self {
        Self {
            id: id.into(),
            node_id: node_id.into(),
            side,
            offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// A line between two endpoints, each naming a port or a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub style: ConnectorStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
}

impl Connector {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            label: None,
            style: ConnectorStyle::default(),
            stroke: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectorStyle {
    #[default]
    Straight,
    Orthogonal,
    Curved,
}

/// Animated tokens travelling along a connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: String,
    pub connector: String,
    /// Seconds for one token to travel the whole path.
    #[serde(default = "default_flow_duration")]
    pub duration: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_flow_count")]
    pub count: u32,
}

impl Flow {
    pub fn new(id: impl Into<String>, connector: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            connector: connector.into(),
            duration: default_flow_duration(),
            color: None,
            count: default_flow_count(),
        }
    }
}

fn default_flow_duration() -> f32 {
    2.0
}

fn default_flow_count() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scene() -> Scene {
        let boundary = BoundaryNode::new("outer", Point::new(0.0, 0.0), Size::new(200.0, 100.0))
            .with_policy(Policy::strict_clip())
            .with_child(Node::Shape(ShapeNode::new(
                "a",
                Point::new(10.0, 10.0),
                Size::new(20.0, 20.0),
            )))
            .with_child(Node::Group(GroupNode {
                id: "g".to_string(),
                z: 0,
                children: vec![Node::Shape(ShapeNode::new(
                    "b",
                    Point::new(30.0, 30.0),
                    Size::new(5.0, 5.0),
                ))],
            }));
        Scene::new("sample").with_node(Node::Boundary(boundary))
    }

    #[test]
    fn test_walk_is_pre_order() {
        let scene = sample_scene();
        let mut ids = Vec::new();
        scene.walk(&mut |node| ids.push(node.id().to_string()));
        assert_eq!(ids, vec!["outer", "a", "g", "b"]);
    }

    #[test]
    fn test_node_at_path() {
        let mut scene = sample_scene();
        assert_eq!(scene.node_at_path(&[0, 1, 0]).map(Node::id), Some("b"));
        assert!(scene.node_at_path(&[0, 5]).is_none());
        assert!(scene.node_at_path(&[]).is_none());

        let node = scene.node_at_path_mut(&[0, 0]).unwrap();
        node.set_at(Point::new(1.0, 2.0));
        assert_eq!(
            scene.node_at_path(&[0, 0]).and_then(Node::at),
            Some(Point::new(1.0, 2.0))
        );
    }

    #[test]
    fn test_group_has_no_position() {
        let mut group = Node::Group(GroupNode::default());
        assert!(group.at().is_none());
        group.set_at(Point::new(5.0, 5.0));
        assert!(group.at().is_none());
    }

    #[test]
    fn test_needs_containment() {
        let mut boundary = BoundaryNode::new("b", Point::default(), Size::new(1.0, 1.0));
        assert!(!boundary.needs_containment());

        for (overflow, expected) in [
            (Overflow::Clip, true),
            (Overflow::Mask, true),
            (Overflow::Resize, true),
            (Overflow::Error, false),
        ] {
            boundary.policy = Some(Policy::new(Mode::Strict, overflow));
            assert_eq!(boundary.needs_containment(), expected, "{overflow:?}");
        }

        boundary.policy = Some(Policy::new(Mode::Loose, Overflow::Clip));
        assert!(!boundary.needs_containment());
    }

    #[test]
    fn test_effective_policy_defaults_to_unenforced() {
        let boundary = BoundaryNode::new("b", Point::default(), Size::new(1.0, 1.0));
        assert_eq!(boundary.effective_policy(), Policy::unenforced());
    }

    #[test]
    fn test_json_round_trip_preserves_structure() {
        let scene = sample_scene()
            .with_port(Port::new("p", "a", Side::Right, 4.0))
            .with_connector(Connector::new("c", "p", "b"))
            .with_flow(Flow::new("f", "c"));

        let json = scene.to_json().unwrap();
        assert!(json.contains(r#""kind": "boundary""#));
        assert_eq!(Scene::from_json(&json).unwrap(), scene);
    }

    #[test]
    fn test_json_defaults() {
        let scene = Scene::from_json(
            r#"{
                "id": "s",
                "nodes": [
                    { "kind": "text", "id": "t", "content": "hi" },
                    { "kind": "boundary", "id": "b", "size": { "width": 10, "height": 10 },
                      "policy": { "mode": "loose", "overflow": "mask", "snap": { "grid": 8 } } }
                ],
                "flows": [{ "id": "f", "connector": "c" }]
            }"#,
        )
        .unwrap();

        assert_eq!(scene.nodes[0].at(), Some(Point::default()));
        let policy = scene.nodes[1].as_boundary().unwrap().policy.unwrap();
        assert_eq!(policy.tolerance, 0.0);
        assert_eq!(policy.snap.unwrap().origin, SnapOrigin::Scene);
        assert_eq!(scene.flows[0].count, 1);
        assert_eq!(scene.flows[0].duration, 2.0);
    }

    #[test]
    fn test_raw_content_kind() {
        let scene = Scene::from_json(
            r#"{
                "id": "s",
                "nodes": [
                    { "kind": "raw-content", "id": "badge", "content": "<circle r=\"4\"/>" },
                    { "kind": "raw", "id": "legacy", "content": "<rect/>" }
                ]
            }"#,
        )
        .unwrap();

        assert!(matches!(scene.nodes[0], Node::Raw(_)));
        assert!(matches!(scene.nodes[1], Node::Raw(_)));
        assert_eq!(scene.nodes[0].kind_name(), "raw-content");

        let json = scene.to_json().unwrap();
        assert!(json.contains(r#""kind": "raw-content""#));
        assert!(!json.contains(r#""kind": "raw""#));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result = Scene::from_json(r#"{ "id": "s", "nodes": [{ "kind": "circle", "id": "x" }] }"#);
        assert!(result.is_err());
    }
}
