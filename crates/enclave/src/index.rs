//! Per-pass lookup tables over a scene.
//!
//! A [`SceneIndex`] is built once per pass and answers every id lookup the
//! later stages need (node, enclosing boundaries, port) without
//! re-walking the tree. It borrows the scene it indexes and is discarded with
//! the pass.

use indexmap::IndexMap;
use log::warn;

use enclave_core::{
    geometry::Point,
    scene::{BoundaryNode, Node, Port, Scene},
};

use crate::{enforce::RectTable, port::port_point};

/// Where a node lives in the tree.
#[derive(Debug)]
struct NodeEntry<'a> {
    node: &'a Node,
    path: Vec<usize>,
    /// Enclosing boundary ids, nearest first.
    boundaries: Vec<&'a str>,
}

/// A connector endpoint resolved to absolute geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Endpoint<'a> {
    /// The node the endpoint is attached to.
    pub host_id: &'a str,
    pub point: Point,
}

/// Id lookups over one scene, in declaration order.
#[derive(Debug)]
pub(crate) struct SceneIndex<'a> {
    nodes: IndexMap<&'a str, NodeEntry<'a>>,
    ports: IndexMap<&'a str, &'a Port>,
}

impl<'a> SceneIndex<'a> {
    pub fn build(scene: &'a Scene) -> Self {
        let mut index = Self {
            nodes: IndexMap::new(),
            ports: IndexMap::new(),
        };

        let mut path = Vec::new();
        let mut boundaries = Vec::new();
        for (position, node) in scene.nodes.iter().enumerate() {
            path.push(position);
            index.insert_node(node, &mut path, &mut boundaries);
            path.pop();
        }

        for port in &scene.ports {
            if index.ports.insert(port.id.as_str(), port).is_some() {
                warn!(port_id = port.id.as_str(); "Duplicate port id, keeping the last declaration");
            }
        }

        index
    }

    fn insert_node(
        &mut self,
        node: &'a Node,
        path: &mut Vec<usize>,
        boundaries: &mut Vec<&'a str>,
    ) {
        if self.nodes.contains_key(node.id()) {
            warn!(node_id = node.id(); "Duplicate node id, lookups resolve to the first declaration");
        } else {
            let mut chain = boundaries.clone();
            chain.reverse();
            self.nodes.insert(
                node.id(),
                NodeEntry {
                    node,
                    path: path.clone(),
                    boundaries: chain,
                },
            );
        }

        let is_boundary = matches!(node, Node::Boundary(_));
        if is_boundary {
            boundaries.push(node.id());
        }
        for (position, child) in node.children().iter().enumerate() {
            path.push(position);
            self.insert_node(child, path, boundaries);
            path.pop();
        }
        if is_boundary {
            boundaries.pop();
        }
    }

    pub fn node(&self, id: &str) -> Option<&'a Node> {
        self.nodes.get(id).map(|entry| entry.node)
    }

    /// Child-index path of a node, usable with [`Scene::node_at_path`].
    pub fn path(&self, id: &str) -> Option<&[usize]> {
        self.nodes.get(id).map(|entry| entry.path.as_slice())
    }

    /// Ids of the boundaries enclosing a node, nearest first.
    pub fn boundary_chain(&self, id: &str) -> &[&'a str] {
        self.nodes
            .get(id)
            .map(|entry| entry.boundaries.as_slice())
            .unwrap_or_default()
    }

    /// The id of the nearest boundary structurally containing a node.
    pub fn enclosing_boundary_id(&self, id: &str) -> Option<&'a str> {
        self.boundary_chain(id).first().copied()
    }

    /// Boundaries a connector endpoint on `id` sits inside, nearest first.
    ///
    /// Same as [`SceneIndex::boundary_chain`], except that a boundary host
    /// counts as containing its own endpoint.
    pub fn endpoint_chain(&self, id: &str) -> Vec<&'a str> {
        let Some((&key, entry)) = self.nodes.get_key_value(id) else {
            return Vec::new();
        };
        let mut chain = Vec::with_capacity(entry.boundaries.len() + 1);
        if matches!(entry.node, Node::Boundary(_)) {
            chain.push(key);
        }
        chain.extend_from_slice(&entry.boundaries);
        chain
    }

    pub fn boundary(&self, id: &str) -> Option<&'a BoundaryNode> {
        self.node(id).and_then(Node::as_boundary)
    }

    pub fn port(&self, id: &str) -> Option<&'a Port> {
        self.ports.get(id).copied()
    }

    /// Resolves a connector endpoint reference.
    ///
    /// A reference naming a port attaches at the port point; otherwise a node
    /// reference attaches at the center of the node's rectangle. Returns
    /// `None` when the reference or its rectangle cannot be found.
    pub fn resolve_endpoint(&self, reference: &str, rects: &RectTable) -> Option<Endpoint<'a>> {
        if let Some(port) = self.port(reference) {
            let host_rect = rects.get(&port.node_id)?;
            return Some(Endpoint {
                host_id: port.node_id.as_str(),
                point: port_point(port.side, port.offset, host_rect),
            });
        }

        let (&id, _) = self.nodes.get_key_value(reference)?;
        let rect = rects.get(id)?;
        Some(Endpoint {
            host_id: id,
            point: rect.center(),
        })
    }
}
