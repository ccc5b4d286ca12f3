//! Arena-backed scene hierarchy
//!
//! Nodes live in a flat vector and refer to each other by index, so the
//! tree needs no ownership cycles. The root is created with the graph
//! and nodes are never removed, which keeps every handed-out id valid.

use super::transform::Transform;
use crate::rasterizer::{Mat4, Mesh};
use std::rc::Rc;

/// Handle to a node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Renderable payload of a node; nodes without a mesh only group children
#[derive(Debug, Clone, Default)]
pub struct RenderInfo {
    pub mesh: Option<Rc<Mesh>>,
}

impl RenderInfo {
    pub fn empty() -> Self {
        Self { mesh: None }
    }

    pub fn with_mesh(mesh: Rc<Mesh>) -> Self {
        Self { mesh: Some(mesh) }
    }
}

#[derive(Debug, Clone)]
pub struct TransformNode {
    pub name: String,
    pub transform: Transform,
    pub render_info: RenderInfo,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Scene tree with a fixed identity root
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<TransformNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![TransformNode {
                name: String::from("root"),
                transform: Transform::default(),
                render_info: RenderInfo::empty(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Insert a node under the given parent and return its handle
    pub fn add_node(
        &mut self,
        parent: NodeId,
        transform: Transform,
        render_info: RenderInfo,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TransformNode {
            name: String::new(),
            transform,
            render_info,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Insert a node directly under the root
    pub fn add_child(&mut self, transform: Transform, render_info: RenderInfo) -> NodeId {
        self.add_node(self.root(), transform, render_info)
    }

    pub fn node(&self, id: NodeId) -> &TransformNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TransformNode {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// First node with the given name, in traversal order
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.iter().find(|id| self.nodes[id.0].name == name)
    }

    /// World matrix of a node, composed parent-first down to the node
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = self.nodes[id.0].transform.to_matrix();
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            let node = &self.nodes[parent.0];
            matrix = node.transform.to_matrix() * matrix;
            current = node.parent;
        }
        matrix
    }

    /// Depth-first pre-order walk starting at the root
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root()];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            for &child in self.nodes[id.0].children.iter().rev() {
                stack.push(child);
            }
            Some(id)
        })
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        SceneGraph::new()
    }
}
