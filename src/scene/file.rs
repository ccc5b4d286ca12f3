//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files. A
//! file describes a tree of named nodes with optional shapes and spin
//! animations; building it produces the runtime graph plus the spin
//! bindings the frame loop advances each tick.

use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::graph::{NodeId, RenderInfo, SceneGraph};
use super::transform::Transform;
use crate::rasterizer::{Mesh, Quat, Triangle, Vec4};

/// Scene bundled into the binary, used when no file is given
pub const DEMO_SCENE: &str = include_str!("../../assets/scenes/demo.ron");

/// Error type for scene loading
#[derive(Debug)]
pub enum SceneFileError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for SceneFileError {
    fn from(e: std::io::Error) -> Self {
        SceneFileError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SceneFileError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneFileError::ParseError(e)
    }
}

impl From<ron::Error> for SceneFileError {
    fn from(e: ron::Error) -> Self {
        SceneFileError::SerializeError(e)
    }
}

impl fmt::Display for SceneFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneFileError::IoError(e) => write!(f, "IO error: {}", e),
            SceneFileError::ParseError(e) => write!(f, "Parse error: {}", e),
            SceneFileError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneFileError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub nodes: Vec<NodeSpec>,
}

/// One node of the scene tree as written on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default)]
    pub position: (f32, f32, f32),
    /// Euler angles in degrees: pitch, yaw, roll
    #[serde(default)]
    pub rotation: (f32, f32, f32),
    #[serde(default = "default_scale")]
    pub scale: (f32, f32, f32),
    #[serde(default)]
    pub shape: Option<Shape>,
    #[serde(default)]
    pub spin: Option<Spin>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

fn default_scale() -> (f32, f32, f32) {
    (1.0, 1.0, 1.0)
}

/// Built-in mesh shapes a node can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Quad,
    Tri,
    Cube,
}

impl Shape {
    fn mesh(self) -> Mesh {
        match self {
            Shape::Quad => Mesh::centered_quad(),
            Shape::Tri => Mesh::new(vec![Triangle::centered()]),
            Shape::Cube => Mesh::cube(),
        }
    }
}

/// Continuous rotation about a local axis, degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    pub axis: (f32, f32, f32),
    pub rate: f32,
}

/// Spin entry resolved against the built graph
#[derive(Debug, Clone, Copy)]
pub struct SpinBinding {
    pub node: NodeId,
    pub axis: Vec4,
    /// Degrees per second
    pub rate: f32,
}

/// A scene file turned into runtime state
pub struct BuiltScene {
    pub graph: SceneGraph,
    pub spins: Vec<SpinBinding>,
}

impl SceneFile {
    /// Build the runtime graph, sharing one mesh per shape kind
    pub fn build(&self) -> BuiltScene {
        let mut graph = SceneGraph::new();
        let mut spins = Vec::new();
        let mut meshes = MeshCache::default();
        let root = graph.root();
        for spec in &self.nodes {
            build_node(spec, root, &mut graph, &mut spins, &mut meshes);
        }
        BuiltScene { graph, spins }
    }
}

#[derive(Default)]
struct MeshCache {
    quad: Option<Rc<Mesh>>,
    tri: Option<Rc<Mesh>>,
    cube: Option<Rc<Mesh>>,
}

impl MeshCache {
    fn get(&mut self, shape: Shape) -> Rc<Mesh> {
        let slot = match shape {
            Shape::Quad => &mut self.quad,
            Shape::Tri => &mut self.tri,
            Shape::Cube => &mut self.cube,
        };
        slot.get_or_insert_with(|| Rc::new(shape.mesh())).clone()
    }
}

fn build_node(
    spec: &NodeSpec,
    parent: NodeId,
    graph: &mut SceneGraph,
    spins: &mut Vec<SpinBinding>,
    meshes: &mut MeshCache,
) {
    let transform = Transform::new(
        Vec4::point(spec.position.0, spec.position.1, spec.position.2),
        Quat::from_euler(
            spec.rotation.0.to_radians(),
            spec.rotation.1.to_radians(),
            spec.rotation.2.to_radians(),
        ),
        Vec4::new(spec.scale.0, spec.scale.1, spec.scale.2, 1.0),
    );
    let render_info = match spec.shape {
        Some(shape) => RenderInfo::with_mesh(meshes.get(shape)),
        None => RenderInfo::empty(),
    };
    let id = graph.add_node(parent, transform, render_info);
    graph.node_mut(id).name = spec.name.clone();

    if let Some(spin) = spec.spin {
        spins.push(SpinBinding {
            node: id,
            axis: Vec4::direction(spin.axis.0, spin.axis.1, spin.axis.2).normalize(),
            rate: spin.rate,
        });
    }
    for child in &spec.children {
        build_node(child, id, graph, spins, meshes);
    }
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneFile, SceneFileError> {
    let contents = fs::read_to_string(path)?;
    Ok(load_scene_from_str(&contents)?)
}

/// Load a scene from a RON string (for the embedded demo or testing)
pub fn load_scene_from_str(s: &str) -> Result<SceneFile, ron::error::SpannedError> {
    ron::from_str(s)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &SceneFile, path: P) -> Result<(), SceneFileError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(6)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(scene, config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_parses_and_builds() {
        let scene = load_scene_from_str(DEMO_SCENE).unwrap();
        let built = scene.build();
        // root + rig + cube + orbit + two panels + beacon
        assert_eq!(built.graph.node_count(), 7);
        assert_eq!(built.spins.len(), 3);
        assert!(built.graph.find("rig").is_some());
        assert!(built.graph.find("cube").is_some());
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let scene = load_scene_from_str(r#"(nodes: [(name: "lone")])"#).unwrap();
        let spec = &scene.nodes[0];
        assert_eq!(spec.position, (0.0, 0.0, 0.0));
        assert_eq!(spec.scale, (1.0, 1.0, 1.0));
        assert!(spec.shape.is_none());
        assert!(spec.spin.is_none());
        assert!(spec.children.is_empty());
    }

    #[test]
    fn test_build_hierarchy_and_transforms() {
        let scene = load_scene_from_str(
            r#"(nodes: [(
                name: "group",
                position: (1.0, 0.0, 0.0),
                children: [(name: "leaf", position: (0.0, 2.0, 0.0), shape: Some(Quad))],
            )])"#,
        )
        .unwrap();
        let built = scene.build();
        let leaf = built.graph.find("leaf").unwrap();
        assert_eq!(built.graph.parent(leaf), built.graph.find("group"));
        let p = built.graph.world_matrix(leaf) * Vec4::point(0.0, 0.0, 0.0);
        assert!((p.x - 1.0).abs() < 0.001);
        assert!((p.y - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_nodes_share_shape_meshes() {
        let scene = load_scene_from_str(
            r#"(nodes: [
                (name: "a", shape: Some(Cube)),
                (name: "b", shape: Some(Cube)),
            ])"#,
        )
        .unwrap();
        let built = scene.build();
        let a = built.graph.find("a").unwrap();
        let b = built.graph.find("b").unwrap();
        let mesh_a = built.graph.node(a).render_info.mesh.as_ref().unwrap();
        let mesh_b = built.graph.node(b).render_info.mesh.as_ref().unwrap();
        assert!(Rc::ptr_eq(mesh_a, mesh_b));
    }

    #[test]
    fn test_spin_axis_is_normalized() {
        let scene = load_scene_from_str(
            r#"(nodes: [(name: "s", spin: Some((axis: (0.0, 3.0, 0.0), rate: 10.0)))])"#,
        )
        .unwrap();
        let built = scene.build();
        assert_eq!(built.spins.len(), 1);
        assert!((built.spins[0].axis.len() - 1.0).abs() < 0.001);
        assert!((built.spins[0].rate - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_roundtrip_through_ron() {
        let scene = load_scene_from_str(DEMO_SCENE).unwrap();
        let config = ron::ser::PrettyConfig::new();
        let text = ron::ser::to_string_pretty(&scene, config).unwrap();
        let reparsed = load_scene_from_str(&text).unwrap();
        assert_eq!(scene, reparsed);
    }

    #[test]
    fn test_save_and_reload_file() {
        let scene = load_scene_from_str(DEMO_SCENE).unwrap();
        let path = std::env::temp_dir().join(format!("glyphcast-scene-{}.ron", std::process::id()));
        save_scene(&scene, &path).unwrap();
        let reloaded = load_scene(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(scene, reloaded);
    }

    #[test]
    fn test_parse_error_reports() {
        assert!(load_scene_from_str("(nodes: [").is_err());
        let err = SceneFileError::from(load_scene_from_str("nonsense").unwrap_err());
        assert!(err.to_string().contains("Parse error"));
    }
}
