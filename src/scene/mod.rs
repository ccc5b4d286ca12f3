//! Scene hierarchy
//!
//! A tree of transform nodes over shared meshes, plus the RON file
//! format that describes one.

mod file;
mod graph;
mod transform;

pub use file::{
    load_scene, load_scene_from_str, save_scene, BuiltScene, NodeSpec, SceneFile, SceneFileError,
    Shape, Spin, SpinBinding, DEMO_SCENE,
};
pub use graph::{NodeId, RenderInfo, SceneGraph, TransformNode};
pub use transform::Transform;
