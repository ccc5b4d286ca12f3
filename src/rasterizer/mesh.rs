//! Triangle meshes
//!
//! A mesh is an ordered soup of triangles with per-vertex position and
//! normal. Transforming a mesh is a value operation: it returns a new mesh
//! and leaves the source untouched.

use super::math::{Mat4, Vec4};

/// Position plus normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec4,
    pub normal: Vec4,
}

impl MeshVertex {
    pub fn new(position: Vec4, normal: Vec4) -> Self {
        Self { position, normal }
    }
}

/// Three vertices; winding determines the auto-computed normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v1: MeshVertex,
    pub v2: MeshVertex,
    pub v3: MeshVertex,
}

impl Triangle {
    pub fn new(v1: MeshVertex, v2: MeshVertex, v3: MeshVertex) -> Self {
        Self { v1, v2, v3 }
    }

    /// Build from positions alone; the shared normal comes from the winding
    pub fn from_points(p1: Vec4, p2: Vec4, p3: Vec4) -> Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize();
        Self {
            v1: MeshVertex::new(p1, normal),
            v2: MeshVertex::new(p2, normal),
            v3: MeshVertex::new(p3, normal),
        }
    }

    /// Unit triangle around the origin in the xy plane
    pub fn centered() -> Self {
        Triangle::from_points(
            Vec4::point(-1.0, -1.0, 0.0),
            Vec4::point(0.0, 1.0, 0.0),
            Vec4::point(-1.0, 1.0, 0.0),
        )
    }

    /// The normal the current winding implies
    pub fn auto_normal(&self) -> Vec4 {
        (self.v2.position - self.v1.position)
            .cross(self.v3.position - self.v1.position)
            .normalize()
    }

    /// Assign one normal to all three vertices
    pub fn set_normal(&mut self, normal: Vec4) {
        self.v1.normal = normal;
        self.v2.normal = normal;
        self.v3.normal = normal;
    }

    /// Recompute vertex normals from the winding
    pub fn set_auto_normal(&mut self) {
        self.set_normal(self.auto_normal());
    }

    /// Copy with the vertex order flipped (normals kept as stored)
    pub fn reversed(&self) -> Triangle {
        Triangle::new(self.v3, self.v2, self.v1)
    }

    /// Apply `m` to every position and normal
    pub fn transform(&self, m: &Mat4) -> Triangle {
        let apply = |v: MeshVertex| MeshVertex::new(*m * v.position, *m * v.normal);
        Triangle::new(apply(self.v1), apply(self.v2), apply(self.v3))
    }
}

/// Ordered triangle collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// 2x2 quad around the origin in the xy plane, two triangles
    pub fn centered_quad() -> Self {
        Mesh::new(vec![
            Triangle::from_points(
                Vec4::point(1.0, 1.0, 0.0),
                Vec4::point(1.0, -1.0, 0.0),
                Vec4::point(-1.0, -1.0, 0.0),
            ),
            Triangle::from_points(
                Vec4::point(-1.0, -1.0, 0.0),
                Vec4::point(-1.0, 1.0, 0.0),
                Vec4::point(1.0, 1.0, 0.0),
            ),
        ])
    }

    /// 2x2x2 cube around the origin, two triangles per face
    pub fn cube() -> Self {
        fn face(p1: Vec4, p2: Vec4, p3: Vec4, p4: Vec4) -> [Triangle; 2] {
            [
                Triangle::from_points(p1, p2, p3),
                Triangle::from_points(p3, p4, p1),
            ]
        }

        let mut triangles = Vec::with_capacity(12);
        // front (+z) and back (-z)
        triangles.extend(face(
            Vec4::point(1.0, 1.0, 1.0),
            Vec4::point(1.0, -1.0, 1.0),
            Vec4::point(-1.0, -1.0, 1.0),
            Vec4::point(-1.0, 1.0, 1.0),
        ));
        triangles.extend(face(
            Vec4::point(-1.0, 1.0, -1.0),
            Vec4::point(-1.0, -1.0, -1.0),
            Vec4::point(1.0, -1.0, -1.0),
            Vec4::point(1.0, 1.0, -1.0),
        ));
        // right (+x) and left (-x)
        triangles.extend(face(
            Vec4::point(1.0, 1.0, -1.0),
            Vec4::point(1.0, -1.0, -1.0),
            Vec4::point(1.0, -1.0, 1.0),
            Vec4::point(1.0, 1.0, 1.0),
        ));
        triangles.extend(face(
            Vec4::point(-1.0, 1.0, 1.0),
            Vec4::point(-1.0, -1.0, 1.0),
            Vec4::point(-1.0, -1.0, -1.0),
            Vec4::point(-1.0, 1.0, -1.0),
        ));
        // top (+y) and bottom (-y)
        triangles.extend(face(
            Vec4::point(1.0, 1.0, -1.0),
            Vec4::point(1.0, 1.0, 1.0),
            Vec4::point(-1.0, 1.0, 1.0),
            Vec4::point(-1.0, 1.0, -1.0),
        ));
        triangles.extend(face(
            Vec4::point(1.0, -1.0, 1.0),
            Vec4::point(1.0, -1.0, -1.0),
            Vec4::point(-1.0, -1.0, -1.0),
            Vec4::point(-1.0, -1.0, 1.0),
        ));
        Mesh::new(triangles)
    }

    /// New mesh with `m` applied to every vertex.
    ///
    /// Normals go through the same matrix as positions. That is wrong for
    /// non-uniform scale (the inverse transpose would be correct), but the
    /// flat-fill pipeline never reads normals, so the simplification stands.
    pub fn transform(&self, m: &Mat4) -> Mesh {
        Mesh::new(self.triangles.iter().map(|t| t.transform(m)).collect())
    }

    /// New mesh shifted by `offset`
    pub fn translated(&self, offset: Vec4) -> Mesh {
        self.transform(&Mat4::translation(offset))
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}
