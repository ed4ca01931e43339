#![warn(missing_docs)]

//! B-rep box primitive construction for voxstep.
//!
//! Builds the boundary representation of an axis-aligned box (8 vertices,
//! 6 planar faces, 12 edges) and aggregates placed boxes into a
//! [`Compound`] without merging their boundaries.

use voxstep_math::{Point3, Transform, Vec3};

/// One rectangular face of a box.
///
/// `vertices` indexes into the owning solid's vertex array, in CCW order
/// when viewed from outside. The plane frame satisfies
/// outward normal = `x_dir` × `y_dir`.
#[derive(Debug, Clone)]
pub struct BoxFace {
    /// Vertex indices, CCW viewed from outside the solid.
    pub vertices: [usize; 4],
    /// A point on the face plane.
    pub plane_origin: Point3,
    /// First plane direction.
    pub x_dir: Vec3,
    /// Second plane direction.
    pub y_dir: Vec3,
}

impl BoxFace {
    /// Outward face normal (unit length for axis-aligned frames).
    pub fn normal(&self) -> Vec3 {
        self.x_dir.cross(&self.y_dir)
    }
}

/// Boundary representation of an axis-aligned rectangular box.
///
/// Vertex layout (corner-aligned at the origin before placement):
/// ```text
///     v4----v5
///    /|    /|
///   v7----v6|    z
///   | v0--|-v1   | y
///   |/    |/     |/
///   v3----v2     +---x
/// ```
#[derive(Debug, Clone)]
pub struct BoxSolid {
    vertices: [Point3; 8],
    faces: [BoxFace; 6],
}

impl BoxSolid {
    /// Build a box with one corner at the origin and dimensions
    /// `(sx, sy, sz)` along the axes.
    pub fn new(sx: f64, sy: f64, sz: f64) -> Self {
        let vertices = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(sx, 0.0, 0.0),
            Point3::new(sx, sy, 0.0),
            Point3::new(0.0, sy, 0.0),
            Point3::new(0.0, 0.0, sz),
            Point3::new(sx, 0.0, sz),
            Point3::new(sx, sy, sz),
            Point3::new(0.0, sy, sz),
        ];

        // Plane normal = x_dir × y_dir, so each frame is chosen to make
        // the normal point outward.
        let faces = [
            // Bottom (z=0): normal -Z = (0,1,0) × (1,0,0)
            BoxFace {
                vertices: [0, 3, 2, 1],
                plane_origin: Point3::new(0.0, 0.0, 0.0),
                x_dir: Vec3::new(0.0, 1.0, 0.0),
                y_dir: Vec3::new(1.0, 0.0, 0.0),
            },
            // Top (z=sz): normal +Z = (1,0,0) × (0,1,0)
            BoxFace {
                vertices: [4, 5, 6, 7],
                plane_origin: Point3::new(0.0, 0.0, sz),
                x_dir: Vec3::new(1.0, 0.0, 0.0),
                y_dir: Vec3::new(0.0, 1.0, 0.0),
            },
            // Front (y=0): normal -Y = (0,0,1) × (1,0,0)
            BoxFace {
                vertices: [0, 1, 5, 4],
                plane_origin: Point3::new(0.0, 0.0, 0.0),
                x_dir: Vec3::new(0.0, 0.0, 1.0),
                y_dir: Vec3::new(1.0, 0.0, 0.0),
            },
            // Back (y=sy): normal +Y = (1,0,0) × (0,0,1)
            BoxFace {
                vertices: [2, 3, 7, 6],
                plane_origin: Point3::new(0.0, sy, 0.0),
                x_dir: Vec3::new(1.0, 0.0, 0.0),
                y_dir: Vec3::new(0.0, 0.0, 1.0),
            },
            // Left (x=0): normal -X = (0,0,1) × (0,1,0)
            BoxFace {
                vertices: [0, 4, 7, 3],
                plane_origin: Point3::new(0.0, 0.0, 0.0),
                x_dir: Vec3::new(0.0, 0.0, 1.0),
                y_dir: Vec3::new(0.0, 1.0, 0.0),
            },
            // Right (x=sx): normal +X = (0,1,0) × (0,0,1)
            BoxFace {
                vertices: [1, 2, 6, 5],
                plane_origin: Point3::new(sx, 0.0, 0.0),
                x_dir: Vec3::new(0.0, 1.0, 0.0),
                y_dir: Vec3::new(0.0, 0.0, 1.0),
            },
        ];

        Self { vertices, faces }
    }

    /// The 8 corner points.
    pub fn vertices(&self) -> &[Point3; 8] {
        &self.vertices
    }

    /// The 6 faces.
    pub fn faces(&self) -> &[BoxFace; 6] {
        &self.faces
    }

    /// The 12 unique edges as `(low, high)` vertex index pairs, in the
    /// deterministic order they first appear walking the face loops.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(12);
        for face in &self.faces {
            for j in 0..4 {
                let a = face.vertices[j];
                let b = face.vertices[(j + 1) % 4];
                let key = (a.min(b), a.max(b));
                if !edges.contains(&key) {
                    edges.push(key);
                }
            }
        }
        edges
    }

    /// Apply a rigid placement to the solid (vertices and face planes).
    pub fn transformed(&self, t: &Transform) -> Self {
        let mut vertices = self.vertices;
        for v in &mut vertices {
            *v = t.apply_point(v);
        }
        let faces = self.faces.clone().map(|face| BoxFace {
            plane_origin: t.apply_point(&face.plane_origin),
            x_dir: t.apply_vec(&face.x_dir),
            y_dir: t.apply_vec(&face.y_dir),
            ..face
        });
        Self { vertices, faces }
    }

    /// Translate the solid by `(dx, dy, dz)`.
    pub fn translated(&self, dx: f64, dy: f64, dz: f64) -> Self {
        self.transformed(&Transform::translation(dx, dy, dz))
    }
}

/// An ordered aggregate of independent solids.
///
/// Mirrors a CAD compound: grouping without boundary merging. Built
/// additively and only meaningful once all members are added.
#[derive(Debug, Clone, Default)]
pub struct Compound {
    solids: Vec<BoxSolid>,
}

impl Compound {
    /// Create an empty compound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a solid, preserving insertion order.
    pub fn push(&mut self, solid: BoxSolid) {
        self.solids.push(solid);
    }

    /// Number of member solids.
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    /// Whether the compound has no members.
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// The member solids in insertion order.
    pub fn solids(&self) -> &[BoxSolid] {
        &self.solids
    }
}
