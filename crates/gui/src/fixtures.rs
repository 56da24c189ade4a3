//! Factory functions for test data.
//!
//! Built-in test shapes, planes, and STL files written to disk, used by
//! tests and by the JSON command interface.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use stlclip_mesh::{primitives, write_stl, Axis, MeshIoResult, Plane, StlFormat, TriMesh};

/// Built-in test shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Cube,
    Sphere,
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Cube => "cube",
            Shape::Sphere => "sphere",
        }
    }

    /// `size` is the edge length of the cube or the diameter of the sphere.
    pub fn build(&self, size: f32) -> TriMesh {
        match self {
            Shape::Cube => primitives::cube(size),
            Shape::Sphere => primitives::uv_sphere(size * 0.5, 16, 24),
        }
    }
}

// ── Meshes ──────────────────────────────────────────────────────

/// Cube centered at the origin.
pub fn cube_mesh(size: f32) -> TriMesh {
    Shape::Cube.build(size)
}

/// Sphere of the given radius.
pub fn sphere_mesh(radius: f32) -> TriMesh {
    Shape::Sphere.build(radius * 2.0)
}

/// Cube moved so its minimum corner is at `min`.
pub fn cube_at(min: Vec3, size: f32) -> TriMesh {
    let mut mesh = cube_mesh(size);
    let offset = min + Vec3::splat(size * 0.5);
    for v in &mut mesh.vertices {
        *v += offset;
    }
    mesh
}

// ── Planes ──────────────────────────────────────────────────────

/// Plane `x = x` keeping `+X`.
pub fn plane_x(x: f32) -> Plane {
    Plane::from_axis(Vec3::new(x, 0.0, 0.0), Axis::X)
}

/// Plane `y = y` keeping `+Y`.
pub fn plane_y(y: f32) -> Plane {
    Plane::from_axis(Vec3::new(0.0, y, 0.0), Axis::Y)
}

/// Plane `z = z` keeping `+Z`.
pub fn plane_z(z: f32) -> Plane {
    Plane::from_axis(Vec3::new(0.0, 0.0, z), Axis::Z)
}

// ── Files ───────────────────────────────────────────────────────

/// Write `mesh` as `<dir>/<name>.stl` and return the path.
pub fn write_mesh_file(
    dir: &Path,
    name: &str,
    mesh: &TriMesh,
    format: StlFormat,
) -> MeshIoResult<PathBuf> {
    let path = dir.join(format!("{name}.stl"));
    write_stl(mesh, &path, format, name)?;
    Ok(path)
}

/// Write a cube STL file into `dir`.
pub fn cube_stl_file(dir: &Path, size: f32) -> MeshIoResult<PathBuf> {
    write_mesh_file(dir, "cube", &cube_mesh(size), StlFormat::Binary)
}

/// Write a sphere STL file into `dir`.
pub fn sphere_stl_file(dir: &Path, radius: f32) -> MeshIoResult<PathBuf> {
    write_mesh_file(dir, "sphere", &sphere_mesh(radius), StlFormat::Ascii)
}
