//! Mesh validation utilities.
//!
//! `MeshValidator` checks the integrity of a `TriMesh` and of clip results:
//! in-range indices, degenerate faces, closedness, consistent winding,
//! dimensions, and which side of a plane the vertices lie on.

use std::collections::HashMap;

use glam::Vec3;
use stlclip_mesh::{Plane, TriMesh};

/// Validator for `TriMesh` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a TriMesh,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a TriMesh) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.triangles.iter().flatten().all(|&i| i < max_idx)
    }

    /// Number of triangles with a repeated corner or zero area.
    pub fn degenerate_count(&self) -> usize {
        (0..self.triangle_count())
            .filter(|&i| {
                let [a, b, c] = self.mesh.triangles[i];
                a == b || b == c || a == c || self.mesh.face_normal(i) == Vec3::ZERO
            })
            .count()
    }

    /// Every vertex is referenced by some triangle.
    pub fn has_no_unused_vertices(&self) -> bool {
        let mut used = vec![false; self.vertex_count()];
        for &i in self.mesh.triangles.iter().flatten() {
            if let Some(slot) = used.get_mut(i as usize) {
                *slot = true;
            }
        }
        used.into_iter().all(|u| u)
    }

    /// Directed edge → number of occurrences.
    fn directed_edges(&self) -> HashMap<(u32, u32), u32> {
        let mut edges = HashMap::new();
        for t in &self.mesh.triangles {
            for k in 0..3 {
                *edges.entry((t[k], t[(k + 1) % 3])).or_insert(0) += 1;
            }
        }
        edges
    }

    /// Every edge is shared by exactly two triangles with opposite direction.
    pub fn is_closed(&self) -> bool {
        let edges = self.directed_edges();
        edges
            .iter()
            .all(|(&(a, b), &n)| n == 1 && edges.get(&(b, a)) == Some(&1))
    }

    /// No edge is traversed twice in the same direction, so neighbouring faces agree on winding.
    pub fn is_consistently_oriented(&self) -> bool {
        self.directed_edges().values().all(|&n| n == 1)
    }

    /// Edges used by only one triangle (the rim of an open surface).
    pub fn boundary_edge_count(&self) -> usize {
        let edges = self.directed_edges();
        edges
            .keys()
            .filter(|&&(a, b)| !edges.contains_key(&(b, a)))
            .count()
    }

    /// Pairs of distinct vertices closer than `epsilon`.
    pub fn duplicate_vertex_count(&self, epsilon: f32) -> usize {
        let v = &self.mesh.vertices;
        let mut count = 0;
        for i in 0..v.len() {
            for j in (i + 1)..v.len() {
                if v[i].distance(v[j]) < epsilon {
                    count += 1;
                }
            }
        }
        count
    }

    /// Every vertex lies on the kept side of `plane` (within `epsilon`).
    pub fn is_on_kept_side(&self, plane: &Plane, epsilon: f32) -> bool {
        self.mesh
            .vertices
            .iter()
            .all(|&p| plane.signed_distance(p) >= -epsilon)
    }

    /// Compute the dimensions (width, height, depth) of the bounding box.
    pub fn dimensions(&self) -> [f32; 3] {
        self.mesh
            .bounds()
            .map_or([0.0; 3], |b| b.size().to_array())
    }

    /// Check that the bounding box dimensions are approximately equal to `expected`.
    pub fn assert_dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        let dims = self.dimensions();
        (dims[0] - expected[0]).abs() < tolerance
            && (dims[1] - expected[1]).abs() < tolerance
            && (dims[2] - expected[2]).abs() < tolerance
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .triangles
                .iter()
                .flatten()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
            return errors;
        }

        let degenerate = self.degenerate_count();
        if degenerate > 0 {
            errors.push(format!("{degenerate} degenerate triangles"));
        }

        if !self.has_no_unused_vertices() {
            errors.push("Mesh has vertices no triangle uses".to_string());
        }

        if !self.is_consistently_oriented() {
            errors.push("Triangle winding is inconsistent".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stlclip_mesh::{clip_mesh, primitives, Axis};

    fn simple_triangle() -> TriMesh {
        TriMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]])
    }

    #[test]
    fn test_counts() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert_eq!(v.vertex_count(), 3);
        assert_eq!(v.triangle_count(), 1);
    }

    #[test]
    fn test_indices_out_of_range() {
        let bad = TriMesh::new(vec![Vec3::ZERO], vec![[0, 1, 2]]);
        let v = MeshValidator::new(&bad);
        assert!(!v.are_indices_in_range());
        assert!(v.validate_all().iter().any(|e| e.contains("out of range")));
    }

    #[test]
    fn test_degenerate() {
        let bad = TriMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0], vec![[0, 1, 2], [0, 0, 1]]);
        assert_eq!(MeshValidator::new(&bad).degenerate_count(), 2);
    }

    #[test]
    fn test_cube_is_closed() {
        let cube = primitives::cube(1.0);
        let v = MeshValidator::new(&cube);
        assert!(v.is_closed());
        assert_eq!(v.boundary_edge_count(), 0);
        assert!(v.validate_all().is_empty());
    }

    #[test]
    fn test_triangle_is_open() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert!(!v.is_closed());
        assert!(v.is_consistently_oriented());
        assert_eq!(v.boundary_edge_count(), 3);
    }

    #[test]
    fn test_flipped_face_is_inconsistent() {
        let mut cube = primitives::cube(1.0);
        cube.triangles[0].swap(1, 2);
        assert!(!MeshValidator::new(&cube).is_consistently_oriented());
    }

    #[test]
    fn test_clip_result_is_valid() {
        let sphere = primitives::uv_sphere(1.0, 12, 16);
        let plane = Plane::new(Vec3::new(0.1, 0.2, 0.0), Vec3::new(1.0, 0.5, 0.25));
        let clipped = clip_mesh(&sphere, &plane);
        let v = MeshValidator::new(&clipped);

        assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
        assert!(v.is_on_kept_side(&plane, 1e-5));
        assert_eq!(v.duplicate_vertex_count(1e-6), 0);
        // The cut leaves one open rim.
        assert!(v.boundary_edge_count() > 0);
    }

    #[test]
    fn test_dimensions() {
        let cube = primitives::cube(2.0);
        let half = clip_mesh(&cube, &Plane::from_axis(Vec3::ZERO, Axis::Y));
        let v = MeshValidator::new(&half);
        assert!(v.assert_dimensions_approx([2.0, 1.0, 2.0], 1e-5));
        assert!(!v.assert_dimensions_approx([2.0, 2.0, 2.0], 1e-5));
    }
}
