//! Half-space clipping of a triangle mesh by a plane.
//!
//! The kept half-space is `normal · (p - origin) >= 0`. Triangles straddling the
//! plane are cut along it; a triangle with one kept corner becomes one triangle,
//! one with two kept corners becomes two. Cut points are created once per mesh
//! edge, so neighbouring triangles stay connected along the cut.
//!
//! Vertices within a small tolerance of the plane, scaled to the mesh size,
//! count as lying on it. They are kept and reused as cut points.

use std::collections::HashMap;

use glam::Vec3;

use crate::mesh::TriMesh;
use crate::plane::Plane;

const UNMAPPED: u32 = u32::MAX;

/// On-plane tolerance relative to the mesh bounding box diagonal.
const PLANE_TOLERANCE: f32 = 1e-6;

/// Clip `mesh` by `plane`, returning the retained part as a new mesh.
///
/// The input is never modified. The result may be empty when the whole surface
/// lies on the discarded side.
pub fn clip_mesh(mesh: &TriMesh, plane: &Plane) -> TriMesh {
    let eps = on_plane_tolerance(mesh);
    let distances: Vec<f32> = mesh
        .vertices
        .iter()
        .map(|&p| snap_to_plane(plane.signed_distance(p), eps))
        .collect();

    let mut clipper = Clipper {
        source: mesh,
        distances: &distances,
        remap: vec![UNMAPPED; mesh.vertices.len()],
        cut_points: HashMap::new(),
        out: TriMesh::default(),
    };

    for tri in &mesh.triangles {
        clipper.clip_triangle(*tri);
    }
    clipper.out.remove_unused_vertices();

    tracing::trace!(
        faces_in = mesh.face_count(),
        faces_out = clipper.out.face_count(),
        "clip_mesh"
    );
    clipper.out
}

struct Clipper<'a> {
    source: &'a TriMesh,
    distances: &'a [f32],
    /// Source vertex index → output index
    remap: Vec<u32>,
    /// Sorted source edge → output index of its cut point
    cut_points: HashMap<(u32, u32), u32>,
    out: TriMesh,
}

impl Clipper<'_> {
    fn is_kept(&self, v: u32) -> bool {
        self.distances[v as usize] >= 0.0
    }

    fn clip_triangle(&mut self, tri: [u32; 3]) {
        let kept = tri.map(|v| self.is_kept(v));
        match kept.iter().filter(|k| **k).count() {
            3 => {
                let t = tri.map(|v| self.keep_vertex(v));
                self.push(t);
            }
            0 => {}
            1 => {
                // Rotate so the kept corner comes first; winding is preserved.
                let k = kept.iter().position(|k| *k).unwrap_or(0);
                let (a, b, c) = (tri[k], tri[(k + 1) % 3], tri[(k + 2) % 3]);
                let ka = self.keep_vertex(a);
                let ab = self.cut_point(a, b);
                let ca = self.cut_point(c, a);
                self.push([ka, ab, ca]);
            }
            _ => {
                // Rotate so the discarded corner comes first.
                let k = kept.iter().position(|k| !*k).unwrap_or(0);
                let (a, b, c) = (tri[k], tri[(k + 1) % 3], tri[(k + 2) % 3]);
                let ab = self.cut_point(a, b);
                let kb = self.keep_vertex(b);
                let kc = self.keep_vertex(c);
                let ca = self.cut_point(c, a);
                self.push([ab, kb, kc]);
                self.push([ab, kc, ca]);
            }
        }
    }

    fn keep_vertex(&mut self, v: u32) -> u32 {
        let slot = &mut self.remap[v as usize];
        if *slot == UNMAPPED {
            self.out.vertices.push(self.source.vertices[v as usize]);
            *slot = (self.out.vertices.len() - 1) as u32;
        }
        *slot
    }

    /// Output vertex where edge `(u, v)` crosses the plane. Exactly one endpoint is kept.
    fn cut_point(&mut self, u: u32, v: u32) -> u32 {
        let key = (u.min(v), u.max(v));
        if let Some(&idx) = self.cut_points.get(&key) {
            return idx;
        }

        let (inside, outside) = if self.is_kept(key.0) {
            (key.0, key.1)
        } else {
            (key.1, key.0)
        };
        let d_in = self.distances[inside as usize];
        let d_out = self.distances[outside as usize];

        // A kept corner lying on the plane is its own cut point.
        let idx = if d_in == 0.0 {
            self.keep_vertex(inside)
        } else {
            let p_in = self.source.vertices[inside as usize];
            let p_out = self.source.vertices[outside as usize];
            let t = d_in / (d_in - d_out);
            self.out.vertices.push(lerp(p_in, p_out, t));
            (self.out.vertices.len() - 1) as u32
        };

        self.cut_points.insert(key, idx);
        idx
    }

    fn push(&mut self, t: [u32; 3]) {
        if t[0] == t[1] || t[1] == t[2] || t[0] == t[2] {
            return;
        }
        self.out.triangles.push(t);
    }
}

/// Distance below which a vertex is treated as lying on the cutting plane.
pub fn on_plane_tolerance(mesh: &TriMesh) -> f32 {
    mesh.bounds().map_or(0.0, |b| b.diagonal() * PLANE_TOLERANCE)
}

fn snap_to_plane(d: f32, eps: f32) -> f32 {
    if d.abs() <= eps {
        0.0
    } else {
        d
    }
}

fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::Axis;
    use crate::primitives;

    fn assert_all_kept(mesh: &TriMesh, plane: &Plane) {
        for v in &mesh.vertices {
            assert!(plane.signed_distance(*v) >= -1e-5, "vertex {v} on discarded side");
        }
    }

    #[test]
    fn test_plane_outside_keeps_everything() {
        let cube = primitives::cube(2.0);
        let plane = Plane::from_axis(Vec3::new(-5.0, 0.0, 0.0), Axis::X);
        let out = clip_mesh(&cube, &plane);
        assert_eq!(out.face_count(), cube.face_count());
        assert_eq!(out.vertex_count(), cube.vertex_count());
    }

    #[test]
    fn test_plane_beyond_mesh_removes_everything() {
        let cube = primitives::cube(2.0);
        let plane = Plane::from_axis(Vec3::new(5.0, 0.0, 0.0), Axis::X);
        let out = clip_mesh(&cube, &plane);
        assert!(out.is_empty());
        assert_eq!(out.vertex_count(), 0);
    }

    #[test]
    fn test_half_cube() {
        let cube = primitives::cube(2.0);
        let plane = Plane::from_axis(Vec3::ZERO, Axis::X);
        let out = clip_mesh(&cube, &plane);

        assert!(!out.is_empty());
        assert_all_kept(&out, &plane);
        let b = out.bounds().unwrap();
        assert!(b.min.x.abs() < 1e-6);
        assert!((b.max.x - 1.0).abs() < 1e-6);
        // +X face (area 4) plus half of four side faces (area 2 each)
        assert!((out.area() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_input_is_untouched() {
        let cube = primitives::cube(1.0);
        let before = cube.clone();
        let _ = clip_mesh(&cube, &Plane::from_axis(Vec3::ZERO, Axis::Z));
        assert_eq!(cube, before);
    }

    #[test]
    fn test_cut_points_are_shared_between_neighbours() {
        let cube = primitives::cube(2.0);
        let out = clip_mesh(&cube, &Plane::new(Vec3::new(0.1, 0.0, 0.0), Vec3::new(1.0, 0.3, 0.2)));
        let mut seen: Vec<Vec3> = Vec::new();
        for v in &out.vertices {
            assert!(
                !seen.iter().any(|s| (*s - *v).length() < 1e-7),
                "duplicate vertex {v}"
            );
            seen.push(*v);
        }
    }

    #[test]
    fn test_winding_is_preserved() {
        let tri = TriMesh::from_triangles(&[[
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]]);
        let plane = Plane::from_axis(Vec3::new(0.0, 0.0, 0.0), Axis::X);
        let out = clip_mesh(&tri, &plane);
        assert!(!out.is_empty());
        for i in 0..out.face_count() {
            assert!(out.face_normal(i).dot(Vec3::Z) > 0.99);
        }
    }

    #[test]
    fn test_two_kept_corners_make_two_triangles() {
        let tri = TriMesh::from_triangles(&[[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ]]);
        let plane = Plane::from_axis(Vec3::new(0.0, 1.0, 0.0), Axis::Y).flipped();
        let out = clip_mesh(&tri, &plane);
        assert_eq!(out.face_count(), 2);
        assert_eq!(out.vertex_count(), 4);
        assert!((out.area() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_corner_on_plane_does_not_create_slivers() {
        let tri = TriMesh::from_triangles(&[[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]]);
        let plane = Plane::from_axis(Vec3::ZERO, Axis::X).flipped();
        let out = clip_mesh(&tri, &plane);
        assert!(out.is_empty());
        assert_eq!(out.vertex_count(), 0);
    }

    fn degenerate_faces(mesh: &TriMesh) -> usize {
        (0..mesh.face_count())
            .filter(|&i| {
                let [a, b, c] = mesh.triangles[i];
                a == b || b == c || a == c || mesh.face_normal(i) == Vec3::ZERO
            })
            .count()
    }

    fn closest_vertex_pair(mesh: &TriMesh) -> f32 {
        let v = &mesh.vertices;
        let mut closest = f32::INFINITY;
        for i in 0..v.len() {
            for j in (i + 1)..v.len() {
                closest = closest.min(v[i].distance(v[j]));
            }
        }
        closest
    }

    #[test]
    fn test_sphere_cut_through_center_has_no_slivers() {
        let sphere = primitives::uv_sphere(2.0, 12, 24);
        let eps = on_plane_tolerance(&sphere);

        for axis in Axis::all() {
            let plane = Plane::from_axis(Vec3::ZERO, *axis);
            let out = clip_mesh(&sphere, &plane);
            assert!(!out.is_empty());
            assert_eq!(degenerate_faces(&out), 0, "{axis:?}");
            assert!(closest_vertex_pair(&out) > eps, "{axis:?}");
            assert_all_kept(&out, &plane);
        }
    }

    #[test]
    fn test_off_center_sphere_cut_has_no_slivers() {
        let sphere = primitives::uv_sphere(1.0, 16, 24);
        let plane = Plane::new(Vec3::new(0.2, -0.1, 0.0), Vec3::new(1.0, 0.5, -0.25));
        let out = clip_mesh(&sphere, &plane);
        assert_eq!(degenerate_faces(&out), 0);
        assert!(closest_vertex_pair(&out) > on_plane_tolerance(&sphere));
    }

    #[test]
    fn test_vertex_near_plane_counts_as_on_plane() {
        // Just behind the plane by rounding noise
        let tri = TriMesh::from_triangles(&[[
            Vec3::new(-1e-8, 0.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]]);
        let out = clip_mesh(&tri, &Plane::from_axis(Vec3::ZERO, Axis::X));
        assert_eq!(out.face_count(), 1);
        assert_eq!(out.vertex_count(), 3);

        // Just in front of it with the other corners discarded
        let tri = TriMesh::from_triangles(&[[
            Vec3::new(1e-8, 0.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ]]);
        let out = clip_mesh(&tri, &Plane::from_axis(Vec3::ZERO, Axis::X));
        assert!(out.is_empty());
        assert_eq!(out.vertex_count(), 0);
    }

    #[test]
    fn test_tolerance_scales_with_mesh() {
        let small = on_plane_tolerance(&primitives::cube(1.0));
        let large = on_plane_tolerance(&primitives::cube(100.0));
        assert!((large / small - 100.0).abs() < 1e-2);
        assert_eq!(on_plane_tolerance(&TriMesh::default()), 0.0);
    }
}
