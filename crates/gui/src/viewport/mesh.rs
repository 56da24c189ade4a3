use glam::Vec3;
use stlclip_mesh::TriMesh;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Flat-shaded render data: each triangle gets its own three vertices
    /// carrying the face normal.
    pub fn from_trimesh(mesh: &TriMesh, color: [f32; 3]) -> Self {
        let mut vertices = Vec::with_capacity(mesh.face_count() * 3 * 9);
        let mut indices = Vec::with_capacity(mesh.face_count() * 3);

        for (i, corners) in mesh.iter_triangles().enumerate() {
            let n = mesh.face_normal(i);
            let base = (vertices.len() / 9) as u32;
            for p in corners {
                push_vert(&mut vertices, p, n, color);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2]);
        }

        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let base = index * 9;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    pub fn normal(&self, index: usize) -> Vec3 {
        let base = index * 9 + 3;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Clone, Default)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn push_line(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        push_line_vert(&mut self.vertices, a, color);
        push_line_vert(&mut self.vertices, b, color);
    }

    /// Closed polyline through `points`.
    pub fn push_loop(&mut self, points: &[Vec3], color: [f32; 4]) {
        for (i, p) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            self.push_line(*p, next, color);
        }
    }

    pub fn extend(&mut self, other: &LineMeshData) {
        self.vertices.extend_from_slice(&other.vertices);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 7
    }
}

// ── Grid and axes ────────────────────────────────────────────

/// Ground grid in the XZ plane at height `y`.
pub fn grid(range: i32, cell_size: f32, opacity: f32, y: f32) -> LineMeshData {
    let mut lines = LineMeshData::default();
    let grid_color = [0.25_f32, 0.25, 0.25, opacity];
    let origin_color_x = [0.5_f32, 0.2, 0.2, opacity * 0.7];
    let origin_color_z = [0.2_f32, 0.2, 0.5, opacity * 0.7];

    let extent = range as f32 * cell_size;

    for i in -range..=range {
        let f = i as f32 * cell_size;
        let color = if i == 0 { origin_color_z } else { grid_color };
        lines.push_line(Vec3::new(f, y, -extent), Vec3::new(f, y, extent), color);

        let color = if i == 0 { origin_color_x } else { grid_color };
        lines.push_line(Vec3::new(-extent, y, f), Vec3::new(extent, y, f), color);
    }

    lines
}

pub fn axes(length: f32) -> LineMeshData {
    let mut lines = LineMeshData::default();
    lines.push_line(Vec3::ZERO, Vec3::X * length, [0.9, 0.2, 0.2, 1.0]);
    lines.push_line(Vec3::ZERO, Vec3::Y * length, [0.2, 0.8, 0.2, 1.0]);
    lines.push_line(Vec3::ZERO, Vec3::Z * length, [0.2, 0.3, 0.9, 1.0]);
    lines
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, p: Vec3, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn push_line_vert(v: &mut Vec<f32>, p: Vec3, c: [f32; 4]) {
    v.extend_from_slice(&[p.x, p.y, p.z, c[0], c[1], c[2], c[3]]);
}
