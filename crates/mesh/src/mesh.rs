//! Indexed triangle mesh and its axis-aligned bounds.

use std::collections::HashMap;

use glam::Vec3;

/// Indexed triangle surface: positions plus counter-clockwise triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl TriMesh {
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Build an indexed mesh from a triangle soup, welding bit-identical positions.
    pub fn from_triangles(soup: &[[Vec3; 3]]) -> Self {
        let mut lookup: HashMap<[u32; 3], u32> = HashMap::new();
        let mut vertices = Vec::new();
        let mut triangles = Vec::with_capacity(soup.len());

        for tri in soup {
            let mut idx = [0u32; 3];
            for (slot, p) in idx.iter_mut().zip(tri) {
                let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
                *slot = *lookup.entry(key).or_insert_with(|| {
                    vertices.push(*p);
                    (vertices.len() - 1) as u32
                });
            }
            triangles.push(idx);
        }

        Self {
            vertices,
            triangles,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }

    /// A mesh with no faces has nothing to render or export.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of triangle `index`.
    pub fn triangle(&self, index: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Iterate over all triangles as corner positions.
    pub fn iter_triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        (0..self.triangles.len()).map(move |i| self.triangle(i))
    }

    /// Unit face normal from the winding order (zero for degenerate faces).
    pub fn face_normal(&self, index: usize) -> Vec3 {
        let [a, b, c] = self.triangle(index);
        (b - a).cross(c - a).normalize_or_zero()
    }

    /// Bounding box of all vertices, `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.vertices.iter().copied())
    }

    /// Drop vertices no triangle refers to, keeping the order of the rest.
    pub fn remove_unused_vertices(&mut self) {
        let mut used = vec![false; self.vertices.len()];
        for t in &self.triangles {
            for &v in t {
                used[v as usize] = true;
            }
        }
        if used.iter().all(|u| *u) {
            return;
        }

        let mut remap = vec![0u32; self.vertices.len()];
        let mut next = 0u32;
        for (i, keep) in used.iter().enumerate() {
            if *keep {
                remap[i] = next;
                next += 1;
            }
        }
        let mut i = 0;
        self.vertices.retain(|_| {
            let keep = used[i];
            i += 1;
            keep
        });
        for t in &mut self.triangles {
            *t = t.map(|v| remap[v as usize]);
        }
    }

    /// Total surface area.
    pub fn area(&self) -> f32 {
        self.iter_triangles()
            .map(|[a, b, c]| (b - a).cross(c - a).length() * 0.5)
            .sum()
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the box diagonal
    pub fn diagonal(&self) -> f32 {
        self.size().length()
    }

    /// Box scaled about its center. A flat box gets a thickness so it stays usable
    /// as a widget volume.
    pub fn scaled(&self, factor: f32) -> Self {
        let center = self.center();
        let floor = (self.diagonal() * 0.05).max(1e-3);
        let half = (self.size() * 0.5 * factor).max(Vec3::splat(floor * 0.5));
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, p: Vec3, epsilon: f32) -> bool {
        p.cmpge(self.min - Vec3::splat(epsilon)).all() && p.cmple(self.max + Vec3::splat(epsilon)).all()
    }

    pub fn clamp(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
        ]
    }

    /// The 12 box edges as segments.
    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        let c = self.corners();
        [
            (c[0], c[1]),
            (c[1], c[2]),
            (c[2], c[3]),
            (c[3], c[0]),
            (c[4], c[5]),
            (c[5], c[6]),
            (c[6], c[7]),
            (c[7], c[4]),
            (c[0], c[4]),
            (c[1], c[5]),
            (c[2], c[6]),
            (c[3], c[7]),
        ]
    }
}
