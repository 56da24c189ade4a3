use glam::Vec3;
use stlclip_mesh::{Bounds, Plane, TriMesh};

/// A ray in world space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Ray-box intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_bounds(ray: &Ray, bounds: &Bounds) -> Option<f32> {
    let inv_dir = ray.direction.recip();

    let t1 = (bounds.min - ray.origin) * inv_dir;
    let t2 = (bounds.max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Distance along the ray to the plane, if it is hit in front of the origin.
pub fn ray_plane(ray: &Ray, plane: &Plane) -> Option<f32> {
    let denom = plane.normal.dot(ray.direction);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = plane.normal.dot(plane.origin - ray.origin) / denom;
    (t >= 0.0).then_some(t)
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// Result of picking a triangle in a mesh
#[derive(Clone, Debug)]
pub struct TriangleHit {
    pub triangle_index: usize,
    /// Distance from ray origin to hit point
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Find the nearest triangle of `mesh` hit by the ray.
pub fn pick_triangle(ray: &Ray, mesh: &TriMesh) -> Option<TriangleHit> {
    let bounds = mesh.bounds()?;
    ray_bounds(ray, &bounds)?;

    let mut best: Option<TriangleHit> = None;
    for (index, [a, b, c]) in mesh.iter_triangles().enumerate() {
        let Some(distance) = ray_triangle_intersect(ray, a, b, c) else {
            continue;
        };
        if best.as_ref().is_none_or(|hit| distance < hit.distance) {
            best = Some(TriangleHit {
                triangle_index: index,
                distance,
                point: ray.at(distance),
                normal: mesh.face_normal(index),
            });
        }
    }
    best
}

/// Minimum distance between a ray and a line segment.
pub fn ray_segment_distance(ray: &Ray, start: Vec3, end: Vec3) -> f32 {
    let u = ray.direction;
    let v = end - start;
    let w = ray.origin - start;

    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);

    let denom = a * c - b * b;
    let (sc, tc) = if denom < 1e-7 {
        // Nearly parallel
        (0.0, if b > c { d / b } else { e / c.max(1e-12) })
    } else {
        ((b * e - c * d) / denom, (a * e - b * d) / denom)
    };

    let closest_ray = ray.origin + u * sc.max(0.0);
    let closest_segment = start + v * tc.clamp(0.0, 1.0);
    (closest_ray - closest_segment).length()
}
