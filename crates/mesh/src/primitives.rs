//! Closed test surfaces, centered at the origin with outward-facing triangles.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::mesh::TriMesh;

/// Axis-aligned cube with edge length `size`: 8 vertices, 12 triangles.
pub fn cube(size: f32) -> TriMesh {
    let h = size * 0.5;
    let vertices = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];
    let triangles = vec![
        // -Z
        [0, 3, 2],
        [0, 2, 1],
        // +Z
        [4, 5, 6],
        [4, 6, 7],
        // -Y
        [0, 1, 5],
        [0, 5, 4],
        // +Y
        [3, 7, 6],
        [3, 6, 2],
        // -X
        [0, 4, 7],
        [0, 7, 3],
        // +X
        [1, 2, 6],
        [1, 6, 5],
    ];
    TriMesh::new(vertices, triangles)
}

/// Latitude/longitude sphere with the poles on the Y axis.
pub fn uv_sphere(radius: f32, rings: u32, sectors: u32) -> TriMesh {
    let rings = rings.max(2);
    let sectors = sectors.max(3);

    let mut vertices = Vec::with_capacity(((rings - 1) * sectors + 2) as usize);
    vertices.push(Vec3::new(0.0, radius, 0.0));
    for r in 1..rings {
        let phi = PI * r as f32 / rings as f32;
        for s in 0..sectors {
            let theta = TAU * s as f32 / sectors as f32;
            vertices.push(
                Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()) * radius,
            );
        }
    }
    vertices.push(Vec3::new(0.0, -radius, 0.0));

    let top = 0u32;
    let bottom = (vertices.len() - 1) as u32;
    let ring = |r: u32, s: u32| 1 + r * sectors + s % sectors;

    let mut triangles = Vec::new();
    for s in 0..sectors {
        triangles.push([top, ring(0, s + 1), ring(0, s)]);
    }
    for r in 0..rings - 2 {
        for s in 0..sectors {
            let (a, b) = (ring(r, s), ring(r, s + 1));
            let (c, d) = (ring(r + 1, s), ring(r + 1, s + 1));
            triangles.push([a, b, d]);
            triangles.push([a, d, c]);
        }
    }
    for s in 0..sectors {
        triangles.push([ring(rings - 2, s), ring(rings - 2, s + 1), bottom]);
    }

    TriMesh::new(vertices, triangles)
}
