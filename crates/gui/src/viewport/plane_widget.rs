//! Interactive cutting plane.
//!
//! The widget is placed around a mesh: its volume is the mesh bounds scaled by
//! the place factor, the plane starts at the volume center facing the default
//! axis. The plane can then be pushed along its normal (the origin never
//! leaves the volume) or have its normal rotated. The outline drawn on screen
//! is the polygon where the plane cuts the volume.

use glam::{Quat, Vec3};
use stlclip_mesh::{Axis, Bounds, Plane};

use super::mesh::LineMeshData;
use super::picking::{ray_plane, ray_segment_distance, Ray};

pub const DEFAULT_PLACE_FACTOR: f32 = 1.25;

/// Part of the widget under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPart {
    /// The plane surface: dragging pushes it along the normal
    Plane,
    /// The normal arrow: dragging tilts the normal
    Normal,
}

#[derive(Debug, Clone)]
pub struct PlaneWidget {
    pub place_factor: f32,
    pub default_axis: Axis,
    volume: Option<Bounds>,
    initial: Plane,
    plane: Plane,
    /// Part being dragged, if any
    pub active: Option<WidgetPart>,
}

impl Default for PlaneWidget {
    fn default() -> Self {
        Self::new(DEFAULT_PLACE_FACTOR, Axis::default())
    }
}

impl PlaneWidget {
    pub fn new(place_factor: f32, default_axis: Axis) -> Self {
        Self {
            place_factor,
            default_axis,
            volume: None,
            initial: Plane::default(),
            plane: Plane::default(),
            active: None,
        }
    }

    /// Show the widget around `bounds` and return the starting plane.
    pub fn place(&mut self, bounds: Bounds) -> Plane {
        let volume = bounds.scaled(self.place_factor.max(1.0));
        self.initial = Plane::from_axis(volume.center(), self.default_axis);
        self.plane = self.initial;
        self.volume = Some(volume);
        self.active = None;
        tracing::debug!(?volume, normal = ?self.plane.normal, "plane widget placed");
        self.plane
    }

    pub fn hide(&mut self) {
        self.volume = None;
        self.active = None;
    }

    pub fn is_visible(&self) -> bool {
        self.volume.is_some()
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Volume the widget lives in, while visible.
    pub fn volume(&self) -> Option<Bounds> {
        self.volume
    }

    /// Back to the placement plane.
    pub fn reset(&mut self) -> Plane {
        self.plane = self.initial;
        self.plane
    }

    /// Move the plane by `distance` along its normal.
    pub fn push(&mut self, distance: f32) -> Plane {
        self.set_origin(self.plane.origin + self.plane.normal * distance)
    }

    pub fn set_origin(&mut self, origin: Vec3) -> Plane {
        self.plane.origin = match self.volume {
            Some(volume) => volume.clamp(origin),
            None => origin,
        };
        self.plane
    }

    /// Point the plane along `normal`, keeping the origin. Zero vectors are ignored.
    pub fn set_normal(&mut self, normal: Vec3) -> Plane {
        if let Some(n) = normal.try_normalize() {
            self.plane.normal = n;
        }
        self.plane
    }

    /// Snap the normal to a coordinate axis.
    pub fn align_to(&mut self, axis: Axis) -> Plane {
        self.set_normal(axis.unit())
    }

    /// Rotate the normal by `angle` radians about `axis`.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) -> Plane {
        let Some(axis) = axis.try_normalize() else {
            return self.plane;
        };
        self.set_normal(Quat::from_axis_angle(axis, angle) * self.plane.normal)
    }

    /// Length of the normal arrow.
    pub fn handle_length(&self) -> f32 {
        self.volume.map_or(1.0, |v| v.diagonal() * 0.25)
    }

    pub fn handle_tip(&self) -> Vec3 {
        self.plane.origin + self.plane.normal * self.handle_length()
    }

    /// Polygon where the plane crosses the widget volume, ordered around its center.
    pub fn outline(&self) -> Vec<Vec3> {
        let Some(volume) = self.volume else {
            return Vec::new();
        };

        let merge_eps = volume.diagonal() * 1e-5;
        let mut points: Vec<Vec3> = Vec::new();
        for (a, b) in volume.edges() {
            let Some(t) = self.plane.segment_crossing(a, b) else {
                continue;
            };
            let p = a + (b - a) * t;
            if !points.iter().any(|q| q.distance(p) <= merge_eps) {
                points.push(p);
            }
        }
        if points.len() < 3 {
            return points;
        }

        let center = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        let (u, v) = self.plane.basis();
        points.sort_by(|a, b| {
            let da = *a - center;
            let db = *b - center;
            da.dot(v)
                .atan2(da.dot(u))
                .total_cmp(&db.dot(v).atan2(db.dot(u)))
        });
        points
    }

    /// Which part of the widget the ray hits. The arrow wins over the surface.
    pub fn hit_test(&self, ray: &Ray) -> Option<WidgetPart> {
        let volume = self.volume?;

        let tolerance = volume.diagonal() * 0.03;
        if ray_segment_distance(ray, self.plane.origin, self.handle_tip()) < tolerance {
            return Some(WidgetPart::Normal);
        }

        let t = ray_plane(ray, &self.plane)?;
        let p = ray.at(t);
        volume
            .contains(p, tolerance)
            .then_some(WidgetPart::Plane)
    }

    /// Outline, normal arrow and arrowhead as line geometry.
    pub fn lines(&self, highlight: bool) -> LineMeshData {
        let mut lines = LineMeshData::default();
        if !self.is_visible() {
            return lines;
        }

        let outline_color = if highlight {
            [1.0, 0.85, 0.3, 1.0]
        } else {
            [0.95, 0.6, 0.15, 1.0]
        };
        let arrow_color = [0.95, 0.95, 0.3, 1.0];

        let outline = self.outline();
        if outline.len() >= 3 {
            lines.push_loop(&outline, outline_color);
        }

        let origin = self.plane.origin;
        let tip = self.handle_tip();
        lines.push_line(origin, tip, arrow_color);

        let (u, v) = self.plane.basis();
        let head = self.handle_length() * 0.15;
        let back = tip - self.plane.normal * head;
        for side in [u, -u, v, -v] {
            lines.push_line(tip, back + side * head * 0.5, arrow_color);
        }
        lines
    }
}
