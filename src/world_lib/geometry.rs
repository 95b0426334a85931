// src/world_lib/geometry.rs

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct BoxCollider {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoxCollider {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    // Ties go to the first face in +x, -x, +z, -z order.
    pub fn nearest_side_point(&self, point: Vec3) -> Vec3 {
        let candidates = [
            Vec3::new(self.max.x, point.y, point.z),
            Vec3::new(self.min.x, point.y, point.z),
            Vec3::new(point.x, point.y, self.max.z),
            Vec3::new(point.x, point.y, self.min.z),
        ];
        let mut best = candidates[0];
        let mut best_dist = best.distance_squared(point);
        for candidate in &candidates[1..] {
            let dist = candidate.distance_squared(point);
            if dist < best_dist {
                best = *candidate;
                best_dist = dist;
            }
        }
        best
    }

    // Slab test. Returns the entry distance along a unit `direction` and the entered face normal.
    pub fn ray_intersection(&self, origin: Vec3, direction: Vec3) -> Option<(f32, Vec3)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_normal = Vec3::ZERO;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if d.abs() < 1e-8 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
            let mut normal = Vec3::ZERO;
            normal[axis] = -d.signum();
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_enter {
                t_enter = t0;
                enter_normal = normal;
            }
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_exit < 0.0 || t_enter < 0.0 {
            // Behind the ray, or the origin is inside the box.
            return None;
        }
        Some((t_enter, enter_normal))
    }
}

// Vertical segment plus radius approximating an upright body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
}

impl Capsule {
    pub fn upright(ground: Vec3, height: f32, radius: f32) -> Self {
        Self {
            start: ground,
            end: ground + Vec3::Y * height,
            radius,
        }
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            radius: self.radius,
        }
    }

    // Closest point on the central segment to `target`, or `None` for a zero-length segment.
    pub fn closest_segment_point(&self, target: Vec3) -> Option<Vec3> {
        let segment = self.end - self.start;
        let length = segment.length();
        if length <= f32::EPSILON {
            return None;
        }
        let dir = segment / length;
        let t = (target - self.start).dot(dir).clamp(0.0, length);
        Some(self.start + dir * t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}
