// src/world_lib/collision.rs

use glam::Vec3;

use crate::world_lib::geometry::{BoxCollider, Capsule, RayHit};

// Maximum distance a placement ray travels.
pub const MAX_RAY_DISTANCE: f32 = 100.0;

// Nearest-hit query against the current wall geometry.
pub trait WorldRaycast {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit>;
}

#[derive(Clone, Debug, Default)]
pub struct CollisionWorld {
    colliders: Vec<BoxCollider>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_collider(&mut self, min: Vec3, max: Vec3) {
        self.colliders.push(BoxCollider::new(min, max));
    }

    pub fn colliders(&self) -> &[BoxCollider] {
        &self.colliders
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colliders)
    }

    // Inside the box, distance is measured to the nearest vertical face.
    pub fn capsule_box_penetration(capsule: &Capsule, collider: &BoxCollider) -> Option<Vec3> {
        let on_segment = capsule.closest_segment_point(collider.center())?;

        let (surface, outward) = if collider.contains(on_segment) {
            let surface = collider.nearest_side_point(on_segment);
            (surface, surface - on_segment)
        } else {
            let surface = collider.closest_point(on_segment);
            (surface, on_segment - surface)
        };

        let distance = surface.distance(on_segment);
        if distance >= capsule.radius {
            return None;
        }
        let direction = outward.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        Some(direction * (capsule.radius - distance))
    }

    // Sequential: each correction moves the capsule before the next box is tested.
    pub fn resolve(&self, capsule: &Capsule) -> Vec3 {
        let mut moved = *capsule;
        let mut total = Vec3::ZERO;
        for collider in &self.colliders {
            if let Some(mut correction) = Self::capsule_box_penetration(&moved, collider) {
                correction.y = 0.0;
                moved = moved.translated(correction);
                total += correction;
            }
        }
        total
    }
}

impl WorldRaycast for CollisionWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }
        self.colliders
            .iter()
            .filter_map(|c| c.ray_intersection(origin, dir))
            .filter(|(t, _)| *t <= MAX_RAY_DISTANCE)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(distance, normal)| RayHit {
                point: origin + dir * distance,
                normal,
                distance,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f32 = 0.3;

    fn world_with_unit_wall() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_collider(Vec3::ZERO, Vec3::new(1.0, 2.0, 1.0));
        world
    }

    #[test]
    fn far_capsule_gets_no_correction() {
        let world = world_with_unit_wall();
        let capsule = Capsule::upright(Vec3::new(3.0, 0.0, 0.5), 1.6, RADIUS);
        assert_eq!(world.resolve(&capsule), Vec3::ZERO);
    }

    #[test]
    fn just_outside_radius_is_clear() {
        let world = world_with_unit_wall();
        let capsule = Capsule::upright(Vec3::new(1.0 + RADIUS + 0.01, 0.0, 0.5), 1.6, RADIUS);
        assert_eq!(world.resolve(&capsule), Vec3::ZERO);
    }

    #[test]
    fn shallow_overlap_pushes_out_horizontally() {
        let world = world_with_unit_wall();
        let capsule = Capsule::upright(Vec3::new(1.1, 0.0, 0.5), 1.6, RADIUS);
        let push = world.resolve(&capsule);
        assert!((push.x - 0.2).abs() < 1e-5, "{push:?}");
        assert_eq!(push.y, 0.0);
        assert!(push.z.abs() < 1e-6);
    }

    #[test]
    fn vertical_component_is_discarded() {
        let world = world_with_unit_wall();
        // Standing on top of the box: separation is purely vertical.
        let capsule = Capsule::upright(Vec3::new(0.5, 2.1, 0.5), 1.6, RADIUS);
        assert_eq!(world.resolve(&capsule), Vec3::ZERO);
    }

    #[test]
    fn centred_capsule_is_pushed_away_from_small_box() {
        let mut world = CollisionWorld::new();
        let half = 0.1;
        world.add_collider(Vec3::new(-half, 0.0, -half), Vec3::new(half, 2.0, half));
        let capsule = Capsule::upright(Vec3::ZERO, 1.6, RADIUS);
        let push = world.resolve(&capsule);
        assert!((push.length() - (RADIUS - half)).abs() < 1e-5, "{push:?}");
        assert_eq!(push.y, 0.0);
        assert!(push.x > 0.0);
    }

    #[test]
    fn degenerate_capsule_is_skipped() {
        let world = world_with_unit_wall();
        let capsule = Capsule::upright(Vec3::new(0.5, 0.0, 0.5), 0.0, RADIUS);
        assert_eq!(world.resolve(&capsule), Vec3::ZERO);
    }

    #[test]
    fn corrections_apply_sequentially() {
        let mut world = CollisionWorld::new();
        world.add_collider(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 1.0));
        world.add_collider(Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 0.0));
        let capsule = Capsule::upright(Vec3::new(0.1, 0.0, 0.5), 1.6, RADIUS);
        let push = world.resolve(&capsule);
        assert!((push.x - 0.2).abs() < 1e-5);
        assert!(push.z.abs() < 1e-6);
    }

    #[test]
    fn raycast_returns_nearest_hit() {
        let mut world = world_with_unit_wall();
        world.add_collider(Vec3::new(0.0, 0.0, -3.0), Vec3::new(1.0, 2.0, -2.0));
        let hit = world
            .raycast(Vec3::new(0.5, 1.0, 4.0), Vec3::new(0.0, 0.0, -2.0))
            .expect("hit");
        assert!((hit.point - Vec3::new(0.5, 1.0, 1.0)).length() < 1e-5);
        assert_eq!(hit.normal, Vec3::Z);
        assert!((hit.distance - 3.0).abs() < 1e-5);
    }

    #[test]
    fn raycast_respects_max_distance() {
        let world = world_with_unit_wall();
        let origin = Vec3::new(0.5, 1.0, MAX_RAY_DISTANCE + 10.0);
        assert!(world.raycast(origin, Vec3::NEG_Z).is_none());
    }
}
