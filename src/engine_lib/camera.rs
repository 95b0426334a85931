// src/engine_lib/camera.rs

use glam::Mat4;

use crate::engine_lib::portal::PortalSystem;
use crate::engine_lib::scene_types::{PortalId, PortalView, Pose};

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub fov_y_rad: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(75.0, 0.1, 1000.0)
    }
}

impl Camera {
    pub fn new(fov_y_deg: f32, znear: f32, zfar: f32) -> Self {
        Self {
            fov_y_rad: fov_y_deg.to_radians(),
            znear,
            zfar,
        }
    }

    // The pose is CamLocal -> World; the view matrix is its inverse.
    pub fn view_matrix(&self, pose: &Pose) -> Mat4 {
        pose.to_matrix().inverse()
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_rad, aspect_ratio, self.znear, self.zfar)
    }

    // One virtual camera per portal, showing what lies beyond its partner.
    // Only a single level of recursion is produced.
    pub fn portal_views(&self, portals: &PortalSystem, eye: Pose) -> Vec<PortalView> {
        [PortalId::A, PortalId::B]
            .into_iter()
            .filter_map(|source| {
                portals.linked_pose(source, eye).map(|pose| PortalView {
                    source,
                    pose,
                    view_matrix: self.view_matrix(&pose),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let camera = Camera::default();
        let pose = Pose::new(Vec3::new(3.0, 1.0, -4.0), Quat::from_rotation_y(1.2));
        let view = camera.view_matrix(&pose);
        assert!(view.transform_point3(pose.position).length() < 1e-5);
        // a point straight ahead lands on the -Z axis
        let ahead = view.transform_point3(pose.position + pose.forward() * 2.0);
        assert!((ahead - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-4);
    }

    #[test]
    fn projection_maps_near_plane_to_ndc_depth() {
        let camera = Camera::default();
        let projection = camera.projection_matrix(16.0 / 9.0);
        let near = projection.project_point3(Vec3::new(0.0, 0.0, -camera.znear));
        let far = projection.project_point3(Vec3::new(0.0, 0.0, -camera.zfar));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn no_views_until_both_portals_exist() {
        let camera = Camera::default();
        let mut portals = PortalSystem::new();
        let mut events = Vec::new();
        assert!(camera.portal_views(&portals, Pose::IDENTITY).is_empty());
        portals
            .place(PortalId::A, Vec3::ZERO, Vec3::Z, &mut events)
            .expect("valid normal");
        assert!(camera.portal_views(&portals, Pose::IDENTITY).is_empty());
        portals
            .place(PortalId::B, Vec3::new(4.0, 0.0, 0.0), Vec3::X, &mut events)
            .expect("valid normal");
        let views = camera.portal_views(&portals, Pose::IDENTITY);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].source, PortalId::A);
        assert_eq!(views[1].source, PortalId::B);
    }
}
