//! Cylindrical obstacle boundaries (microtubules) and their world-space axes

use crate::game_logic::errors::{CamkiiError, CamkiiResult};
use bevy::prelude::*;

/// Anything that can report where it currently sits in the world.
///
/// Scene-graph nodes implement this so that obstacle axes are derived from the
/// live transform on every query instead of a cached copy.
pub trait WorldTransform {
    /// World-space `(position, orientation)`
    fn world_transform(&self) -> (Vec3, Quat);

    /// Map a point from local space into world space (scale is ignored)
    fn local_to_world(&self, local: Vec3) -> Vec3 {
        let (position, rotation) = self.world_transform();
        position + rotation * local
    }

    /// Rotate a local direction into world space
    fn direction_to_world(&self, local: Vec3) -> Vec3 {
        let (_, rotation) = self.world_transform();
        (rotation * local).normalize_or(local)
    }
}

impl WorldTransform for Transform {
    fn world_transform(&self) -> (Vec3, Quat) {
        (self.translation, self.rotation)
    }
}

impl WorldTransform for GlobalTransform {
    fn world_transform(&self) -> (Vec3, Quat) {
        (self.translation(), self.rotation())
    }
}

/// Plain position + orientation pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::IDENTITY)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl WorldTransform for Pose {
    fn world_transform(&self) -> (Vec3, Quat) {
        (self.translation, self.rotation)
    }
}

impl From<&GlobalTransform> for Pose {
    fn from(transform: &GlobalTransform) -> Self {
        Self::new(transform.translation(), transform.rotation())
    }
}

impl From<Transform> for Pose {
    fn from(transform: Transform) -> Self {
        Self::new(transform.translation, transform.rotation)
    }
}

/// World-space axis of a finite cylinder, centered on `origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderAxis {
    pub origin: Vec3,
    /// Unit direction of the cylinder's long axis
    pub direction: Vec3,
    pub half_length: f32,
}

impl CylinderAxis {
    /// Signed distance of `point` along the axis, measured from the origin
    pub fn axial_distance(&self, point: Vec3) -> f32 {
        (point - self.origin).dot(self.direction)
    }

    /// Point on the (infinite) axis line at the given signed distance
    pub fn point_at(&self, axial_distance: f32) -> Vec3 {
        self.origin + self.direction * axial_distance
    }

    /// Whether the axial distance falls within the capped extent
    pub fn contains_axially(&self, axial_distance: f32) -> bool {
        axial_distance.abs() <= self.half_length
    }

    /// Vector from the closest axis point to `point`, perpendicular to the axis
    pub fn radial_offset(&self, point: Vec3) -> Vec3 {
        point - self.point_at(self.axial_distance(point))
    }
}

/// A static cylindrical collision volume.
///
/// The cylinder's long axis is the local +Z axis of its transform and it is
/// centered on the transform origin.
pub trait CylinderBoundary: WorldTransform {
    fn radius(&self) -> f32;

    /// Full length along the axis
    fn length(&self) -> f32;

    fn axis(&self) -> CylinderAxis {
        let (origin, rotation) = self.world_transform();
        CylinderAxis {
            origin,
            direction: (rotation * Vec3::Z).normalize_or(Vec3::Z),
            half_length: self.length() * 0.5,
        }
    }
}

/// Concrete microtubule boundary: a pose plus immutable cylinder dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Microtubule {
    pub pose: Pose,
    radius: f32,
    length: f32,
}

impl Microtubule {
    pub const DEFAULT_RADIUS: f32 = 0.5;
    pub const DEFAULT_LENGTH: f32 = 10.0;

    /// Create a microtubule, rejecting non-positive or non-finite dimensions
    pub fn new(pose: Pose, radius: f32, length: f32) -> CamkiiResult<Self> {
        let valid = radius.is_finite() && length.is_finite() && radius > 0.0 && length > 0.0;
        if !valid {
            return Err(CamkiiError::InvalidObstacle { radius, length });
        }
        Ok(Self {
            pose,
            radius,
            length,
        })
    }

    /// Microtubule with the standard 0.5 x 10 dimensions
    pub fn standard(pose: Pose) -> Self {
        Self {
            pose,
            radius: Self::DEFAULT_RADIUS,
            length: Self::DEFAULT_LENGTH,
        }
    }

    /// Same dimensions, placed at a different pose
    pub fn with_pose(self, pose: Pose) -> Self {
        Self { pose, ..self }
    }
}

impl WorldTransform for Microtubule {
    fn world_transform(&self) -> (Vec3, Quat) {
        self.pose.world_transform()
    }
}

impl CylinderBoundary for Microtubule {
    fn radius(&self) -> f32 {
        self.radius
    }

    fn length(&self) -> f32 {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_microtubule_rejects_bad_dimensions() {
        assert!(Microtubule::new(Pose::IDENTITY, 0.0, 10.0).is_err());
        assert!(Microtubule::new(Pose::IDENTITY, 0.5, -1.0).is_err());
        assert!(Microtubule::new(Pose::IDENTITY, f32::NAN, 10.0).is_err());
        assert!(Microtubule::new(Pose::IDENTITY, 0.5, 10.0).is_ok());
    }

    #[test]
    fn test_axis_follows_rotation() {
        // Rotating +Z by 90 degrees around X points it down -Y
        let tube = Microtubule::standard(Pose::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_x(FRAC_PI_2),
        ));
        let axis = tube.axis();

        assert_eq!(axis.origin, Vec3::new(1.0, 2.0, 3.0));
        assert!((axis.direction - Vec3::NEG_Y).length() < 1e-5);
        assert_eq!(axis.half_length, 5.0);
    }

    #[test]
    fn test_axis_is_derived_from_live_pose() {
        let mut tube = Microtubule::standard(Pose::IDENTITY);
        assert_eq!(tube.axis().origin, Vec3::ZERO);

        tube.pose.translation = Vec3::new(4.0, 0.0, 0.0);
        assert_eq!(tube.axis().origin, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_axial_projection() {
        let axis = Microtubule::standard(Pose::IDENTITY).axis();
        let point = Vec3::new(2.0, 0.0, 3.0);

        assert_eq!(axis.axial_distance(point), 3.0);
        assert_eq!(axis.point_at(3.0), Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(axis.radial_offset(point), Vec3::new(2.0, 0.0, 0.0));
        assert!(axis.contains_axially(5.0));
        assert!(!axis.contains_axially(-5.1));
    }

    #[test]
    fn test_local_to_world() {
        let pose = Pose::new(Vec3::new(0.0, 1.0, 0.0), Quat::from_rotation_y(FRAC_PI_2));
        let world = pose.local_to_world(Vec3::new(0.0, 0.0, 2.0));
        assert!((world - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-5);
    }
}
