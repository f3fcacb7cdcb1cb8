use crate::game_logic::docking::{AttachmentPointId, ObstacleId};
use crate::game_logic::obstacles::{Microtubule, Pose};
use bevy::prelude::*;
use derive_more::{Display, From, Mul};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Mul, Display, From)]
pub struct Speed(pub f32);

impl Speed {
    pub fn new(value: f32) -> Self { Self(value.max(0.0)) }
    pub const ZERO: Speed = Speed(0.0);
}

// Custom math operations for Vec3 * Speed
impl std::ops::Mul<Speed> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: Speed) -> Self::Output { self * rhs.0 }
}

/// The kinase the user steers around the cell
#[derive(Component)]
pub struct Player {
    pub speed: Speed,
    pub lift_speed: Speed,
    pub bounding_radius: f32,
    /// Current facing around the Y axis, eased towards the movement direction
    pub yaw: f32,
}

/// Collision and docking shape of a microtubule entity.
///
/// The entity's `GlobalTransform` supplies the pose, so moving the entity
/// moves its axis and attachment points with it.
#[derive(Component, Debug, Clone, Copy)]
pub struct MicrotubuleBoundary {
    /// Position in the ordered obstacle list registered with docking
    pub id: ObstacleId,
    pub shape: Microtubule,
}

impl MicrotubuleBoundary {
    pub fn new(id: ObstacleId, shape: Microtubule) -> Self {
        Self { id, shape }
    }

    /// The boundary posed at the entity's current world transform
    pub fn at(&self, transform: &GlobalTransform) -> Microtubule {
        self.shape.with_pose(Pose::from(transform))
    }
}

/// Collect microtubules from the world in registration order
pub fn ordered_microtubules<'a>(
    boundaries: impl IntoIterator<Item = (&'a GlobalTransform, &'a MicrotubuleBoundary)>,
) -> Vec<Microtubule> {
    let mut posed: Vec<(ObstacleId, Microtubule)> = boundaries
        .into_iter()
        .map(|(transform, boundary)| (boundary.id, boundary.at(transform)))
        .collect();
    posed.sort_by_key(|(id, _)| *id);
    posed.into_iter().map(|(_, tube)| tube).collect()
}

/// Visual for an attachment point; recoloured once the point is used
#[derive(Component)]
pub struct AttachmentMarker {
    pub point: AttachmentPointId,
}

/// Marker left where the player docked
#[derive(Component)]
pub struct LandingMarker;

/// Segment joining two consecutive landing markers
#[derive(Component)]
pub struct LandingTrail;

#[derive(Component)]
pub struct SceneLight;

#[derive(Component)]
pub struct CameraFollow;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::obstacles::CylinderBoundary;

    #[test]
    fn test_speed_positive_values() {
        let speed = Speed::new(-5.0);
        assert_eq!(speed.0, 0.0); // Negative values clamped to 0

        let positive_speed = Speed::new(10.0);
        assert_eq!(Vec3::X * positive_speed, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_boundary_follows_transform() {
        let boundary = MicrotubuleBoundary::new(ObstacleId(0), Microtubule::standard(Pose::IDENTITY));
        let transform = GlobalTransform::from(Transform::from_xyz(3.0, 1.0, 0.0));
        let tube = boundary.at(&transform);

        assert_eq!(tube.pose.translation, Vec3::new(3.0, 1.0, 0.0));
        assert_eq!(tube.radius(), Microtubule::DEFAULT_RADIUS);
        assert_eq!(tube.length(), Microtubule::DEFAULT_LENGTH);
    }

    #[test]
    fn test_ordered_microtubules_sorts_by_id() {
        let first = MicrotubuleBoundary::new(ObstacleId(0), Microtubule::standard(Pose::IDENTITY));
        let second = MicrotubuleBoundary::new(ObstacleId(1), Microtubule::standard(Pose::IDENTITY));
        let near = GlobalTransform::from(Transform::from_xyz(1.0, 0.0, 0.0));
        let far = GlobalTransform::from(Transform::from_xyz(9.0, 0.0, 0.0));

        let tubes = ordered_microtubules([(&far, &second), (&near, &first)]);
        assert_eq!(tubes[0].pose.translation.x, 1.0);
        assert_eq!(tubes[1].pose.translation.x, 9.0);
    }
}
