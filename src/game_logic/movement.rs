use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Raw boolean key state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub boost: bool,
}

/// Configuration for camera-relative movement
#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    /// Horizontal speed in units per second
    pub move_speed: f32,
    /// Vertical speed in units per second
    pub lift_speed: f32,
    pub boost_multiplier: f32,
    /// Fraction of the remaining yaw closed per 1/60 s
    pub turn_easing: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 12.0,
            lift_speed: 9.0,
            boost_multiplier: 2.0,
            turn_easing: 0.1,
        }
    }
}

/// Pure movement result for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementStep {
    pub translation: Vec3,
    /// Yaw the body should turn towards, if it moved horizontally
    pub facing_yaw: Option<f32>,
}

impl MovementStep {
    pub fn is_idle(&self) -> bool {
        self.translation == Vec3::ZERO
    }
}

/// Translate WASD/Space/Shift into a world-space step relative to the camera's orbit angle.
///
/// W moves away from the camera, D strafes to its right. Diagonals are
/// normalised so they are not faster than straight moves.
///
/// # Examples
/// ```
/// use camkii::game_logic::movement::{camera_relative_movement, MovementConfig, MovementKeys};
///
/// let keys = MovementKeys { forward: true, ..Default::default() };
/// let step = camera_relative_movement(keys, 0.0, MovementConfig::default(), 0.5);
/// assert!((step.translation.z + 6.0).abs() < 1e-5);
/// ```
pub fn camera_relative_movement(
    keys: MovementKeys,
    camera_angle: f32,
    config: MovementConfig,
    delta: f32,
) -> MovementStep {
    let forward = Vec3::new(-camera_angle.sin(), 0.0, -camera_angle.cos());
    let right = Vec3::new(camera_angle.cos(), 0.0, -camera_angle.sin());

    let mut horizontal = Vec3::ZERO;
    if keys.forward {
        horizontal += forward;
    }
    if keys.backward {
        horizontal -= forward;
    }
    if keys.left {
        horizontal -= right;
    }
    if keys.right {
        horizontal += right;
    }

    let boost = if keys.boost {
        config.boost_multiplier
    } else {
        1.0
    };

    let horizontal = horizontal.normalize_or_zero() * config.move_speed * boost * delta;

    let mut vertical = 0.0;
    if keys.up {
        vertical += config.lift_speed * boost * delta;
    }
    if keys.down {
        vertical -= config.lift_speed * boost * delta;
    }

    let facing_yaw = (horizontal.length_squared() > f32::EPSILON)
        .then(|| horizontal.x.atan2(horizontal.z));

    MovementStep {
        translation: horizontal + Vec3::Y * vertical,
        facing_yaw,
    }
}

/// Ease `current` yaw towards `target` along the shorter arc, frame-rate independent
pub fn smooth_yaw(current: f32, target: f32, easing: f32, delta: f32) -> f32 {
    let frames = delta * 60.0;
    let factor = 1.0 - (1.0 - easing.clamp(0.0, 1.0)).powf(frames);
    let difference = (target - current + PI).rem_euclid(TAU) - PI;
    current + difference * factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_idle_without_keys() {
        let step = camera_relative_movement(
            MovementKeys::default(),
            0.3,
            MovementConfig::default(),
            1.0 / 60.0,
        );
        assert!(step.is_idle());
        assert_eq!(step.facing_yaw, None);
    }

    #[test]
    fn test_diagonal_is_normalised() {
        let config = MovementConfig::default();
        let keys = MovementKeys {
            forward: true,
            right: true,
            ..Default::default()
        };
        let step = camera_relative_movement(keys, 0.0, config, 1.0);
        assert!((step.translation.length() - config.move_speed).abs() < 1e-4);
    }

    #[test]
    fn test_forward_follows_camera_angle() {
        let keys = MovementKeys {
            forward: true,
            ..Default::default()
        };
        // Camera orbited a quarter turn: forward becomes -X
        let step = camera_relative_movement(keys, FRAC_PI_2, MovementConfig::default(), 1.0);
        assert!(step.translation.x < -11.9);
        assert!(step.translation.z.abs() < 1e-4);
    }

    #[test]
    fn test_boost_and_lift() {
        let config = MovementConfig::default();
        let keys = MovementKeys {
            up: true,
            boost: true,
            ..Default::default()
        };
        let step = camera_relative_movement(keys, 0.0, config, 0.5);
        assert_eq!(step.translation, Vec3::new(0.0, 9.0, 0.0));
        assert_eq!(step.facing_yaw, None);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let keys = MovementKeys {
            left: true,
            right: true,
            up: true,
            down: true,
            ..Default::default()
        };
        let step = camera_relative_movement(keys, 1.0, MovementConfig::default(), 1.0);
        assert!(step.is_idle());
    }

    #[test]
    fn test_smooth_yaw_approaches_target() {
        let one_frame = smooth_yaw(0.0, 1.0, 0.1, 1.0 / 60.0);
        assert!((one_frame - 0.1).abs() < 1e-4);

        let mut yaw = 0.0;
        for _ in 0..600 {
            yaw = smooth_yaw(yaw, 1.0, 0.1, 1.0 / 60.0);
        }
        assert!((yaw - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_smooth_yaw_takes_shorter_arc() {
        // From just below +PI to just above -PI is a small step across the seam
        let yaw = smooth_yaw(3.0, -3.0, 0.5, 1.0 / 60.0);
        assert!(yaw > 3.0);
    }
}
