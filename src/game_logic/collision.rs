use crate::game_logic::obstacles::CylinderBoundary;
use bevy::prelude::*;

/// Configuration for cylinder penetration resolution
#[derive(Debug, Clone, Copy)]
pub struct CollisionConfig {
    /// Multiplier applied to the penetration depth when pushing out
    pub push_out_margin: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            push_out_margin: 1.05,
        }
    }
}

/// Result of resolving a body against the obstacle set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolution {
    pub corrected: Vec3,
    pub collided: bool,
    /// Outward normal of the obstacle that was hit
    pub normal: Option<Vec3>,
    /// Index of the obstacle that was hit
    pub obstacle: Option<usize>,
}

impl CollisionResolution {
    fn clear(position: Vec3) -> Self {
        Self {
            corrected: position,
            collided: false,
            normal: None,
            obstacle: None,
        }
    }
}

/// Push a spherical body out of the first capped cylinder it penetrates.
///
/// Obstacles are scanned in order and the first overlap wins; there is no
/// deepest-penetration search across simultaneous hits. Bodies beyond either
/// end cap (`|axial| > length / 2`) never collide with that obstacle.
///
/// # Examples
/// ```
/// use camkii::game_logic::collision::{resolve_cylinder_collisions, CollisionConfig};
/// use camkii::game_logic::obstacles::{Microtubule, Pose};
/// use bevy::prelude::Vec3;
///
/// let tubes = [Microtubule::standard(Pose::IDENTITY)];
/// let hit = resolve_cylinder_collisions(Vec3::new(1.0, 0.0, 0.0), 1.0, &tubes, CollisionConfig::default());
/// assert!(hit.collided);
/// assert!(hit.corrected.x > 1.5);
///
/// let miss = resolve_cylinder_collisions(Vec3::new(0.0, 0.0, 8.0), 1.0, &tubes, CollisionConfig::default());
/// assert!(!miss.collided);
/// ```
pub fn resolve_cylinder_collisions<O: CylinderBoundary>(
    position: Vec3,
    body_radius: f32,
    obstacles: &[O],
    config: CollisionConfig,
) -> CollisionResolution {
    for (index, obstacle) in obstacles.iter().enumerate() {
        let axis = obstacle.axis();
        let axial_distance = axis.axial_distance(position);

        if !axis.contains_axially(axial_distance) {
            continue;
        }

        let radial = position - axis.point_at(axial_distance);
        let radial_distance = radial.length();
        let combined = obstacle.radius() + body_radius;

        if radial_distance >= combined {
            continue;
        }

        // Body centered on the axis has no radial direction; any perpendicular will do
        let normal = if radial_distance > f32::EPSILON {
            radial / radial_distance
        } else {
            axis.direction.any_orthonormal_vector()
        };
        let penetration = combined - radial_distance;

        return CollisionResolution {
            corrected: position + normal * penetration * config.push_out_margin,
            collided: true,
            normal: Some(normal),
            obstacle: Some(index),
        };
    }

    CollisionResolution::clear(position)
}

/// Radial distance from `position` to the closest cylinder axis it lies alongside
pub fn radial_clearance<O: CylinderBoundary>(position: Vec3, obstacle: &O) -> Option<f32> {
    let axis = obstacle.axis();
    let axial_distance = axis.axial_distance(position);
    axis.contains_axially(axial_distance)
        .then(|| (position - axis.point_at(axial_distance)).length())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::obstacles::{Microtubule, Pose};
    use std::f32::consts::FRAC_PI_2;

    const BODY_RADIUS: f32 = 1.2;

    fn tube_at(x: f32, z: f32) -> Microtubule {
        Microtubule::standard(Pose::from_translation(Vec3::new(x, 0.0, z)))
    }

    #[test]
    fn test_no_collision_outside_combined_radius() {
        let tubes = [tube_at(0.0, 0.0)];
        let combined = 0.5 + BODY_RADIUS;

        for angle in [0.0_f32, 0.7, 1.9, 3.1, 4.4, 5.8] {
            for axial in [-4.9, -2.0, 0.0, 3.3, 4.9] {
                let position = Vec3::new(angle.cos(), angle.sin(), 0.0) * (combined + 0.01)
                    + Vec3::Z * axial;
                let result =
                    resolve_cylinder_collisions(position, BODY_RADIUS, &tubes, CollisionConfig::default());
                assert!(!result.collided, "unexpected hit at {position:?}");
                assert_eq!(result.corrected, position);
            }
        }
    }

    #[test]
    fn test_penetration_is_pushed_out() {
        let tubes = [tube_at(0.0, 0.0)];
        let position = Vec3::new(1.0, 0.0, 2.0);

        let result =
            resolve_cylinder_collisions(position, BODY_RADIUS, &tubes, CollisionConfig::default());

        assert!(result.collided);
        assert_eq!(result.obstacle, Some(0));
        assert_eq!(result.normal, Some(Vec3::X));
        // Penetration 0.7 scaled by the 1.05 margin
        assert!((result.corrected.x - (1.0 + 0.7 * 1.05)).abs() < 1e-5);
        assert_eq!(result.corrected.z, 2.0);
    }

    #[test]
    fn test_resolution_is_stable_when_repeated() {
        let tubes = [
            tube_at(0.0, 0.0),
            Microtubule::standard(Pose::new(
                Vec3::new(6.0, 1.0, -2.0),
                Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(0.3),
            )),
        ];
        let combined = 0.5 + BODY_RADIUS;

        let starts = [
            Vec3::new(0.3, 0.2, 1.0),
            Vec3::new(-0.9, 0.4, -4.0),
            Vec3::new(6.2, 1.5, -2.0),
            Vec3::new(4.0, 1.1, -1.5),
        ];

        for start in starts {
            let first =
                resolve_cylinder_collisions(start, BODY_RADIUS, &tubes, CollisionConfig::default());
            assert!(first.collided, "{start:?} should start inside");

            let index = first.obstacle.unwrap_or_default();
            let clearance = radial_clearance(first.corrected, &tubes[index]).unwrap_or(f32::MAX);
            assert!(clearance >= combined - 1e-4);

            let second = resolve_cylinder_collisions(
                first.corrected,
                BODY_RADIUS,
                &tubes[index..=index],
                CollisionConfig::default(),
            );
            assert!(!second.collided);
        }
    }

    #[test]
    fn test_random_penetrations_resolve_stably() {
        use rand::{Rng, SeedableRng};
        use rand_pcg::Pcg64;
        use std::f32::consts::PI;

        let mut rng = Pcg64::seed_from_u64(0xCA3C11);
        let config = CollisionConfig::default();

        for _ in 0..5_000 {
            let rotation = Quat::from_euler(
                EulerRot::XYZ,
                rng.gen_range(-PI..PI),
                rng.gen_range(-PI..PI),
                rng.gen_range(-PI..PI),
            );
            let center = Vec3::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-20.0..20.0),
            );
            let tube = Microtubule::new(
                Pose::new(center, rotation),
                rng.gen_range(0.2..1.5),
                rng.gen_range(2.0..15.0),
            )
            .unwrap();
            let body_radius = rng.gen_range(0.2..2.0);
            let combined = tube.radius() + body_radius;

            // A point strictly inside the combined radius and within the caps
            let axis = tube.axis();
            let sample = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let outward = (sample - axis.direction * sample.dot(axis.direction)).normalize_or_zero();
            if outward == Vec3::ZERO {
                continue;
            }
            let axial = rng.gen_range(-0.95..0.95) * axis.half_length;
            let depth = rng.gen_range(0.05..combined * 0.999);
            let position = axis.point_at(axial) + outward * depth;

            let first = resolve_cylinder_collisions(position, body_radius, &[tube], config);
            assert!(first.collided, "{position:?} should start inside {tube:?}");

            let clearance = radial_clearance(first.corrected, &tube).unwrap_or(f32::MAX);
            assert!(
                clearance >= combined - 1e-3,
                "clearance {clearance} below {combined} for {tube:?}"
            );

            let second = resolve_cylinder_collisions(first.corrected, body_radius, &[tube], config);
            if second.collided {
                let first_step = first.corrected.distance(position);
                let second_step = second.corrected.distance(first.corrected);
                assert!(second_step < first_step);
            }
        }
    }

    #[test]
    fn test_axial_cap_is_respected() {
        let tubes = [tube_at(0.0, 0.0)];

        // Right next to the axis but beyond the end cap
        let beyond = Vec3::new(0.2, 0.0, 5.5);
        let result =
            resolve_cylinder_collisions(beyond, BODY_RADIUS, &tubes, CollisionConfig::default());
        assert!(!result.collided);

        // Exactly on the cap plane still counts
        let on_cap = Vec3::new(0.2, 0.0, 5.0);
        let result =
            resolve_cylinder_collisions(on_cap, BODY_RADIUS, &tubes, CollisionConfig::default());
        assert!(result.collided);
    }

    #[test]
    fn test_degenerate_radial_uses_fallback_normal() {
        let tubes = [tube_at(0.0, 0.0)];
        let on_axis = Vec3::new(0.0, 0.0, 1.0);

        let result =
            resolve_cylinder_collisions(on_axis, BODY_RADIUS, &tubes, CollisionConfig::default());

        assert!(result.collided);
        let normal = result.normal.unwrap_or_default();
        assert!((normal.length() - 1.0).abs() < 1e-5);
        assert!(normal.dot(Vec3::Z).abs() < 1e-5);
        assert!(result.corrected.is_finite());
    }

    #[test]
    fn test_first_match_wins() {
        // Two overlapping tubes; the body touches both
        let tubes = [tube_at(0.0, 0.0), tube_at(1.0, 0.0)];
        let result = resolve_cylinder_collisions(
            Vec3::new(0.5, 0.5, 0.0),
            BODY_RADIUS,
            &tubes,
            CollisionConfig::default(),
        );
        assert_eq!(result.obstacle, Some(0));
    }

    #[test]
    fn test_empty_obstacles_is_noop() {
        let tubes: [Microtubule; 0] = [];
        let position = Vec3::new(1.0, 2.0, 3.0);
        let result =
            resolve_cylinder_collisions(position, BODY_RADIUS, &tubes, CollisionConfig::default());
        assert!(!result.collided);
        assert_eq!(result.corrected, position);
    }
}
