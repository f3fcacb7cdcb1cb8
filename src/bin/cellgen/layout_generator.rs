use bevy::prelude::*;
use camkii::game_logic::collision::{resolve_cylinder_collisions, CollisionConfig};
use camkii::game_logic::errors::{CamkiiError, CamkiiResult};
use camkii::{CellLayout, MicrotubulePlacement};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::f32::consts::{FRAC_PI_2, PI};

/// Attempts per microtubule before giving up on finding a free spot
const MAX_PLACEMENT_ATTEMPTS: usize = 64;

pub struct LayoutGenerationConfig {
    pub name: String,
    pub count: usize,
    pub seed: u64,
    /// Microtubule centers fall inside a sphere of this radius
    pub extent: f32,
    pub player_spawn: Vec3,
    /// Clear space kept around the player spawn
    pub spawn_clearance: f32,
    pub radius: f32,
    pub length: f32,
}

pub struct LayoutGenerator;

impl LayoutGenerator {
    pub fn generate(config: LayoutGenerationConfig) -> CamkiiResult<CellLayout> {
        if config.extent <= 0.0 {
            return Err(CamkiiError::InvalidLayoutData {
                reason: format!("Extent must be positive, got {}", config.extent),
            });
        }

        let mut rng = Pcg64::seed_from_u64(config.seed);
        let mut placements = Vec::with_capacity(config.count);

        for index in 0..config.count {
            let placement = (0..MAX_PLACEMENT_ATTEMPTS)
                .map(|_| Self::random_placement(&mut rng, &config))
                .find(|placement| Self::keeps_spawn_clear(placement, &config))
                .ok_or_else(|| CamkiiError::InvalidLayoutData {
                    reason: format!(
                        "Could not place microtubule {index} without blocking the player spawn"
                    ),
                })?;
            placements.push(placement);
        }

        CellLayout::new(config.name, config.player_spawn, placements)
    }

    fn random_placement(rng: &mut Pcg64, config: &LayoutGenerationConfig) -> MicrotubulePlacement {
        // Uniform direction, cube-root radius for uniform density in the ball
        let direction = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        )
        .normalize_or(Vec3::X);
        let distance = config.extent * rng.gen_range(0.0f32..=1.0).cbrt();

        let rotation = Vec3::new(
            FRAC_PI_2 + rng.gen_range(-0.5..=0.5),
            rng.gen_range(-PI..=PI),
            rng.gen_range(-0.5..=0.5),
        );

        MicrotubulePlacement {
            radius: config.radius,
            length: config.length,
            ..MicrotubulePlacement::new(direction * distance, rotation)
        }
    }

    fn keeps_spawn_clear(placement: &MicrotubulePlacement, config: &LayoutGenerationConfig) -> bool {
        let Ok(tube) = placement.to_microtubule() else {
            return false;
        };
        !resolve_cylinder_collisions(
            config.player_spawn,
            config.spawn_clearance,
            &[tube],
            CollisionConfig::default(),
        )
        .collided
    }
}
