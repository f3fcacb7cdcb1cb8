use crate::config::range_types::*;
use crate::game_logic::{
    CameraRig, CollisionConfig, DockingConfig, DockingController, MovementConfig,
};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default)]
pub struct GameConfig {
    pub username: String,
    /// Lifetime count of completed phosphorylations
    pub phosphorylations: u32,
    pub settings: GameSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
// NOTE: When adding new fields, update config.example.toml in the project root
pub struct GameSettings {
    // Player settings
    pub player_movement_speed: MovementSpeed,
    pub player_lift_speed: MovementSpeed,
    pub player_boost_multiplier: f32,
    pub player_bounding_radius: BoundingRadius,

    // Collision settings
    pub collision_push_out_margin: PushOutMargin,

    // Docking settings
    pub docking_distance: DockingDistance,
    pub docking_duration: DockingDuration,
    pub phosphorylation_cooldown: CooldownSeconds,
    pub dock_attempt_throttle: ThrottleWindow,
    pub undock_grace_period: GracePeriod,
    pub attachment_points_per_microtubule: usize,

    // Camera settings
    pub camera_distance: ZoomDistance,
    pub camera_min_zoom: ZoomDistance,
    pub camera_max_zoom: ZoomDistance,
    pub camera_height: f32,
    pub camera_orbit_speed: f32,
    pub camera_zoom_speed: f32,

    // UI settings
    pub window_width: f32,
    pub window_height: f32,
    pub hud_font_size: f32,

    // Layout settings
    pub layout_file_path: Option<String>, // Relative to the cells directory
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            // Player settings
            player_movement_speed: MovementSpeed::new(12.0),
            player_lift_speed: MovementSpeed::new(9.0),
            player_boost_multiplier: 2.0,
            player_bounding_radius: BoundingRadius::new(1.2),

            // Collision settings
            collision_push_out_margin: PushOutMargin::new(1.05),

            // Docking settings
            docking_distance: DockingDistance::new(3.0),
            docking_duration: DockingDuration::new(4.0),
            phosphorylation_cooldown: CooldownSeconds::new(10.0),
            dock_attempt_throttle: ThrottleWindow::new(0.5),
            undock_grace_period: GracePeriod::new(0.5),
            attachment_points_per_microtubule: 5,

            // Camera settings
            camera_distance: ZoomDistance::new(10.0),
            camera_min_zoom: ZoomDistance::new(5.0),
            camera_max_zoom: ZoomDistance::new(30.0),
            camera_height: 5.0,
            camera_orbit_speed: 1.8, // radians per second
            camera_zoom_speed: 18.0, // units per second

            // UI settings
            window_width: 1280.0,
            window_height: 720.0,
            hud_font_size: 18.0,

            // Layout settings
            layout_file_path: None, // Built-in layout
        }
    }
}

impl GameSettings {
    pub fn docking_config(&self) -> DockingConfig {
        DockingConfig {
            docking_distance: self.docking_distance.get(),
            docking_duration: self.docking_duration.get(),
            cooldown_duration: self.phosphorylation_cooldown.get(),
            throttle_window: self.dock_attempt_throttle.get(),
            grace_period: self.undock_grace_period.get(),
            points_per_obstacle: self.attachment_points_per_microtubule,
            ..default()
        }
    }

    pub fn collision_config(&self) -> CollisionConfig {
        CollisionConfig {
            push_out_margin: self.collision_push_out_margin.get(),
        }
    }

    pub fn movement_config(&self) -> MovementConfig {
        MovementConfig {
            move_speed: self.player_movement_speed.get(),
            lift_speed: self.player_lift_speed.get(),
            boost_multiplier: self.player_boost_multiplier.max(1.0),
            ..default()
        }
    }

    pub fn camera_rig(&self) -> CameraRig {
        let min_zoom = self.camera_min_zoom.get();
        let max_zoom = self.camera_max_zoom.get().max(min_zoom);
        CameraRig {
            distance: self.camera_distance.get().clamp(min_zoom, max_zoom),
            height: self.camera_height,
            min_zoom,
            max_zoom,
            ..default()
        }
    }
}

/// Where the running game persists its `GameConfig`
#[derive(Resource, Clone, Debug)]
pub struct GameConfigPath(pub PathBuf);

/// The docking state machine, owned by the ECS world
#[derive(Resource, Default, Deref, DerefMut)]
pub struct DockingControllerResource(pub DockingController);

/// Orbit camera state driven by the arrow keys
#[derive(Resource, Default, Deref, DerefMut)]
pub struct CameraRigResource(pub CameraRig);
