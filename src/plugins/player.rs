use crate::cell::CellLayout;
use crate::components::*;
use crate::game_logic::{
    camera_relative_movement, resolve_cylinder_collisions, smooth_yaw, MovementConfig, MovementKeys,
};
use crate::plugins::environment::setup_cell;
use crate::plugins::CellSystems;
use crate::resources::{CameraRigResource, DockingControllerResource, GameConfig};
use bevy::prelude::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraRigResource>()
            .configure_sets(
                Update,
                (CellSystems::Movement, CellSystems::Docking, CellSystems::Presentation).chain(),
            )
            .add_systems(Startup, spawn_player.after(setup_cell))
            .add_systems(
                Update,
                (control_camera, move_player, resolve_player_collisions)
                    .chain()
                    .in_set(CellSystems::Movement),
            )
            .add_systems(Update, follow_camera.in_set(CellSystems::Presentation));
    }
}

fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut camera_rig: ResMut<CameraRigResource>,
    game_config: Res<GameConfig>,
    layout: Option<Res<CellLayout>>,
) {
    let settings = &game_config.settings;
    let spawn = layout
        .map(|layout| layout.player_spawn)
        .unwrap_or_else(|| CellLayout::default().player_spawn);
    let bounding_radius = settings.player_bounding_radius.get();

    **camera_rig = settings.camera_rig();

    info!("Spawning player at ({:.1}, {:.1}, {:.1})", spawn.x, spawn.y, spawn.z);

    // The kinase holoenzyme as a simple sphere
    commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(bounding_radius * 0.8))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.85, 0.35, 0.2),
                ..default()
            })),
            Transform::from_translation(spawn),
            Player {
                speed: Speed::new(settings.player_movement_speed.get()),
                lift_speed: Speed::new(settings.player_lift_speed.get()),
                bounding_radius,
                yaw: 0.0,
            },
        ))
        .with_children(|parent| {
            // Nose so the facing direction is visible
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.3, 0.3, 0.6))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(1.0, 0.85, 0.3),
                    ..default()
                })),
                Transform::from_xyz(0.0, 0.0, bounding_radius * 0.8),
            ));
        });
}

/// Arrow keys orbit and zoom the camera
fn control_camera(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    game_config: Res<GameConfig>,
    mut camera_rig: ResMut<CameraRigResource>,
) {
    let settings = &game_config.settings;
    let delta = time.delta_secs();

    if keyboard.pressed(KeyCode::ArrowLeft) {
        camera_rig.orbit(settings.camera_orbit_speed * delta);
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        camera_rig.orbit(-settings.camera_orbit_speed * delta);
    }
    if keyboard.pressed(KeyCode::ArrowUp) {
        camera_rig.zoom(settings.camera_zoom_speed * delta);
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        camera_rig.zoom(-settings.camera_zoom_speed * delta);
    }
}

fn read_movement_keys(keyboard: &ButtonInput<KeyCode>) -> MovementKeys {
    MovementKeys {
        forward: keyboard.pressed(KeyCode::KeyW),
        backward: keyboard.pressed(KeyCode::KeyS),
        left: keyboard.pressed(KeyCode::KeyA),
        right: keyboard.pressed(KeyCode::KeyD),
        up: keyboard.pressed(KeyCode::Space),
        down: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        boost: keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
    }
}

fn move_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    game_config: Res<GameConfig>,
    camera_rig: Res<CameraRigResource>,
    docking: Res<DockingControllerResource>,
    mut player_query: Query<(&mut Transform, &mut Player)>,
) {
    // Held in place while docked
    if docking.is_docked() {
        return;
    }

    let Ok((mut transform, mut player)) = player_query.single_mut() else {
        return;
    };

    let base = game_config.settings.movement_config();
    let config = MovementConfig {
        move_speed: player.speed.0,
        lift_speed: player.lift_speed.0,
        ..base
    };

    let delta = time.delta_secs();
    let step = camera_relative_movement(read_movement_keys(&keyboard), camera_rig.angle, config, delta);
    if step.is_idle() {
        return;
    }
    transform.translation += step.translation;

    if let Some(target) = step.facing_yaw {
        player.yaw = smooth_yaw(player.yaw, target, config.turn_easing, delta);
        transform.rotation = Quat::from_rotation_y(player.yaw);
    }
}

fn resolve_player_collisions(
    game_config: Res<GameConfig>,
    docking: Res<DockingControllerResource>,
    microtubules: Query<(&GlobalTransform, &MicrotubuleBoundary)>,
    mut player_query: Query<(&mut Transform, &Player)>,
) {
    // Docking snaps the player onto the surface on purpose
    if docking.is_docked() {
        return;
    }

    let Ok((mut transform, player)) = player_query.single_mut() else {
        return;
    };

    let tubes = ordered_microtubules(microtubules.iter());
    let resolution = resolve_cylinder_collisions(
        transform.translation,
        player.bounding_radius,
        &tubes,
        game_config.settings.collision_config(),
    );

    if resolution.collided {
        trace!(
            "Player pushed out of microtubule {:?} to {}",
            resolution.obstacle,
            resolution.corrected
        );
        transform.translation = resolution.corrected;
    }
}

fn follow_camera(
    camera_rig: Res<CameraRigResource>,
    player_query: Query<&Transform, (With<Player>, Without<CameraFollow>)>,
    mut camera_query: Query<&mut Transform, (With<CameraFollow>, Without<Player>)>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    for mut camera_transform in camera_query.iter_mut() {
        camera_transform.translation = camera_rig.eye(player_transform.translation);
        camera_transform.look_at(player_transform.translation, Vec3::Y);
    }
}
