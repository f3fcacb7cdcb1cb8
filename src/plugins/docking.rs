use crate::components::*;
use crate::config::save_config_to;
use crate::game_logic::{DockingController, DockingEvent, PlayerBody};
use crate::plugins::CellSystems;
use crate::resources::{DockingControllerResource, GameConfig, GameConfigPath};
use bevy::prelude::*;

pub struct DockingPlugin;

impl Plugin for DockingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DockingControllerResource>()
            .add_event::<DockingEvent>()
            .add_systems(Startup, setup_docking)
            .add_systems(
                Update,
                (
                    register_new_microtubules,
                    run_docking,
                    apply_docking_events,
                    animate_flashes,
                )
                    .chain()
                    .in_set(CellSystems::Docking),
            );
    }
}

/// Shared assets for docking visuals
#[derive(Resource)]
pub struct DockingAssets {
    marker_mesh: Handle<Mesh>,
    landing_mesh: Handle<Mesh>,
    flash_mesh: Handle<Mesh>,
    available: Handle<StandardMaterial>,
    used: Handle<StandardMaterial>,
    landing: Handle<StandardMaterial>,
    trail: Handle<StandardMaterial>,
}

/// Expanding glow left behind by a phosphorylation
#[derive(Component)]
pub struct PhosphorylationFlash {
    pub elapsed: f32,
    pub duration: f32,
}

impl PhosphorylationFlash {
    const DURATION: f32 = 1.5;

    /// Fraction of the flash that has played, in `[0, 1]`
    pub fn fraction(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

fn setup_docking(
    mut commands: Commands,
    mut docking: ResMut<DockingControllerResource>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    game_config: Res<GameConfig>,
) {
    **docking = DockingController::new(game_config.settings.docking_config());

    commands.insert_resource(DockingAssets {
        marker_mesh: meshes.add(Sphere::new(0.2)),
        landing_mesh: meshes.add(Sphere::new(0.3)),
        flash_mesh: meshes.add(Sphere::new(3.0)),
        available: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 1.0, 0.0),
            emissive: LinearRgba::rgb(0.6, 0.6, 0.0),
            ..default()
        }),
        used: materials.add(StandardMaterial {
            base_color: Color::srgb(0.4, 0.4, 0.4),
            ..default()
        }),
        landing: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.2, 0.2),
            emissive: LinearRgba::rgb(0.2, 0.0, 0.0),
            ..default()
        }),
        trail: materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.2, 0.2, 0.8),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        }),
    });
}

/// Register microtubules with the controller in obstacle order and decorate
/// them with their attachment points
fn register_new_microtubules(
    mut commands: Commands,
    mut docking: ResMut<DockingControllerResource>,
    assets: Res<DockingAssets>,
    new_boundaries: Query<(Entity, &MicrotubuleBoundary), Added<MicrotubuleBoundary>>,
) {
    let mut added: Vec<(Entity, &MicrotubuleBoundary)> = new_boundaries.iter().collect();
    if added.is_empty() {
        return;
    }
    added.sort_by_key(|(_, boundary)| boundary.id);

    for (entity, boundary) in added {
        let id = docking.register_obstacle(&boundary.shape);
        if id != boundary.id {
            warn!("{} registered for docking as {}", boundary.id, id);
        }

        let markers: Vec<_> = docking
            .points_of(id)
            .map(|point| (point.id, point.local_position))
            .collect();

        commands.entity(entity).with_children(|parent| {
            for (point, local_position) in markers {
                parent.spawn((
                    Mesh3d(assets.marker_mesh.clone()),
                    MeshMaterial3d(assets.available.clone()),
                    Transform::from_translation(local_position),
                    AttachmentMarker { point },
                ));
            }
        });
    }

    info!(
        "Docking tracks {} microtubules with {} attachment points",
        docking.obstacle_count(),
        docking.attachment_points().len()
    );
}

fn run_docking(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut docking: ResMut<DockingControllerResource>,
    mut events: EventWriter<DockingEvent>,
    microtubules: Query<(&GlobalTransform, &MicrotubuleBoundary)>,
    player_query: Query<(&Transform, &Player)>,
) {
    let tubes = ordered_microtubules(microtubules.iter());
    let player = player_query
        .single()
        .ok()
        .map(|(transform, player)| PlayerBody::new(transform.translation, player.bounding_radius));

    let interact = keyboard.just_pressed(KeyCode::KeyE);
    for event in docking.update(time.delta_secs(), player.as_ref(), &tubes, interact) {
        events.write(event);
    }
}

fn apply_docking_events(
    mut commands: Commands,
    mut events: EventReader<DockingEvent>,
    mut game_config: ResMut<GameConfig>,
    config_path: Option<Res<GameConfigPath>>,
    docking: Res<DockingControllerResource>,
    assets: Res<DockingAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut player_query: Query<(&mut Transform, &Player)>,
    mut markers: Query<(&AttachmentMarker, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    for event in events.read() {
        match *event {
            DockingEvent::DockStarted {
                point,
                world_position,
                world_normal,
                ..
            } => {
                if let Ok((mut transform, player)) = player_query.single_mut() {
                    transform.translation = world_position;
                    transform.rotation = docked_rotation(world_normal, player.yaw);
                }

                for (marker, mut material) in markers.iter_mut() {
                    if marker.point == point {
                        material.0 = assets.used.clone();
                    }
                }

                spawn_landing_marker(&mut commands, &mut meshes, &assets, docking.landing_sites());
            }
            DockingEvent::DockCompleted {
                obstacle,
                phosphorylated,
                ..
            } => {
                if !phosphorylated {
                    continue;
                }

                game_config.phosphorylations += 1;
                info!(
                    "{} phosphorylated ({} total)",
                    obstacle, game_config.phosphorylations
                );

                if let Some(path) = &config_path {
                    if let Err(err) = save_config_to(&game_config, &path.0) {
                        warn!("Failed to save phosphorylation count: {err}");
                    }
                }

                if let Ok((transform, _)) = player_query.single() {
                    commands.spawn((
                        Mesh3d(assets.flash_mesh.clone()),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: Color::srgba(0.0, 1.0, 1.0, 0.8),
                            alpha_mode: AlphaMode::Blend,
                            unlit: true,
                            ..default()
                        })),
                        Transform::from_translation(transform.translation),
                        PhosphorylationFlash {
                            elapsed: 0.0,
                            duration: PhosphorylationFlash::DURATION,
                        },
                    ));
                }
            }
            DockingEvent::Undocked { point } => {
                debug!("Player released from {point}");
                if let Ok((mut transform, player)) = player_query.single_mut() {
                    transform.rotation = Quat::from_rotation_y(player.yaw);
                }
            }
        }
    }
}

fn spawn_landing_marker(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    assets: &DockingAssets,
    sites: &[Vec3],
) {
    let Some(&latest) = sites.last() else {
        return;
    };

    commands.spawn((
        Mesh3d(assets.landing_mesh.clone()),
        MeshMaterial3d(assets.landing.clone()),
        Transform::from_translation(latest),
        LandingMarker,
    ));

    // Join consecutive landings into a trail
    let Some(&previous) = sites.iter().rev().nth(1) else {
        return;
    };
    if let Some((transform, length)) = segment_between(previous, latest) {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.08, 0.08, length))),
            MeshMaterial3d(assets.trail.clone()),
            transform,
            LandingTrail,
        ));
    }
}

/// Player orientation while docked: standing on the surface with its up
/// axis along the attachment normal, keeping its heading around that axis
pub fn docked_rotation(normal: Vec3, yaw: f32) -> Quat {
    let up = normal.normalize_or(Vec3::Y);
    Quat::from_rotation_arc(Vec3::Y, up) * Quat::from_rotation_y(yaw)
}

/// Transform placing a Z-aligned segment of the returned length between two points
pub fn segment_between(from: Vec3, to: Vec3) -> Option<(Transform, f32)> {
    let offset = to - from;
    let length = offset.length();
    if length <= f32::EPSILON {
        return None;
    }
    let transform = Transform::from_translation(from + offset * 0.5)
        .with_rotation(Quat::from_rotation_arc(Vec3::Z, offset / length));
    Some((transform, length))
}

fn animate_flashes(
    mut commands: Commands,
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut flashes: Query<(
        Entity,
        &mut PhosphorylationFlash,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    for (entity, mut flash, mut transform, material) in flashes.iter_mut() {
        flash.elapsed += time.delta_secs();
        let fraction = flash.fraction();

        if fraction >= 1.0 {
            commands.entity(entity).despawn();
            continue;
        }

        transform.scale = Vec3::splat(1.0 + fraction);
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(0.8 * (1.0 - fraction));
        }
    }
}
