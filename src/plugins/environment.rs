use crate::cell::{CellLayout, MicrotubulePlacement};
use crate::components::*;
use crate::game_logic::docking::ObstacleId;
use crate::game_logic::errors::{CamkiiError, CamkiiResult};
use crate::game_logic::obstacles::CylinderBoundary;
use crate::resources::GameConfig;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

pub struct EnvironmentPlugin;

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_cell);
    }
}

pub fn setup_cell(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    game_config: Res<GameConfig>,
) {
    let layout = load_layout_from_config(&game_config).unwrap_or_else(|err| {
        warn!("Failed to load cell layout: {err}");
        warn!("Falling back to the built-in cytoplasm layout");
        CellLayout::default()
    });

    info!(
        "Building cell '{}' with {} microtubules",
        layout.name,
        layout.microtubules.len()
    );

    spawn_scenery(&mut commands, &mut meshes, &mut materials, &layout);

    let tube_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.8, 0.2),
        perceptual_roughness: 0.6,
        ..default()
    });

    let mut spawned = 0;
    for placement in &layout.microtubules {
        match spawn_microtubule(
            &mut commands,
            &mut meshes,
            tube_material.clone(),
            placement,
            ObstacleId(spawned),
        ) {
            Ok(()) => spawned += 1,
            Err(err) => warn!("Skipping microtubule at {}: {err}", placement.position),
        }
    }

    // Placed by follow_camera every frame after this
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(layout.player_spawn + Vec3::new(0.0, 5.0, 10.0))
            .looking_at(layout.player_spawn, Vec3::Y),
        CameraFollow,
    ));

    commands.insert_resource(layout);
}

fn load_layout_from_config(game_config: &GameConfig) -> CamkiiResult<CellLayout> {
    let Some(layout_file) = &game_config.settings.layout_file_path else {
        return Ok(CellLayout::default());
    };
    info!("Attempting to load cell layout from: {layout_file}");

    let result = CellLayout::load_from_file(layout_file);
    if let Err(err) = &result {
        match err {
            CamkiiError::LayoutFileNotFound { path } => {
                warn!(
                    "Cell layout not found: {}. Generate one with: cargo run --bin cellgen",
                    path.display()
                );
            }
            CamkiiError::CorruptedLayoutFile { reason } => {
                warn!("Cell layout is corrupted ({reason}). Try regenerating it.");
            }
            _ => debug!("Cell layout loading failed with error: {err}"),
        }
    }
    result
}

fn spawn_scenery(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    layout: &CellLayout,
) {
    // Membrane, seen from inside
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(layout.membrane_radius).mesh().uv(32, 16))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.87, 0.87, 0.3),
            alpha_mode: AlphaMode::Blend,
            cull_mode: None,
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
    ));

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(layout.nucleus.radius).mesh().uv(32, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.42, 0.35, 0.8, 0.7),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_translation(layout.nucleus.center),
    ));

    let floor_size = layout.membrane_radius * 2.0;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(floor_size, floor_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.67, 1.0, 0.67, 0.5),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_xyz(0.0, layout.floor_height, 0.0),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
        SceneLight,
    ));

    // Ambient light (resource - only set once)
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.8, 0.8, 0.8),
        brightness: 400.0,
        affects_lightmapped_meshes: false,
    });
}

fn spawn_microtubule(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    placement: &MicrotubulePlacement,
    id: ObstacleId,
) -> CamkiiResult<()> {
    let shape = placement.to_microtubule()?;

    // Bevy cylinders stand along Y; the boundary's axis is local Z
    let mesh = meshes.add(Cylinder::new(shape.radius(), shape.length()));

    commands
        .spawn((
            placement.transform(),
            Visibility::default(),
            MicrotubuleBoundary::new(id, shape),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            ));
        });

    Ok(())
}
