use crate::components::*;
use crate::game_logic::docking::DockingController;
use crate::game_logic::obstacles::{CylinderBoundary, Microtubule};
use crate::plugins::CellSystems;
use crate::resources::DockingControllerResource;
use bevy::prelude::*;
use std::f32::consts::TAU;

/// Developer view of the collision and docking geometry, toggled with T
pub struct DebugOverlayPlugin;

impl Plugin for DebugOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugOverlay>()
            .add_systems(Update, toggle_debug_overlay)
            .add_systems(
                Update,
                draw_debug_overlay
                    .run_if(overlay_enabled)
                    .in_set(CellSystems::Presentation),
            );
    }
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DebugOverlay {
    pub enabled: bool,
}

impl DebugOverlay {
    pub const TOGGLE_KEY: KeyCode = KeyCode::KeyT;

    /// Flip the overlay and return the new state
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

/// Attachment sites closer than this are highlighted
pub const SITE_HIGHLIGHT_RANGE: f32 = 5.0;

const RING_SEGMENTS: usize = 16;

const BOUNDARY_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
const PLAYER_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);
const SITE_COLOR: Color = Color::srgb(0.0, 1.0, 1.0);
const TARGET_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
const ANCHOR_COLOR: Color = Color::srgb(1.0, 0.0, 1.0);

fn overlay_enabled(overlay: Res<DebugOverlay>) -> bool {
    overlay.enabled
}

pub fn toggle_debug_overlay(keyboard: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<DebugOverlay>) {
    if keyboard.just_pressed(DebugOverlay::TOGGLE_KEY) {
        let enabled = overlay.toggle();
        info!("Developer overlay {}", if enabled { "enabled" } else { "disabled" });
    }
}

/// Line segments outlining a capped cylinder: both end rings, lengthwise
/// edges and the axis itself
pub fn cylinder_outline<O: CylinderBoundary + ?Sized>(obstacle: &O, segments: usize) -> Vec<(Vec3, Vec3)> {
    let segments = segments.max(3);
    let axis = obstacle.axis();
    let (u, v) = axis.direction.any_orthonormal_pair();
    let top = axis.point_at(axis.half_length);
    let bottom = axis.point_at(-axis.half_length);

    let rim: Vec<Vec3> = (0..segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            (u * angle.cos() + v * angle.sin()) * obstacle.radius()
        })
        .collect();

    let mut lines = Vec::with_capacity(segments * 2 + 4 + 1);
    for (i, offset) in rim.iter().enumerate() {
        let next = rim[(i + 1) % segments];
        lines.push((top + *offset, top + next));
        lines.push((bottom + *offset, bottom + next));
    }
    for offset in rim.iter().step_by((segments / 4).max(1)) {
        lines.push((bottom + *offset, top + *offset));
    }
    lines.push((bottom, top));
    lines
}

/// World positions of unused attachment sites within `range` of `position`
pub fn sites_near(
    docking: &DockingController,
    position: Vec3,
    obstacles: &[Microtubule],
    range: f32,
) -> Vec<Vec3> {
    docking
        .attachment_points()
        .iter()
        .filter(|point| !point.used)
        .filter_map(|point| {
            let owner = obstacles.get(point.owner.0)?;
            let world = point.world_position(owner);
            (world.distance(position) < range).then_some(world)
        })
        .collect()
}

fn draw_debug_overlay(
    mut gizmos: Gizmos,
    docking: Res<DockingControllerResource>,
    microtubules: Query<(&GlobalTransform, &MicrotubuleBoundary)>,
    player_query: Query<(&Transform, &Player)>,
) {
    gizmos.axes(Transform::IDENTITY, 10.0);

    let tubes = ordered_microtubules(microtubules.iter());
    for tube in &tubes {
        for (start, end) in cylinder_outline(tube, RING_SEGMENTS) {
            gizmos.line(start, end, BOUNDARY_COLOR);
        }
    }

    if let Some(session) = docking.session() {
        gizmos.sphere(Isometry3d::from_translation(session.anchor), 0.4, ANCHOR_COLOR);
    }

    let Ok((transform, player)) = player_query.single() else {
        return;
    };
    let position = transform.translation;

    gizmos.sphere(Isometry3d::from_translation(position), player.bounding_radius, PLAYER_COLOR);

    for site in sites_near(&docking, position, &tubes, SITE_HIGHLIGHT_RANGE) {
        gizmos.sphere(Isometry3d::from_translation(site), 0.35, SITE_COLOR);
    }

    if let Some(target) = docking.affordance() {
        gizmos.line(position, target.world_position, TARGET_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::obstacles::Pose;

    #[test]
    fn test_toggle_flips_state() {
        let mut overlay = DebugOverlay::default();
        assert!(!overlay.enabled);
        assert!(overlay.toggle());
        assert!(!overlay.toggle());
    }

    #[test]
    fn test_toggle_key_switches_overlay_once_per_press() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<DebugOverlay>()
            .add_systems(Update, toggle_debug_overlay);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(DebugOverlay::TOGGLE_KEY);
        app.update();
        assert!(app.world().resource::<DebugOverlay>().enabled);

        // Still held: no new edge
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
        app.update();
        assert!(app.world().resource::<DebugOverlay>().enabled);

        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release(DebugOverlay::TOGGLE_KEY);
        keyboard.clear();
        keyboard.press(DebugOverlay::TOGGLE_KEY);
        app.update();
        assert!(!app.world().resource::<DebugOverlay>().enabled);
    }

    #[test]
    fn test_cylinder_outline_follows_rotated_tube() {
        let tube = Microtubule::standard(Pose::new(
            Vec3::new(2.0, 1.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        ));
        let lines = cylinder_outline(&tube, 8);

        // Two rings, four edges, one axis
        assert_eq!(lines.len(), 8 * 2 + 4 + 1);

        let axis = tube.axis();
        for (start, end) in &lines[..16] {
            for point in [start, end] {
                let radial = axis.radial_offset(*point).length();
                assert!((radial - 0.5).abs() < 1e-4);
                assert!((axis.axial_distance(*point).abs() - 5.0).abs() < 1e-4);
            }
        }

        let (bottom, top) = lines[lines.len() - 1];
        assert!((bottom - Vec3::new(-3.0, 1.0, 0.0)).length() < 1e-4);
        assert!((top - Vec3::new(7.0, 1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_sites_near_skips_used_and_distant_points() {
        let tubes = vec![
            Microtubule::standard(Pose::IDENTITY),
            Microtubule::standard(Pose::from_translation(Vec3::new(30.0, 0.0, 0.0))),
        ];
        let mut docking = DockingController::default();
        for tube in &tubes {
            docking.register_obstacle(tube);
        }

        // Points on the first tube sit at z = -5, -2.5, 0, 2.5, 5
        let position = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(sites_near(&docking, position, &tubes, SITE_HIGHLIGHT_RANGE).len(), 3);

        let player = crate::game_logic::PlayerBody::new(position, 1.2);
        docking.update(0.125, Some(&player), &tubes, true);
        assert!(docking.is_docked());

        let remaining = sites_near(&docking, position, &tubes, SITE_HIGHLIGHT_RANGE);
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|site| site.z.abs() > 1.0));
    }
}
