use crate::game_logic::DockingController;
use crate::plugins::CellSystems;
use crate::resources::*;
use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_game_ui)
            .add_systems(Update, handle_exit_events)
            .add_systems(Update, update_hud.in_set(CellSystems::Presentation));
    }
}

#[derive(Component)]
pub struct GameUI;

#[derive(Component)]
pub struct DockingCueText;

#[derive(Component)]
pub struct DockingProgressBar;

#[derive(Component)]
pub struct DockingProgressFill;

#[derive(Component)]
pub struct PhosphorylationCounter;

/// What the HUD should say about docking this frame
#[derive(Debug, Clone, PartialEq)]
pub enum DockingHudState {
    Hidden,
    Available { attraction: f32 },
    Docking { progress: f32 },
}

impl DockingHudState {
    pub fn from_controller(docking: &DockingController) -> Self {
        if let Some(progress) = docking.progress() {
            return DockingHudState::Docking { progress };
        }
        match docking.affordance() {
            Some(proximity) => DockingHudState::Available {
                attraction: proximity.attraction,
            },
            None => DockingHudState::Hidden,
        }
    }

    pub fn cue_text(&self) -> String {
        match self {
            DockingHudState::Hidden => String::new(),
            DockingHudState::Available { attraction } => {
                format!("Press E to dock ({:.0}% attraction)", attraction * 100.0)
            }
            DockingHudState::Docking { progress } => {
                format!("Phosphorylating... {:.0}%", progress * 100.0)
            }
        }
    }
}

fn setup_game_ui(mut commands: Commands, game_config: Res<GameConfig>) {
    let font_size = game_config.settings.hud_font_size;

    // HUD container
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            GameUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(format!("Phosphorylations: {}", game_config.phosphorylations)),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 1.0, 1.0)),
                Node {
                    align_self: AlignSelf::FlexStart,
                    ..default()
                },
                PhosphorylationCounter,
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(6.0),
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                })
                .with_children(|center| {
                    center.spawn((
                        Text::new(""),
                        TextFont {
                            font_size,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 1.0, 0.4)),
                        DockingCueText,
                    ));

                    center
                        .spawn((
                            Node {
                                width: Val::Px(240.0),
                                height: Val::Px(14.0),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(0.2, 0.2, 0.2)),
                            Visibility::Hidden,
                            DockingProgressBar,
                        ))
                        .with_children(|bar| {
                            bar.spawn((
                                Node {
                                    width: Val::Percent(0.0), // Will be updated dynamically
                                    height: Val::Percent(100.0),
                                    ..default()
                                },
                                BackgroundColor(Color::srgb(0.0, 0.8, 1.0)),
                                DockingProgressFill,
                            ));
                        });
                });

            // Controls text at bottom
            parent.spawn((
                Text::new(
                    "Controls: WASD=Move, Space/Shift=Up/Down, Ctrl=Boost, Arrows=Camera, E=Dock, T=Debug, Esc=Quit",
                ),
                TextFont {
                    font_size: font_size * 0.85,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(10.0),
                    bottom: Val::Px(10.0),
                    ..default()
                },
            ));
        });
}

fn update_hud(
    docking: Res<DockingControllerResource>,
    game_config: Res<GameConfig>,
    mut cue_query: Query<&mut Text, (With<DockingCueText>, Without<PhosphorylationCounter>)>,
    mut counter_query: Query<&mut Text, (With<PhosphorylationCounter>, Without<DockingCueText>)>,
    mut bar_query: Query<&mut Visibility, With<DockingProgressBar>>,
    mut fill_query: Query<&mut Node, With<DockingProgressFill>>,
) {
    let state = DockingHudState::from_controller(&docking);

    for mut text in cue_query.iter_mut() {
        let cue = state.cue_text();
        if text.0 != cue {
            text.0 = cue;
        }
    }

    let progress = match state {
        DockingHudState::Docking { progress } => Some(progress),
        _ => None,
    };
    for mut visibility in bar_query.iter_mut() {
        *visibility = if progress.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    for mut node in fill_query.iter_mut() {
        node.width = Val::Percent(progress.unwrap_or_default() * 100.0);
    }

    if game_config.is_changed() {
        for mut text in counter_query.iter_mut() {
            text.0 = format!("Phosphorylations: {}", game_config.phosphorylations);
        }
    }
}

pub fn handle_exit_events(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::{Microtubule, PlayerBody, Pose};

    #[test]
    fn test_hud_state_follows_controller() {
        let tubes = [Microtubule::standard(Pose::IDENTITY)];
        let mut docking = DockingController::default();
        docking.register_obstacle(&tubes[0]);
        assert_eq!(DockingHudState::from_controller(&docking), DockingHudState::Hidden);

        let player = PlayerBody::new(Vec3::new(0.0, 2.0, 0.0), 1.2);
        docking.update(0.125, Some(&player), &tubes, false);
        let state = DockingHudState::from_controller(&docking);
        assert!(matches!(state, DockingHudState::Available { .. }));
        assert!(state.cue_text().starts_with("Press E to dock"));

        docking.update(0.125, Some(&player), &tubes, true);
        assert_eq!(
            DockingHudState::from_controller(&docking),
            DockingHudState::Docking { progress: 0.0 }
        );
    }

    #[test]
    fn test_cue_text() {
        assert_eq!(DockingHudState::Hidden.cue_text(), "");
        assert_eq!(
            DockingHudState::Docking { progress: 0.5 }.cue_text(),
            "Phosphorylating... 50%"
        );
    }
}
