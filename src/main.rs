use bevy::prelude::*;
use camkii::config::{get_config_path, load_config_from, load_config_or_default};
use camkii::plugins::*;
use camkii::resources::{GameConfig, GameConfigPath};
use camkii::{CamkiiError, CamkiiResult};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "camkii")]
#[command(about = "Steer a CaMKII kinase through the cell and phosphorylate microtubules")]
struct Args {
    /// Config file to use instead of the platform config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cell layout file (relative to the cells directory)
    #[arg(long)]
    layout: Option<String>,
}

fn main() -> CamkiiResult<()> {
    let args = Args::parse();

    let (mut game_config, config_path) = match args.config {
        Some(path) => {
            let config = match load_config_from(&path) {
                Ok(config) => config,
                Err(CamkiiError::ConfigFileNotFound { .. }) => GameConfig::default(),
                Err(err) => return Err(err),
            };
            (config, Some(path))
        }
        None => (load_config_or_default(), get_config_path().ok()),
    };

    if let Some(layout) = args.layout {
        game_config.settings.layout_file_path = Some(layout);
    }

    let resolution = (
        game_config.settings.window_width,
        game_config.settings.window_height,
    );

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "CaMKII - Cell Explorer".into(),
            resolution: resolution.into(),
            ..default()
        }),
        ..default()
    }))
    .insert_resource(game_config)
    .add_plugins((
        EnvironmentPlugin,
        PlayerPlugin,
        DockingPlugin,
        UiPlugin,
        DebugOverlayPlugin,
    ));

    if let Some(path) = config_path {
        app.insert_resource(GameConfigPath(path));
    }

    app.run();
    Ok(())
}
