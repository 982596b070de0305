use bevy::prelude::App;
use bevy_egui::EguiPlugin;

use crate::app::plugins::{build_bevy_plugins, create_winit_settings};
use crate::character::CharacterPlugin;
use crate::input::ViewerInputPlugin;
use crate::settings::{self, SettingsResource, ViewerSettings};
use crate::ui::HudPlugin;
use crate::world::WorldPlugin;

pub fn run_viewer_app() {
    let startup_settings = load_startup_settings();
    let mut app = App::new();
    configure_viewer_app(&mut app, &startup_settings);
    app.run();
}

pub fn configure_viewer_app(app: &mut App, startup_settings: &ViewerSettings) {
    app.insert_resource(SettingsResource::new(startup_settings.clone()))
        .add_plugins(build_bevy_plugins(startup_settings))
        .insert_resource(create_winit_settings(startup_settings))
        .add_plugins(EguiPlugin::default())
        .add_plugins(WorldPlugin)
        .add_plugins(CharacterPlugin)
        .add_plugins(ViewerInputPlugin)
        .add_plugins(HudPlugin);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_startup_settings() -> ViewerSettings {
    let startup_settings = settings::load_settings_or_default();
    if let Err(error) = settings::ensure_settings_file_exists(&startup_settings) {
        eprintln!(
            "Failed to ensure startup settings file '{}': {}",
            settings::SETTINGS_FILE_PATH,
            error
        );
    }
    startup_settings
}

#[cfg(target_arch = "wasm32")]
fn load_startup_settings() -> ViewerSettings {
    ViewerSettings::default()
}
