use bevy::app::PluginGroupBuilder;
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use bevy::render::pipelined_rendering::PipelinedRenderingPlugin;
use bevy::window::WindowResolution;
use bevy::winit::WinitSettings;

use crate::settings::{self, ViewerSettings};

pub fn build_bevy_plugins(startup_settings: &ViewerSettings) -> PluginGroupBuilder {
    let plugins = DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(create_window_settings(startup_settings)),
            ..Default::default()
        })
        .set(AssetPlugin {
            file_path: startup_settings.model.asset_root.clone(),
            ..Default::default()
        });

    #[cfg(not(target_arch = "wasm32"))]
    let plugins = plugins.disable::<PipelinedRenderingPlugin>();

    plugins
}

pub fn create_winit_settings(startup_settings: &ViewerSettings) -> WinitSettings {
    let focused_mode = startup_settings.window.fps_limit.to_update_mode();
    WinitSettings {
        focused_mode,
        unfocused_mode: focused_mode,
    }
}

fn create_window_settings(startup_settings: &ViewerSettings) -> Window {
    let window = &startup_settings.window;
    Window {
        title: window.title.clone(),
        resolution: WindowResolution::new(window.resolution.width, window.resolution.height),
        resizable: true,
        present_mode: settings::present_mode_for(window),
        fit_canvas_to_parent: window.fit_canvas_to_parent,
        // Keeps Space and the arrow keys from scrolling the page.
        prevent_default_event_handling: true,
        ..Default::default()
    }
}
