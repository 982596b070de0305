pub mod animation;
pub mod effects;
pub mod factory;
pub mod loader;
pub mod motion;
pub mod parts;
pub mod types;

pub use animation::{
    ClipFadeOut, RobotAnimationBound, RobotAnimations, advance_clip_fade_outs,
    apply_clip_commands, bind_robot_animation_players,
};
pub use effects::{EYE_FLASH_EMISSIVE, EyeFlashState, apply_eye_effects};
pub use factory::RobotFactory;
pub use loader::{
    LoadStage, ModelPipeline, await_robot_scene, pick_scene, poll_robot_model,
    request_robot_model, spawn_fallback_robot,
};
pub use self::motion::{
    MotionCommandMessage, RobotMotion, dispatch_viewer_actions, sync_motion_clock,
    tick_robot_motion, write_robot_transform,
};
pub use parts::{PartTable, collect_named_descendants};
pub use types::{ModelSource, RobotPart, RobotRoot, RobotSceneHost};

use crate::app::pipeline::{ViewerPipelineSet, configure_viewer_pipeline};
use crate::input::{HeldMovement, ViewerAction};
use crate::settings::SettingsResource;
use crate::ui::{LoadingOverlay, StatusFeed};
use bevy::prelude::*;

/// Motion controller driven by viewer actions and held movement.
///
/// Needs no renderer; the model pipeline lives in [`CharacterPlugin`].
pub struct RobotMotionPlugin;

impl Plugin for RobotMotionPlugin {
    fn build(&self, app: &mut App) {
        configure_viewer_pipeline(app);

        let motion = app
            .world()
            .get_resource::<SettingsResource>()
            .map(|settings| RobotMotion::new(settings.current.motion.clone()))
            .unwrap_or_default();

        app.insert_resource(motion)
            .init_resource::<HeldMovement>()
            .init_resource::<StatusFeed>()
            .init_resource::<LoadingOverlay>()
            .add_message::<ViewerAction>()
            .add_message::<MotionCommandMessage>()
            .add_systems(
                Update,
                (sync_motion_clock, dispatch_viewer_actions, tick_robot_motion)
                    .chain()
                    .in_set(ViewerPipelineSet::Motion),
            )
            .add_systems(
                Update,
                write_robot_transform.in_set(ViewerPipelineSet::Present),
            );
    }
}

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        let model_path = app
            .world()
            .get_resource::<SettingsResource>()
            .map(|settings| settings.current.model.path.clone())
            .unwrap_or_else(|| crate::settings::ModelSettings::default().path);

        app.add_plugins(RobotMotionPlugin)
            .insert_resource(ModelPipeline::new(model_path))
            .init_resource::<PartTable>()
            .init_resource::<RobotAnimations>()
            .init_resource::<EyeFlashState>()
            .add_systems(Startup, request_robot_model)
            .add_systems(
                Update,
                (poll_robot_model, await_robot_scene, spawn_fallback_robot)
                    .chain()
                    .in_set(ViewerPipelineSet::AssetLoad),
            )
            .add_systems(
                Update,
                (
                    bind_robot_animation_players,
                    apply_clip_commands,
                    advance_clip_fade_outs,
                    apply_eye_effects,
                )
                    .chain()
                    .after(write_robot_transform)
                    .in_set(ViewerPipelineSet::Present),
            );
    }
}
