use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use motion::{MotionState, ModelProfile};
use viewer::app::pipeline::ViewerPipelineSet;
use viewer::character::{ModelSource, RobotMotion, RobotMotionPlugin, RobotRoot};
use viewer::input::{HeldMovement, ViewerAction, read_motion_keys};

fn motion_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
        .init_resource::<ButtonInput<KeyCode>>()
        .add_plugins(RobotMotionPlugin)
        .add_systems(Update, read_motion_keys.in_set(ViewerPipelineSet::Input));

    app.world_mut().spawn((
        RobotRoot {
            source: ModelSource::Fallback,
        },
        Transform::default(),
    ));
    app.world_mut()
        .resource_mut::<RobotMotion>()
        .controller
        .attach_model(ModelProfile::procedural(true));
    // First update initialises time.
    app.update();
    app
}

fn tap(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(key);
    keys.clear();
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn robot_translation(app: &mut App) -> Vec3 {
    let mut roots = app
        .world_mut()
        .query_filtered::<&Transform, With<RobotRoot>>();
    roots.single(app.world()).map(|t| t.translation).unwrap_or(Vec3::NAN)
}

#[test]
fn arrow_press_moves_target_forward() {
    let mut app = motion_app();
    tap(&mut app, KeyCode::ArrowUp);

    let motion = app.world().resource::<RobotMotion>();
    let tuning = motion.controller.tuning();
    // One discrete step plus the held frame in which the key went down.
    let expected = -(tuning.step + tuning.step * tuning.hold_factor);
    let target = motion.controller.target();
    assert!((target.z - expected).abs() < 1e-4, "target z = {}", target.z);
    assert_eq!(target.x, 0.0);
    assert!(motion.controller.is_moving());
}

#[test]
fn robot_transform_follows_smoothed_pose() {
    let mut app = motion_app();
    for _ in 0..5 {
        tap(&mut app, KeyCode::KeyD);
    }
    run_frames(&mut app, 240);

    let target = app.world().resource::<RobotMotion>().controller.target();
    let translation = robot_translation(&mut app);
    assert!((translation.x - target.x).abs() < 0.01);
    assert!(translation.x > 0.0);
    assert_eq!(
        app.world().resource::<RobotMotion>().controller.state(),
        MotionState::Idle
    );
}

#[test]
fn held_key_moves_continuously_until_released() {
    let mut app = motion_app();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::ArrowLeft);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
    run_frames(&mut app, 10);

    let after_hold = app.world().resource::<RobotMotion>().controller.target().x;
    assert!(app.world().resource::<HeldMovement>().iter().count() == 1);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(KeyCode::ArrowLeft);
    run_frames(&mut app, 10);
    let after_release = app.world().resource::<RobotMotion>().controller.target().x;

    let tuning = app.world().resource::<RobotMotion>().controller.tuning().clone();
    let expected = -(tuning.step + 11.0 * tuning.step * tuning.hold_factor);
    assert!((after_hold - expected).abs() < 1e-3, "x = {after_hold}");
    assert_eq!(after_hold, after_release);
}

#[test]
fn space_jump_lands_back_on_ground() {
    let mut app = motion_app();
    tap(&mut app, KeyCode::Space);
    assert!(app.world().resource::<RobotMotion>().controller.is_jumping());

    run_frames(&mut app, 20);
    assert!(robot_translation(&mut app).y > 0.5);

    run_frames(&mut app, 100);
    let motion = app.world().resource::<RobotMotion>();
    assert!(!motion.controller.is_jumping());
    assert!(motion.controller.pose().position.y.abs() < 0.05);
}

#[test]
fn hud_actions_reach_the_controller() {
    let mut app = motion_app();
    app.world_mut()
        .write_message(ViewerAction(motion::Action::Dance));
    app.update();
    assert!(app.world().resource::<RobotMotion>().controller.is_dancing());

    app.world_mut()
        .write_message(ViewerAction(motion::Action::Reset));
    app.update();
    let motion = app.world().resource::<RobotMotion>();
    assert!(!motion.controller.is_dancing());
    assert!(motion.controller.is_resetting());
}
