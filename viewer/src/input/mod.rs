use crate::app::pipeline::{ViewerPipelineSet, configure_viewer_pipeline};
use crate::settings::SettingsResource;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::WindowResized;
use bevy_egui::input::EguiWantsInput;
use motion::{Action, Direction, HeldDirections, OrbitCamera, OrbitTuning};

/// Pixel-unit wheel deltas are scaled down to roughly one line per notch.
const PIXEL_SCROLL_SCALE: f32 = 0.02;

const KEY_BINDINGS: &[(KeyCode, Action)] = &[
    (KeyCode::ArrowUp, Action::Forward),
    (KeyCode::KeyW, Action::Forward),
    (KeyCode::ArrowDown, Action::Back),
    (KeyCode::KeyS, Action::Back),
    (KeyCode::ArrowLeft, Action::Left),
    (KeyCode::KeyA, Action::Left),
    (KeyCode::ArrowRight, Action::Right),
    (KeyCode::KeyD, Action::Right),
    (KeyCode::Space, Action::Jump),
    (KeyCode::KeyE, Action::Dance),
    (KeyCode::KeyR, Action::Reset),
];

/// A discrete viewer command from the keyboard or a HUD button.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerAction(pub Action);

/// Directions whose keys are currently held.
#[derive(Resource, Debug, Default, Clone, Copy, Deref, DerefMut)]
pub struct HeldMovement(pub HeldDirections);

#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct OrbitRig(pub OrbitCamera);

impl Default for OrbitRig {
    fn default() -> Self {
        Self(OrbitCamera::new(OrbitTuning::default()))
    }
}

pub fn action_for_key(key: KeyCode) -> Option<Action> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, action)| *action)
}

pub fn keys_for_direction(direction: Direction) -> impl Iterator<Item = KeyCode> {
    KEY_BINDINGS
        .iter()
        .filter(move |(_, action)| action.direction() == Some(direction))
        .map(|(key, _)| *key)
}

fn scroll_lines(unit: MouseScrollUnit, y: f32) -> f32 {
    let unit_scale = match unit {
        MouseScrollUnit::Line => 1.0,
        MouseScrollUnit::Pixel => PIXEL_SCROLL_SCALE,
    };
    y * unit_scale
}

pub fn read_motion_keys(
    keys: Res<ButtonInput<KeyCode>>,
    egui_wants_input: Option<Res<EguiWantsInput>>,
    mut held: ResMut<HeldMovement>,
    mut action_writer: MessageWriter<ViewerAction>,
) {
    if egui_wants_input.is_some_and(|wants| wants.wants_any_keyboard_input()) {
        held.0 = HeldDirections::default();
        return;
    }

    for key in keys.get_just_pressed() {
        if let Some(action) = action_for_key(*key) {
            action_writer.write(ViewerAction(action));
        }
    }

    for direction in Direction::ALL {
        let pressed = keys_for_direction(direction).any(|key| keys.pressed(key));
        held.set(direction, pressed);
    }
}

pub fn orbit_camera_from_pointer(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    egui_wants_input: Option<Res<EguiWantsInput>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut rig: ResMut<OrbitRig>,
) {
    if egui_wants_input.is_some_and(|wants| wants.wants_any_pointer_input()) {
        // Drain so a drag over the HUD is not applied later.
        for _ in mouse_motion.read() {}
        for _ in mouse_wheel.read() {}
        return;
    }

    let mut drag = Vec2::ZERO;
    for motion in mouse_motion.read() {
        drag += motion.delta;
    }
    if mouse_buttons.pressed(MouseButton::Left) && drag != Vec2::ZERO {
        rig.drag(drag.x, drag.y);
    }

    let lines: f32 = mouse_wheel
        .read()
        .map(|wheel| scroll_lines(wheel.unit, wheel.y))
        .sum();
    if lines.abs() > f32::EPSILON {
        rig.zoom(lines);
    }
}

pub fn apply_orbit_camera(rig: Res<OrbitRig>, mut cameras: Query<&mut Transform, With<Camera3d>>) {
    if !rig.is_changed() {
        return;
    }
    let eye = rig.eye();
    let target = rig.target;
    for mut transform in &mut cameras {
        *transform = Transform::from_xyz(eye.x, eye.y, eye.z)
            .looking_at(Vec3::new(target.x, target.y, target.z), Vec3::Y);
    }
}

fn log_viewport_resize(mut resized: MessageReader<WindowResized>) {
    if let Some(last) = resized.read().last() {
        debug!("Viewport resized to {}x{}", last.width, last.height);
    }
}

pub struct ViewerInputPlugin;

impl Plugin for ViewerInputPlugin {
    fn build(&self, app: &mut App) {
        configure_viewer_pipeline(app);

        let rig = app
            .world()
            .get_resource::<SettingsResource>()
            .map(|settings| OrbitRig(OrbitCamera::new(settings.current.camera.clone())))
            .unwrap_or_default();

        app.insert_resource(rig)
            .init_resource::<HeldMovement>()
            .add_message::<ViewerAction>()
            .add_systems(
                Update,
                (read_motion_keys, orbit_camera_from_pointer).in_set(ViewerPipelineSet::Input),
            )
            .add_systems(
                Update,
                (apply_orbit_camera, log_viewport_resize).in_set(ViewerPipelineSet::Camera),
            );
    }
}
