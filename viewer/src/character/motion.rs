use super::types::RobotRoot;
use crate::input::{HeldMovement, ViewerAction};
use bevy::prelude::*;
use motion::{MotionCommand, MotionController, MotionState, MotionTuning, dispatch};

/// One controller command, fanned out to the animation and effect systems.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionCommandMessage(pub MotionCommand);

#[derive(Resource)]
pub struct RobotMotion {
    pub controller: MotionController,
}

impl RobotMotion {
    pub fn new(tuning: MotionTuning) -> Self {
        Self {
            controller: MotionController::new(tuning),
        }
    }
}

impl Default for RobotMotion {
    fn default() -> Self {
        Self::new(MotionTuning::default())
    }
}

pub fn sync_motion_clock(time: Res<Time>, mut motion: ResMut<RobotMotion>) {
    motion.controller.clock_mut().set(time.elapsed());
}

pub fn dispatch_viewer_actions(
    mut actions: MessageReader<ViewerAction>,
    mut motion: ResMut<RobotMotion>,
) {
    for ViewerAction(action) in actions.read() {
        debug!("Action {:?}", action);
        dispatch(*action, &mut motion.controller);
    }
}

pub fn tick_robot_motion(
    held: Res<HeldMovement>,
    mut motion: ResMut<RobotMotion>,
    mut command_writer: MessageWriter<MotionCommandMessage>,
    mut last_state: Local<Option<MotionState>>,
) {
    motion.controller.tick(held.0);

    for command in motion.controller.drain_commands() {
        command_writer.write(MotionCommandMessage(command));
    }

    let state = motion.controller.state();
    if *last_state != Some(state) {
        debug!("Robot motion state: {:?} -> {:?}", *last_state, state);
        *last_state = Some(state);
    }
}

/// Yaw about Y, then tilt about the forward axis.
pub fn write_robot_transform(
    motion: Res<RobotMotion>,
    mut roots: Query<&mut Transform, With<RobotRoot>>,
) {
    let pose = motion.controller.pose();
    let [x, y, z] = pose.position.to_array();
    for mut transform in &mut roots {
        transform.translation = Vec3::new(x, y, z);
        transform.rotation = Quat::from_rotation_y(pose.yaw) * Quat::from_rotation_z(pose.tilt);
    }
}
