use super::motion::MotionCommandMessage;
use super::parts::PartTable;
use bevy::prelude::*;
use motion::MotionCommand;

pub const EYE_FLASH_EMISSIVE: LinearRgba = LinearRgba::rgb(0.6, 2.4, 3.0);

/// Emissive values replaced by the current flash, restored on revert.
#[derive(Resource, Default)]
pub struct EyeFlashState {
    saved: Vec<(AssetId<StandardMaterial>, LinearRgba)>,
}

impl EyeFlashState {
    pub fn is_lit(&self) -> bool {
        !self.saved.is_empty()
    }
}

pub fn apply_eye_effects(
    parts: Res<PartTable>,
    mut flash: ResMut<EyeFlashState>,
    mut motion_commands: MessageReader<MotionCommandMessage>,
    children_query: Query<&Children>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for MotionCommandMessage(command) in motion_commands.read() {
        match command {
            MotionCommand::FlashEyes => {
                if flash.is_lit() {
                    continue;
                }
                let Some(target) = parts.flash_target() else {
                    continue;
                };
                let mut queue = vec![target];
                while let Some(entity) = queue.pop() {
                    if let Ok(handle) = mesh_materials.get(entity) {
                        let id = handle.id();
                        let already_saved = flash.saved.iter().any(|(saved, _)| *saved == id);
                        if !already_saved {
                            if let Some(material) = materials.get_mut(id) {
                                flash.saved.push((id, material.emissive));
                                material.emissive = EYE_FLASH_EMISSIVE;
                            }
                        }
                    }
                    if let Ok(children) = children_query.get(entity) {
                        queue.extend(children.iter());
                    }
                }
            }
            MotionCommand::RestoreEyes => {
                for (id, emissive) in flash.saved.drain(..) {
                    if let Some(material) = materials.get_mut(id) {
                        material.emissive = emissive;
                    }
                }
            }
            MotionCommand::CrossFade { .. } | MotionCommand::FadeOutAll { .. } => {}
        }
    }
}
