use bevy::prelude::*;
use motion::PartRole;

/// Where the robot on screen came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    Asset,
    Fallback,
}

impl ModelSource {
    pub fn label(self) -> &'static str {
        match self {
            ModelSource::Asset => "asset",
            ModelSource::Fallback => "fallback",
        }
    }
}

/// Root of the robot hierarchy; the motion pose is written to its transform.
#[derive(Component, Debug, Clone, Copy)]
pub struct RobotRoot {
    pub source: ModelSource,
}

/// Holds the loaded glTF scene under the robot root.
#[derive(Component)]
pub struct RobotSceneHost;

/// One node of the procedural robot.
#[derive(Component, Debug, Clone, Copy)]
pub struct RobotPart {
    pub name: &'static str,
    pub role: Option<PartRole>,
}
