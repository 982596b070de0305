use super::animation::RobotAnimations;
use super::factory::RobotFactory;
use super::motion::RobotMotion;
use super::parts::{PartTable, collect_named_descendants};
use super::types::{ModelSource, RobotRoot, RobotSceneHost};
use crate::ui::{LoadingOverlay, StatusFeed};
use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::scene::{SceneInstance, SceneSpawner};
use motion::{ModelProfile, RobotBlueprint, Severity};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStage {
    NotRequested,
    /// Waiting on the glTF asset and its dependencies.
    Requested,
    /// Scene spawned; waiting for the instance to finish.
    SceneSpawned { root: Entity, host: Entity },
    Failed(String),
    Ready(ModelSource),
}

#[derive(Resource, Debug)]
pub struct ModelPipeline {
    pub path: String,
    pub gltf: Option<Handle<Gltf>>,
    pub stage: LoadStage,
}

impl ModelPipeline {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            gltf: None,
            stage: LoadStage::NotRequested,
        }
    }

    pub fn failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            gltf: None,
            stage: LoadStage::Failed(reason.into()),
        }
    }

    fn fail(&mut self, reason: impl Into<String>) {
        self.stage = LoadStage::Failed(reason.into());
    }
}

/// The file's default scene, else its first scene.
pub fn pick_scene(
    default_scene: Option<&Handle<Scene>>,
    scenes: &[Handle<Scene>],
) -> Option<Handle<Scene>> {
    default_scene.or_else(|| scenes.first()).cloned()
}

pub fn request_robot_model(
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    mut pipeline: ResMut<ModelPipeline>,
    mut status: ResMut<StatusFeed>,
) {
    if pipeline.stage != LoadStage::NotRequested {
        return;
    }

    info!("Loading robot model '{}'", pipeline.path);
    let handle: Handle<Gltf> = asset_server.load(pipeline.path.clone());
    pipeline.gltf = Some(handle);
    pipeline.stage = LoadStage::Requested;
    status.post("Loading robot model...", Severity::Info, time.elapsed());
}

pub fn poll_robot_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut pipeline: ResMut<ModelPipeline>,
    mut animations: ResMut<RobotAnimations>,
) {
    if pipeline.stage != LoadStage::Requested {
        return;
    }
    let Some(handle) = pipeline.gltf.clone() else {
        pipeline.fail("no model handle was requested");
        return;
    };

    if let LoadState::Failed(error) = asset_server.load_state(handle.id()) {
        pipeline.fail(error.to_string());
        return;
    }
    if let RecursiveDependencyLoadState::Failed(error) =
        asset_server.recursive_dependency_load_state(handle.id())
    {
        pipeline.fail(error.to_string());
        return;
    }
    if !asset_server.is_loaded_with_dependencies(handle.id()) {
        return;
    }

    let Some(gltf) = gltfs.get(&handle) else {
        return;
    };
    let Some(scene) = pick_scene(gltf.default_scene.as_ref(), &gltf.scenes) else {
        pipeline.fail("model file contains no scenes");
        return;
    };

    *animations = RobotAnimations::from_gltf(gltf, &mut graphs);

    let root = commands
        .spawn((
            Name::new("robot"),
            RobotRoot {
                source: ModelSource::Asset,
            },
            Transform::default(),
            Visibility::default(),
        ))
        .id();
    let host = commands
        .spawn((RobotSceneHost, SceneRoot(scene), ChildOf(root)))
        .id();

    debug!("Robot scene spawned under {root:?}");
    pipeline.stage = LoadStage::SceneSpawned { root, host };
}

pub fn await_robot_scene(
    time: Res<Time>,
    scene_spawner: Res<SceneSpawner>,
    instances: Query<&SceneInstance>,
    children_query: Query<&Children>,
    names: Query<&Name>,
    animations: Res<RobotAnimations>,
    mut pipeline: ResMut<ModelPipeline>,
    mut parts: ResMut<PartTable>,
    mut motion: ResMut<RobotMotion>,
    mut status: ResMut<StatusFeed>,
    mut loading: ResMut<LoadingOverlay>,
) {
    let LoadStage::SceneSpawned { root, host } = pipeline.stage else {
        return;
    };
    let Ok(instance) = instances.get(host) else {
        return;
    };
    if !scene_spawner.instance_is_ready(**instance) {
        return;
    }

    let nodes = collect_named_descendants(root, &children_query, &names);
    *parts = PartTable::from_named_nodes(&nodes);

    let profile = ModelProfile::with_clips(animations.roles(), parts.flash_target().is_some());
    info!(
        "Robot model '{}' ready: {} named nodes, {} part roles, {} clip roles",
        pipeline.path,
        nodes.len(),
        parts.len(),
        profile.clips.len()
    );
    motion.controller.attach_model(profile);

    let now = time.elapsed();
    status.post("Robot model loaded", Severity::Success, now);
    loading.finish(now);
    pipeline.stage = LoadStage::Ready(ModelSource::Asset);
    debug!("Robot source: {}", ModelSource::Asset.label());
}

pub fn spawn_fallback_robot(
    mut commands: Commands,
    time: Res<Time>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut pipeline: ResMut<ModelPipeline>,
    mut parts: ResMut<PartTable>,
    mut motion: ResMut<RobotMotion>,
    mut status: ResMut<StatusFeed>,
    mut loading: ResMut<LoadingOverlay>,
) {
    let LoadStage::Failed(reason) = &pipeline.stage else {
        return;
    };
    warn!(
        "Failed to load robot model '{}': {}. Using fallback robot.",
        pipeline.path, reason
    );

    let (_, table) = RobotFactory::spawn_fallback(
        &mut commands,
        &mut meshes,
        &mut materials,
        &RobotBlueprint::standard(),
    );
    *parts = table;
    motion
        .controller
        .attach_model(ModelProfile::procedural(parts.flash_target().is_some()));

    let now = time.elapsed();
    status.post(
        "Robot model unavailable, showing fallback robot",
        Severity::Warning,
        now,
    );
    loading.finish(now);
    pipeline.stage = LoadStage::Ready(ModelSource::Fallback);
    debug!("Robot source: {}", ModelSource::Fallback.label());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_wins_over_first_scene() {
        let mut scenes = Assets::<Scene>::default();
        let first = scenes.add(Scene::new(World::new()));
        let default = scenes.add(Scene::new(World::new()));
        let all = vec![first.clone(), default.clone()];

        assert_eq!(pick_scene(Some(&default), &all), Some(default));
        assert_eq!(pick_scene(None, &all), Some(first));
        assert_eq!(pick_scene(None, &[]), None);
    }
}
