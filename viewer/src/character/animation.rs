use super::types::RobotRoot;
use crate::character::motion::MotionCommandMessage;
use bevy::animation::RepeatAnimation;
use bevy::asset::AssetId;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use motion::{ClipRole, MotionCommand, resolve_clip_roles};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Animation graph for the loaded robot plus the clip roles it can play.
#[derive(Resource, Default)]
pub struct RobotAnimations {
    pub graph_handle: Option<Handle<AnimationGraph>>,
    pub clips: HashMap<ClipRole, AnimationNodeIndex>,
}

impl RobotAnimations {
    pub fn roles(&self) -> HashSet<ClipRole> {
        self.clips.keys().copied().collect()
    }

    pub fn node(&self, role: ClipRole) -> Option<AnimationNodeIndex> {
        self.clips.get(&role).copied()
    }

    /// Build the graph from every clip in `gltf` and resolve clip roles
    /// against the glTF animation names.
    pub fn from_gltf(gltf: &Gltf, graphs: &mut Assets<AnimationGraph>) -> Self {
        if gltf.animations.is_empty() {
            info!("Robot model has no animations; motion stays procedural.");
            return Self::default();
        }

        let mut graph = AnimationGraph::new();
        let animation_nodes: Vec<AnimationNodeIndex> = graph
            .add_clips(gltf.animations.iter().cloned(), 1.0, graph.root)
            .collect();

        let mut names: Vec<String> = (0..gltf.animations.len())
            .map(|index| format!("Animation {index}"))
            .collect();

        let index_by_clip_id: HashMap<AssetId<AnimationClip>, usize> = gltf
            .animations
            .iter()
            .enumerate()
            .map(|(index, handle)| (handle.id(), index))
            .collect();

        for (name, handle) in &gltf.named_animations {
            if let Some(&index) = index_by_clip_id.get(&handle.id()) {
                names[index] = name.to_string();
            }
        }

        let clips: HashMap<ClipRole, AnimationNodeIndex> = resolve_clip_roles(&names)
            .into_iter()
            .filter_map(|(role, index)| animation_nodes.get(index).map(|node| (role, *node)))
            .collect();

        let mut resolved: Vec<&str> = clips.keys().map(|role| role.name()).collect();
        resolved.sort_unstable();
        info!(
            "Robot animations: {} clip(s), roles resolved: {:?}",
            animation_nodes.len(),
            resolved
        );

        Self {
            graph_handle: Some(graphs.add(graph)),
            clips,
        }
    }
}

/// Marker for animation players already wired to the robot graph.
#[derive(Component)]
pub struct RobotAnimationBound;

/// Weight ramp-down started by a fade-out-all command.
#[derive(Component)]
pub struct ClipFadeOut {
    started: Duration,
    duration: Duration,
    initial: HashMap<AnimationNodeIndex, f32>,
}

/// Attach the robot graph to animation players that appeared under the robot.
pub fn bind_robot_animation_players(
    mut commands: Commands,
    animations: Res<RobotAnimations>,
    roots: Query<Entity, With<RobotRoot>>,
    children_query: Query<&Children>,
    players: Query<Entity, (With<AnimationPlayer>, Without<RobotAnimationBound>)>,
) {
    let Some(graph_handle) = animations.graph_handle.clone() else {
        return;
    };

    for root in &roots {
        let mut queue = vec![root];
        while let Some(entity) = queue.pop() {
            if players.contains(entity) {
                commands.entity(entity).insert((
                    AnimationGraphHandle(graph_handle.clone()),
                    AnimationTransitions::new(),
                    RobotAnimationBound,
                ));
                debug!("Bound robot animation player {entity:?}");
            }
            if let Ok(children) = children_query.get(entity) {
                queue.extend(children.iter());
            }
        }
    }
}

/// Apply clip commands from the motion controller to every bound player.
pub fn apply_clip_commands(
    mut commands: Commands,
    time: Res<Time>,
    animations: Res<RobotAnimations>,
    mut motion_commands: MessageReader<MotionCommandMessage>,
    mut players: Query<
        (
            Entity,
            &mut AnimationPlayer,
            &mut AnimationTransitions,
            Has<ClipFadeOut>,
        ),
        With<RobotAnimationBound>,
    >,
) {
    // Entities whose fade-out started or was cancelled earlier this frame.
    let mut fade_started: HashSet<Entity> = HashSet::new();
    let mut fade_cleared: HashSet<Entity> = HashSet::new();
    for MotionCommandMessage(command) in motion_commands.read() {
        match *command {
            MotionCommand::CrossFade { clip, fade, repeat } => {
                let Some(node) = animations.node(clip) else {
                    continue;
                };
                for (entity, mut player, mut transitions, fading_out) in &mut players {
                    let fading = fading_out || fade_started.remove(&entity);
                    if fading && fade_cleared.insert(entity) {
                        player.stop_all();
                        commands.entity(entity).remove::<ClipFadeOut>();
                    }
                    let active = transitions.play(&mut player, node, fade);
                    if repeat {
                        active.repeat();
                    } else {
                        active.set_repeat(RepeatAnimation::Never).replay();
                    }
                }
                debug!("Cross-fade to '{}' over {:?}", clip.name(), fade);
            }
            MotionCommand::FadeOutAll { fade } => {
                for (entity, mut player, mut transitions, _) in &mut players {
                    // Detach from transitions so its per-frame weights stop.
                    *transitions = AnimationTransitions::new();
                    let initial = player
                        .playing_animations()
                        .map(|(node, active)| (*node, active.weight()))
                        .collect();
                    commands.entity(entity).insert(ClipFadeOut {
                        started: time.elapsed(),
                        duration: fade,
                        initial,
                    });
                    fade_started.insert(entity);
                    fade_cleared.remove(&entity);
                }
                debug!("Fading out all clips over {fade:?}");
            }
            MotionCommand::FlashEyes | MotionCommand::RestoreEyes => {}
        }
    }
}

pub fn advance_clip_fade_outs(
    mut commands: Commands,
    time: Res<Time>,
    mut players: Query<(Entity, &mut AnimationPlayer, &ClipFadeOut)>,
) {
    for (entity, mut player, fade_out) in &mut players {
        let elapsed = time.elapsed().saturating_sub(fade_out.started);
        let progress = if fade_out.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / fade_out.duration.as_secs_f32()).min(1.0)
        };

        if progress >= 1.0 {
            player.stop_all();
            commands.entity(entity).remove::<ClipFadeOut>();
            continue;
        }

        for (node, active) in player.playing_animations_mut() {
            let initial = fade_out.initial.get(node).copied().unwrap_or(0.0);
            active.set_weight(initial * (1.0 - progress));
        }
    }
}
