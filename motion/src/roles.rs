//! Best-effort mapping from asset-supplied names to the roles the controller
//! understands.
//!
//! Clip names are matched exactly against an ordered candidate list; node
//! names are matched by case-insensitive substring. Both go through the same
//! pure [`resolve_roles`] so they can be checked against literal tables.

use std::collections::HashMap;
use std::hash::Hash;

/// Canonical animation clips the controller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClipRole {
    Idle,
    Walk,
    Jump,
    Dance,
}

impl ClipRole {
    pub const ALL: [ClipRole; 4] = [
        ClipRole::Idle,
        ClipRole::Walk,
        ClipRole::Jump,
        ClipRole::Dance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ClipRole::Idle => "idle",
            ClipRole::Walk => "walk",
            ClipRole::Jump => "jump",
            ClipRole::Dance => "dance",
        }
    }

    /// Clip names tried in order; the first one present in the asset wins.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            ClipRole::Idle => &["idle", "Idle", "IDLE", "Idle_Loop", "idle_loop", "Standing"],
            ClipRole::Walk => &[
                "walk", "Walk", "WALK", "walking", "Walking", "Walk_Loop", "Running", "run", "Run",
            ],
            ClipRole::Jump => &["jump", "Jump", "JUMP", "Jumping", "WalkJump"],
            ClipRole::Dance => &["dance", "Dance", "DANCE", "Dancing", "Wave"],
        }
    }
}

/// Named parts of the robot hierarchy the controller and effects touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartRole {
    Head,
    Torso,
    LeftArm,
    RightArm,
    Eyes,
    Visor,
}

impl PartRole {
    pub const ALL: [PartRole; 6] = [
        PartRole::Head,
        PartRole::Torso,
        PartRole::LeftArm,
        PartRole::RightArm,
        PartRole::Eyes,
        PartRole::Visor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PartRole::Head => "head",
            PartRole::Torso => "torso",
            PartRole::LeftArm => "leftArm",
            PartRole::RightArm => "rightArm",
            PartRole::Eyes => "eyes",
            PartRole::Visor => "visor",
        }
    }

    /// Lowercase fragments; a node whose lowercased name contains any of
    /// them fills the role.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            PartRole::Head => &["head"],
            PartRole::Torso => &["torso", "body", "chest"],
            PartRole::LeftArm => &["leftarm", "left_arm", "arm_l", "arm.l", "arml", "shoulderl"],
            PartRole::RightArm => &[
                "rightarm", "right_arm", "arm_r", "arm.r", "armr", "shoulderr",
            ],
            PartRole::Eyes => &["eye"],
            PartRole::Visor => &["visor"],
        }
    }
}

/// How a candidate is compared against an available name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    /// Candidates are tried in list order; each must equal an available
    /// name exactly (case-sensitive).
    Exact,
    /// Available names are scanned in order; the first whose lowercased
    /// text contains any candidate fragment wins.
    ContainsIgnoreCase,
}

/// Map each role in `table` to the index of the available name that fills
/// it. Roles with no match are absent from the result.
pub fn resolve_roles<R, S>(
    table: &[(R, &[&str])],
    available: &[S],
    matching: NameMatch,
) -> HashMap<R, usize>
where
    R: Copy + Eq + Hash,
    S: AsRef<str>,
{
    let mut resolved = HashMap::new();

    match matching {
        NameMatch::Exact => {
            for &(role, candidates) in table {
                let hit = candidates.iter().find_map(|candidate| {
                    available
                        .iter()
                        .position(|name| name.as_ref() == *candidate)
                });
                if let Some(index) = hit {
                    resolved.insert(role, index);
                }
            }
        }
        NameMatch::ContainsIgnoreCase => {
            let lowered: Vec<String> = available
                .iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect();
            for &(role, fragments) in table {
                let hit = lowered.iter().position(|name| {
                    fragments
                        .iter()
                        .any(|fragment| name.contains(&fragment.to_lowercase()))
                });
                if let Some(index) = hit {
                    resolved.insert(role, index);
                }
            }
        }
    }

    resolved
}

/// Resolve the four clip roles against raw clip names.
pub fn resolve_clip_roles<S: AsRef<str>>(clip_names: &[S]) -> HashMap<ClipRole, usize> {
    let table: Vec<(ClipRole, &[&str])> = ClipRole::ALL
        .iter()
        .map(|&role| (role, role.candidates()))
        .collect();
    let resolved = resolve_roles(&table, clip_names, NameMatch::Exact);
    for (role, index) in &resolved {
        log::debug!(
            "clip role '{}' -> '{}'",
            role.name(),
            clip_names[*index].as_ref()
        );
    }
    resolved
}

/// Resolve part roles against node names in traversal order.
pub fn resolve_part_roles<S: AsRef<str>>(node_names: &[S]) -> HashMap<PartRole, usize> {
    let table: Vec<(PartRole, &[&str])> = PartRole::ALL
        .iter()
        .map(|&role| (role, role.patterns()))
        .collect();
    resolve_roles(&table, node_names, NameMatch::ContainsIgnoreCase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalised_walk_resolves_to_walk_role() {
        let names = ["Idle", "Walk", "Punch"];
        let resolved = resolve_clip_roles(&names);
        assert_eq!(resolved.get(&ClipRole::Walk), Some(&1));
        assert_eq!(resolved.get(&ClipRole::Idle), Some(&0));
        assert!(!resolved.contains_key(&ClipRole::Dance));
    }

    #[test]
    fn exact_matching_is_case_sensitive_and_ordered() {
        let names = ["Walking", "WALK"];
        let resolved = resolve_clip_roles(&names);
        // "WALK" precedes "Walking" in the candidate list.
        assert_eq!(resolved.get(&ClipRole::Walk), Some(&1));

        let lower_only = ["wAlK"];
        assert!(resolve_clip_roles(&lower_only).is_empty());
    }

    #[test]
    fn expressive_robot_clip_set() {
        let names = [
            "Dance", "Death", "Idle", "Jump", "No", "Punch", "Running", "Sitting", "Standing",
            "ThumbsUp", "Walking", "WalkJump", "Wave", "Yes",
        ];
        let resolved = resolve_clip_roles(&names);
        assert_eq!(resolved[&ClipRole::Idle], 2);
        assert_eq!(resolved[&ClipRole::Walk], 10);
        assert_eq!(resolved[&ClipRole::Jump], 3);
        assert_eq!(resolved[&ClipRole::Dance], 0);
    }

    #[test]
    fn part_matching_ignores_case_and_first_node_wins() {
        let nodes = ["RobotArmature", "Torso_Main", "Head", "HeadTop", "ShoulderL", "VisorGlass"];
        let resolved = resolve_part_roles(&nodes);
        assert_eq!(resolved[&PartRole::Torso], 1);
        assert_eq!(resolved[&PartRole::Head], 2);
        assert_eq!(resolved[&PartRole::LeftArm], 4);
        assert_eq!(resolved[&PartRole::Visor], 5);
        assert!(!resolved.contains_key(&PartRole::RightArm));
        assert!(!resolved.contains_key(&PartRole::Eyes));
    }

    #[test]
    fn generic_table_with_literal_strings() {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        enum Slot {
            A,
            B,
        }
        let table: [(Slot, &[&str]); 2] = [(Slot::A, &["x", "y"]), (Slot::B, &["z"])];
        let resolved = resolve_roles(&table, &["y", "x"], NameMatch::Exact);
        assert_eq!(resolved.get(&Slot::A), Some(&1));
        assert_eq!(resolved.get(&Slot::B), None);
    }
}
