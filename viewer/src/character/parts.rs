use bevy::prelude::*;
use motion::{PartRole, resolve_part_roles};
use std::collections::HashMap;

/// Role → entity for the robot currently on screen.
#[derive(Resource, Debug, Clone, Default)]
pub struct PartTable {
    roles: HashMap<PartRole, Entity>,
}

impl PartTable {
    pub fn insert(&mut self, role: PartRole, entity: Entity) {
        self.roles.insert(role, entity);
    }

    pub fn get(&self, role: PartRole) -> Option<Entity> {
        self.roles.get(&role).copied()
    }

    pub fn contains(&self, role: PartRole) -> bool {
        self.roles.contains_key(&role)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Part whose materials light up on an idle flash: eyes, else the visor.
    pub fn flash_target(&self) -> Option<Entity> {
        self.get(PartRole::Eyes).or_else(|| self.get(PartRole::Visor))
    }

    /// Match node names (in traversal order) against the part patterns.
    pub fn from_named_nodes(nodes: &[(Entity, String)]) -> Self {
        let names: Vec<&str> = nodes.iter().map(|(_, name)| name.as_str()).collect();
        let roles = resolve_part_roles(&names)
            .into_iter()
            .map(|(role, index)| (role, nodes[index].0))
            .collect();
        Self { roles }
    }
}

/// Breadth-first `Name`s under `root`, root included.
pub fn collect_named_descendants(
    root: Entity,
    children_query: &Query<&Children>,
    names: &Query<&Name>,
) -> Vec<(Entity, String)> {
    let mut result = Vec::new();
    let mut queue = std::collections::VecDeque::from([root]);
    while let Some(entity) = queue.pop_front() {
        if let Ok(name) = names.get(entity) {
            result.push((entity, name.as_str().to_string()));
        }
        if let Ok(children) = children_query.get(entity) {
            queue.extend(children.iter());
        }
    }
    result
}
