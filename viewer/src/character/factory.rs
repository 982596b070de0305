use super::parts::PartTable;
use super::types::{ModelSource, RobotPart, RobotRoot};
use bevy::prelude::*;
use motion::{Primitive, RobotBlueprint};

pub struct RobotFactory;

impl RobotFactory {
    /// Spawn the blueprint robot under a new `RobotRoot` at the origin.
    pub fn spawn_fallback(
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        blueprint: &RobotBlueprint,
    ) -> (Entity, PartTable) {
        let root = commands
            .spawn((
                Name::new("robot"),
                RobotRoot {
                    source: ModelSource::Fallback,
                },
                Transform::default(),
                Visibility::default(),
            ))
            .id();

        let mut spawned: Vec<Entity> = Vec::with_capacity(blueprint.parts().len());
        let mut table = PartTable::default();

        for part in blueprint.parts() {
            let parent = part
                .parent
                .and_then(|index| spawned.get(index).copied())
                .unwrap_or(root);
            let [x, y, z] = part.offset;

            let mut entity = commands.spawn((
                Name::new(part.name),
                RobotPart {
                    name: part.name,
                    role: part.role,
                },
                Transform::from_xyz(x, y, z),
                Visibility::default(),
                ChildOf(parent),
            ));

            if let Some(primitive) = part.primitive {
                let [r, g, b] = part.color;
                let [er, eg, eb] = part.emissive;
                entity.insert((
                    Mesh3d(meshes.add(primitive_mesh(primitive))),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: Color::linear_rgb(r, g, b),
                        emissive: LinearRgba::rgb(er, eg, eb),
                        perceptual_roughness: 0.45,
                        metallic: 0.6,
                        ..default()
                    })),
                ));
            }

            let id = entity.id();
            if let Some(role) = part.role {
                table.insert(role, id);
            }
            spawned.push(id);
        }

        info!(
            "Fallback robot spawned with {} parts ({} roles)",
            spawned.len(),
            table.len()
        );
        (root, table)
    }
}

fn primitive_mesh(primitive: Primitive) -> Mesh {
    match primitive {
        Primitive::Cuboid {
            width,
            height,
            depth,
        } => Cuboid::new(width, height, depth).into(),
        Primitive::Cylinder { radius, height } => Cylinder::new(radius, height).into(),
        Primitive::Sphere { radius } => Sphere::new(radius).into(),
    }
}
