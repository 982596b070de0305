use std::collections::HashMap;

use crate::roles::PartRole;

/// Primitive solid for one robot part. Dimensions are full extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Cuboid { width: f32, height: f32, depth: f32 },
    Cylinder { radius: f32, height: f32 },
    Sphere { radius: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartSpec {
    pub name: &'static str,
    pub role: Option<PartRole>,
    /// Index of the parent part; `None` attaches to the robot root.
    pub parent: Option<usize>,
    /// `None` for grouping nodes that carry no geometry.
    pub primitive: Option<Primitive>,
    /// Linear RGB base colour.
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    /// Translation relative to the parent.
    pub offset: [f32; 3],
}

/// Parts of the procedural robot used when no model asset loads.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotBlueprint {
    parts: Vec<PartSpec>,
}

const BODY: [f32; 3] = [0.55, 0.6, 0.68];
const JOINT: [f32; 3] = [0.25, 0.27, 0.32];
const VISOR: [f32; 3] = [0.05, 0.08, 0.12];
const EYE: [f32; 3] = [0.2, 0.9, 1.0];
const NO_GLOW: [f32; 3] = [0.0, 0.0, 0.0];

impl RobotBlueprint {
    /// Humanoid built from boxes, cylinders and spheres, facing +z with the
    /// feet resting on y = 0.
    pub fn standard() -> Self {
        let mut parts = Vec::with_capacity(16);
        let mut add = |spec: PartSpec| {
            parts.push(spec);
            parts.len() - 1
        };

        let torso = add(solid(
            "torso",
            Some(PartRole::Torso),
            None,
            Primitive::Cuboid {
                width: 1.2,
                height: 1.4,
                depth: 0.7,
            },
            BODY,
            [0.0, 2.3, 0.0],
        ));
        let head = add(solid(
            "head",
            Some(PartRole::Head),
            Some(torso),
            Primitive::Cuboid {
                width: 0.9,
                height: 0.8,
                depth: 0.8,
            },
            BODY,
            [0.0, 1.15, 0.0],
        ));
        let visor = add(solid(
            "visor",
            Some(PartRole::Visor),
            Some(head),
            Primitive::Cuboid {
                width: 0.75,
                height: 0.3,
                depth: 0.05,
            },
            VISOR,
            [0.0, 0.05, 0.41],
        ));
        let eyes = add(PartSpec {
            name: "eyes",
            role: Some(PartRole::Eyes),
            parent: Some(visor),
            primitive: None,
            color: EYE,
            emissive: NO_GLOW,
            offset: [0.0, 0.0, 0.03],
        });
        for (name, x) in [("left_eye", -0.18), ("right_eye", 0.18)] {
            add(PartSpec {
                name,
                role: None,
                parent: Some(eyes),
                primitive: Some(Primitive::Sphere { radius: 0.07 }),
                color: EYE,
                emissive: [0.1, 0.45, 0.5],
                offset: [x, 0.0, 0.0],
            });
        }

        for (arm, hand, role, x) in [
            ("left_arm", "left_hand", PartRole::LeftArm, -0.8),
            ("right_arm", "right_hand", PartRole::RightArm, 0.8),
        ] {
            let arm_index = add(solid(
                arm,
                Some(role),
                Some(torso),
                Primitive::Cylinder {
                    radius: 0.15,
                    height: 1.2,
                },
                BODY,
                [x, 0.05, 0.0],
            ));
            add(solid(
                hand,
                None,
                Some(arm_index),
                Primitive::Sphere { radius: 0.18 },
                JOINT,
                [0.0, -0.75, 0.0],
            ));
        }

        for (leg, foot, x) in [("left_leg", "left_foot", -0.3), ("right_leg", "right_foot", 0.3)] {
            let leg_index = add(solid(
                leg,
                None,
                Some(torso),
                Primitive::Cylinder {
                    radius: 0.18,
                    height: 1.5,
                },
                JOINT,
                [x, -1.35, 0.0],
            ));
            add(solid(
                foot,
                None,
                Some(leg_index),
                Primitive::Cuboid {
                    width: 0.35,
                    height: 0.2,
                    depth: 0.55,
                },
                JOINT,
                [0.0, -0.85, 0.1],
            ));
        }

        Self { parts }
    }

    pub fn parts(&self) -> &[PartSpec] {
        &self.parts
    }

    /// Role → part index, first tagged part per role.
    pub fn part_roles(&self) -> HashMap<PartRole, usize> {
        let mut roles = HashMap::new();
        for (index, part) in self.parts.iter().enumerate() {
            if let Some(role) = part.role {
                roles.entry(role).or_insert(index);
            }
        }
        roles
    }

    /// Offset of `index` from the robot root, summed through its parents.
    pub fn root_offset(&self, index: usize) -> [f32; 3] {
        let mut total = [0.0; 3];
        let mut cursor = Some(index);
        while let Some(current) = cursor {
            let Some(part) = self.parts.get(current) else {
                break;
            };
            for axis in 0..3 {
                total[axis] += part.offset[axis];
            }
            cursor = part.parent;
        }
        total
    }
}

fn solid(
    name: &'static str,
    role: Option<PartRole>,
    parent: Option<usize>,
    primitive: Primitive,
    color: [f32; 3],
    offset: [f32; 3],
) -> PartSpec {
    PartSpec {
        name,
        role,
        parent,
        primitive: Some(primitive),
        color,
        emissive: NO_GLOW,
        offset,
    }
}
