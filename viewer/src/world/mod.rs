use crate::app::pipeline::ViewerPipelineSet;
use crate::character::RobotRoot;
use crate::grid_overlay::{GridOverlayConfig, draw_grid_overlay};
use crate::input::OrbitRig;
use crate::settings::{GraphicsSettings, SettingsResource};
use bevy::camera::{ClearColorConfig, PerspectiveProjection, Projection};
use bevy::light::{DirectionalLightShadowMap, GlobalAmbientLight};
use bevy::prelude::*;

const GROUND_SIZE: f32 = 30.0;
const CLEAR_COLOR: Color = Color::srgb(0.1, 0.1, 0.15);

#[derive(Component)]
struct WorldCamera;
#[derive(Component)]
struct KeyLight;
#[derive(Component)]
struct FillLight;
#[derive(Component)]
struct Ground;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        let graphics = app
            .world()
            .get_resource::<SettingsResource>()
            .map(|settings| settings.current.graphics.clone())
            .unwrap_or_default();

        if graphics.show_grid {
            app.init_resource::<GridOverlayConfig>().add_systems(
                Update,
                draw_floor_grid.in_set(ViewerPipelineSet::Present),
            );
        }

        app.insert_resource(graphics)
            .insert_resource(GlobalAmbientLight {
                color: Color::srgb(0.96, 0.97, 1.0),
                brightness: 250.0,
                affects_lightmapped_meshes: true,
            })
            .insert_resource(DirectionalLightShadowMap { size: 2048 })
            .add_systems(Startup, (setup_world_camera, setup_lights, setup_ground));
    }
}

fn setup_world_camera(mut commands: Commands, rig: Option<Res<OrbitRig>>) {
    let rig = rig.map(|rig| rig.clone()).unwrap_or_default();
    let eye = rig.eye();
    let target = rig.target;

    commands.spawn((
        WorldCamera,
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(CLEAR_COLOR),
            ..Default::default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: 45f32.to_radians(),
            near: 0.1,
            far: 1_000.0,
            ..default()
        }),
        Transform::from_xyz(eye.x, eye.y, eye.z)
            .looking_at(Vec3::new(target.x, target.y, target.z), Vec3::Y),
    ));
}

fn setup_lights(mut commands: Commands, graphics: Res<GraphicsSettings>) {
    let target = Vec3::ZERO;
    let quality = graphics.shadow_quality;

    commands.spawn((
        KeyLight,
        DirectionalLight {
            color: Color::srgb(1.0, 0.98, 0.94),
            illuminance: 8_000.0,
            shadows_enabled: quality.shadows_enabled(),
            ..default()
        },
        quality.cascade_builder().build(),
        Transform::from_xyz(5.0, 10.0, 7.5).looking_at(target, Vec3::Y),
    ));

    // Opposite side, no shadows.
    commands.spawn((
        FillLight,
        DirectionalLight {
            color: Color::srgb(0.9, 0.94, 1.0),
            illuminance: 2_500.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-5.0, 6.0, -7.5).looking_at(target, Vec3::Y),
    ));

    info!(
        "World lights spawned (shadows: {:?})",
        graphics.shadow_quality
    );
}

fn setup_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Ground,
        Name::new("ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.22, 0.26),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::default(),
    ));
}

fn draw_floor_grid(
    mut gizmos: Gizmos,
    config: Res<GridOverlayConfig>,
    roots: Query<&Transform, With<RobotRoot>>,
) {
    let center = roots
        .iter()
        .next()
        .map(|transform| transform.translation)
        .unwrap_or(Vec3::ZERO);
    draw_grid_overlay(&mut gizmos, center, *config);
}
