//! Hand-authored demo scenes

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scene_engine::core::config::SceneConfig;
use scene_engine::foundation::bezier::{BezierCurve, BezierList};
use scene_engine::foundation::collections::EntityId;
use scene_engine::foundation::math::{utils, Mat4, Vec3};
use scene_engine::foundation::time::FrameTime;
use scene_engine::render::{DirectionalLight, Material, PhongBlinnMaterial, PointLight, Skybox, SpotLight};
use scene_engine::scene::{AddEntityOptions, EntityDesc, Mat4Compositor, Scene, Transform};

use crate::assets::DemoAssets;
use crate::HarnessError;

/// Builds one scene from the shared assets
pub type SceneBuilder = fn(&DemoAssets, &SceneConfig) -> Result<Scene, HarnessError>;

/// Every demo scene, in presentation order
pub const DEMO_SCENES: &[(&str, SceneBuilder)] = &[
    ("four_balls", four_balls),
    ("solar_system", solar_system),
    ("ball_between_light_and_camera", ball_between_light_and_camera),
    ("squish_test", squish_test),
    ("forest", forest),
    ("normal_mapping", normal_mapping),
    ("shell_texturing", shell_texturing),
    ("terrain", terrain),
];

/// Look up a scene builder by name
pub fn find(name: &str) -> Option<SceneBuilder> {
    DEMO_SCENES
        .iter()
        .find(|(scene_name, _)| *scene_name == name)
        .map(|&(_, builder)| builder)
}

fn default_material() -> Rc<dyn Material> {
    Rc::new(PhongBlinnMaterial::default())
}

fn colored(color: Vec3) -> Rc<dyn Material> {
    Rc::new(PhongBlinnMaterial::uniform_color(color, 32.0))
}

fn skybox(assets: &DemoAssets) -> Result<Rc<Skybox>, HarnessError> {
    Ok(Rc::new(Skybox::new(
        assets.textures.get("skybox")?,
        assets.shaders.get("skybox")?,
        assets.meshes.get("cube")?,
    )))
}

/// Four balls around the origin under a sun
pub fn four_balls(assets: &DemoAssets, config: &SceneConfig) -> Result<Scene, HarnessError> {
    let mut scene = Scene::with_config("four_balls", config);
    let phong = assets.shaders.get("phong")?;
    let ball = assets.meshes.get("ball")?;

    for position in [
        Vec3::new(0.0, 0.0, 3.0),
        Vec3::new(0.0, 0.0, -3.0),
        Vec3::new(0.0, -3.0, 0.0),
        Vec3::new(0.0, 3.0, 0.0),
    ] {
        scene.add_entity(
            EntityDesc::new(phong.clone(), ball.clone())
                .with_transform(Transform::from_position(position))
                .with_material(default_material()),
            AddEntityOptions::forwarding(),
        )?;
    }

    scene.add_light(DirectionalLight::along(Vec3::new(0.0, -1.0, 0.0)));
    Ok(scene)
}

/// Sun, two planets and their moons, each orbiting its parent in the graph
pub fn solar_system(assets: &DemoAssets, config: &SceneConfig) -> Result<Scene, HarnessError> {
    let mut scene = Scene::with_config("solar_system", config);
    let constant = assets.shaders.get("constant")?;
    let blinn = assets.shaders.get("blinn")?;
    let white = assets.shaders.get("white")?;
    let ball = assets.meshes.get("ball")?;
    let grid = assets.meshes.get("grid")?;

    scene.add_entity(
        EntityDesc::new(white, grid).with_transform(
            Transform::from_position(Vec3::new(0.0, -10.0, 0.0)).with_uniform_scale(5.0),
        ),
        AddEntityOptions::empty(),
    )?;

    let sun = scene.add_entity(
        EntityDesc::new(constant, ball.clone()).with_material(colored(Vec3::new(1.0, 1.0, 0.0))),
        AddEntityOptions::empty(),
    )?;

    let orbiter = |color: Vec3, degrees_per_second: f32, radius: f32, scale: f32, parent: EntityId| {
        EntityDesc::new(blinn.clone(), ball.clone())
            .with_transform(Transform::identity().with_uniform_scale(scale))
            .with_material(colored(color))
            .with_parent(parent)
            .with_modifier(move |model: &Mat4, time: &FrameTime| {
                Mat4Compositor::composite([
                    Mat4Compositor::rotate(Vec3::new(0.0, time.elapsed * degrees_per_second, 0.0)),
                    Mat4Compositor::translate(Vec3::new(0.0, 0.0, radius)),
                ])
                .apply(model)
            })
    };

    let forwarding = AddEntityOptions::forwarding();
    let first_planet = scene.add_entity(orbiter(Vec3::new(0.8, 0.0, 0.0), 100.0, 5.0, 1.0, sun), forwarding)?;
    scene.add_entity(orbiter(Vec3::new(0.0, 0.0, 0.4), 150.0, 8.0, 0.7, first_planet), forwarding)?;
    let second_planet = scene.add_entity(orbiter(Vec3::new(0.0, 0.6, 0.0), -10.0, 20.0, 0.8, sun), forwarding)?;
    scene.add_entity(orbiter(Vec3::new(0.6, 0.0, 0.0), 50.0, 10.0, 0.7, second_planet), forwarding)?;

    scene.add_light(PointLight::default());
    Ok(scene)
}

/// Two balls, one with a clipping shader, lit from the origin
pub fn ball_between_light_and_camera(assets: &DemoAssets, config: &SceneConfig) -> Result<Scene, HarnessError> {
    let mut scene = Scene::with_config("ball_between_light_and_camera", config);
    let ball = assets.meshes.get("ball")?;

    for (shader, x) in [("phong", -5.0), ("phong_without_clip", 5.0)] {
        scene.add_entity(
            EntityDesc::new(assets.shaders.get(shader)?, ball.clone())
                .with_transform(Transform::from_position(Vec3::new(x, 0.0, 0.0)))
                .with_material(Rc::new(PhongBlinnMaterial::uniform_color(Vec3::new(1.0, 1.0, 1.0), 1.0))),
            AddEntityOptions::forwarding(),
        )?;
    }

    scene.add_entity(
        EntityDesc::new(assets.shaders.get("white")?, assets.meshes.get("grid")?)
            .with_transform(Transform::from_position(Vec3::new(0.0, -2.0, 0.0))),
        AddEntityOptions::empty(),
    )?;

    scene.add_light(PointLight::default());
    Ok(scene)
}

/// Textured models next to a ball flying along a Bezier path
pub fn squish_test(assets: &DemoAssets, config: &SceneConfig) -> Result<Scene, HarnessError> {
    let mut scene = Scene::with_config("squish_test", config);
    let phong = assets.shaders.get("phong")?;
    let textured = assets.shaders.get("phong_textured")?;

    let mut path = BezierList::new();
    path.add_curve(BezierCurve::new([
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(4.0, 4.0, 0.0),
        Vec3::new(8.0, -4.0, 0.0),
        Vec3::new(8.0, 0.0, 4.0),
    ]))
    .add_curve(BezierCurve::new([
        Vec3::new(8.0, 0.0, 4.0),
        Vec3::new(8.0, 4.0, 8.0),
        Vec3::new(-4.0, 4.0, 4.0),
        Vec3::new(0.0, 0.0, 0.0),
    ]));

    scene.add_entity(
        EntityDesc::new(phong, assets.meshes.get("ball")?)
            .with_material(default_material())
            .with_modifier(move |model: &Mat4, time: &FrameTime| {
                let t = (time.elapsed / 8.0).fract();
                Mat4Compositor::matrix(Mat4::new_translation(&path.evaluate(t))).apply(model)
            }),
        AddEntityOptions::forwarding(),
    )?;

    scene.add_entity(
        EntityDesc::new(textured.clone(), assets.meshes.get("tonk")?)
            .with_texture(assets.textures.get("tonk")?)
            .with_transform(
                Transform::from_position(Vec3::new(0.0, 3.0, -8.0)).with_rotation(Vec3::new(-90.0, 0.0, 0.0)),
            )
            .with_material(default_material()),
        AddEntityOptions::forwarding(),
    )?;

    scene.add_entity(
        EntityDesc::new(textured, assets.meshes.get("mad")?)
            .with_texture(assets.textures.get("mad")?)
            .with_transform(Transform::from_position(Vec3::new(0.0, 0.0, 8.0)))
            .with_material(default_material()),
        AddEntityOptions::forwarding(),
    )?;

    scene.add_light(PointLight::at(Vec3::new(0.0, 5.0, 5.0)));
    Ok(scene)
}

/// Randomly planted forest lit by a camera-held torch
pub fn forest(assets: &DemoAssets, config: &SceneConfig) -> Result<Scene, HarnessError> {
    const SEED: u64 = 69;
    const BALLS: u16 = 100;

    let mut scene = Scene::with_config("forest", config);
    let textured = assets.shaders.get("phong_textured")?;
    let phong = assets.shaders.get("phong")?;
    let normal = assets.shaders.get("normal")?;
    let tree_texture = assets.textures.get("mad")?;
    let tree = assets.meshes.get("tree")?;
    let bush = assets.meshes.get("bush")?;
    let ball = assets.meshes.get("ball")?;
    let suzi = assets.meshes.get("suzi")?;

    scene.set_skybox(skybox(assets)?);
    scene.add_entity(
        EntityDesc::new(textured.clone(), assets.meshes.get("plane")?)
            .with_texture(assets.textures.get("grass")?)
            .with_transform(Transform::identity().with_scale(Vec3::new(20.0, 1.0, 20.0)))
            .with_material(default_material()),
        AddEntityOptions::forwarding(),
    )?;

    scene.camera_mut().move_up(5.0);
    scene.add_light(SpotLight::default());
    scene.lock_spotlights_to_camera(true);

    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..30 {
        let scale: f32 = rng.gen_range(0.5..1.5);
        for (mesh, grow) in [(&tree, 0.0), (&bush, 1.0)] {
            let position = Vec3::new(rng.gen_range(-15.0..15.0), 0.0, rng.gen_range(-15.0..15.0));
            let yaw: f32 = rng.gen_range(0.0..360.0);
            scene.add_entity(
                EntityDesc::new(textured.clone(), Rc::clone(mesh))
                    .with_texture(tree_texture.clone())
                    .with_transform(
                        Transform::from_position(position)
                            .with_uniform_scale(scale + grow)
                            .with_rotation(Vec3::new(0.0, yaw, 0.0)),
                    )
                    .with_material(default_material()),
                AddEntityOptions::forwarding(),
            )?;
        }
    }

    scene.add_entity(
        EntityDesc::new(assets.shaders.get("rtx")?, ball.clone())
            .with_transform(Transform::from_position(Vec3::new(0.0, 10.0, 0.0)))
            .with_material(default_material()),
        AddEntityOptions::forwarding(),
    )?;

    scene.add_entity(
        EntityDesc::new(textured.clone(), assets.meshes.get("tonk")?)
            .with_texture(assets.textures.get("tonk")?)
            .with_transform(
                Transform::from_position(Vec3::new(0.0, 2.2, 0.0))
                    .with_rotation(Vec3::new(-90.0, 0.0, 0.0))
                    .with_uniform_scale(0.3),
            )
            .with_material(default_material()),
        AddEntityOptions::forwarding(),
    )?;

    // Hops at roughly a tenth of a radian per 60 Hz frame
    scene.add_entity(
        EntityDesc::new(textured, assets.meshes.get("rat")?)
            .with_texture(assets.textures.get("rat")?)
            .with_transform(Transform::from_position(Vec3::new(0.0, 0.0, 3.0)))
            .with_material(default_material())
            .with_modifier(|model: &Mat4, time: &FrameTime| {
                let height = (time.elapsed * 6.0).sin() + 1.0;
                Mat4Compositor::composite([
                    Mat4Compositor::translate(Vec3::new(0.0, height, 0.0)),
                    Mat4Compositor::matrix(*model),
                ])
                .compose()
            }),
        AddEntityOptions::forwarding(),
    )?;

    let step = 360.0 / f32::from(BALLS);
    for i in 0..BALLS {
        let angle = step * f32::from(i);
        let radians = utils::deg_to_rad(angle);
        let position = Vec3::new(10.0 * radians.cos(), 2.0, 10.0 * radians.sin());

        if i % 2 == 1 {
            scene.add_entity(
                EntityDesc::new(phong.clone(), ball.clone())
                    .with_texture(tree_texture.clone())
                    .with_transform(Transform::from_position(position).with_uniform_scale(0.3))
                    .with_material(default_material()),
                AddEntityOptions::forwarding(),
            )?;
        } else {
            scene.add_entity(
                EntityDesc::new(normal.clone(), suzi.clone())
                    .with_transform(
                        Transform::from_position(position)
                            .with_uniform_scale(0.3)
                            .with_rotation(Vec3::new(0.0, -angle - 90.0, 0.0)),
                    )
                    .with_material(default_material()),
                AddEntityOptions::empty(),
            )?;
        }
    }

    Ok(scene)
}

/// Brick wall with and without a normal map
pub fn normal_mapping(assets: &DemoAssets, config: &SceneConfig) -> Result<Scene, HarnessError> {
    let mut scene = Scene::with_config("normal_mapping", config);
    let plane = assets.meshes.get("plane")?;
    let wall = assets.textures.get("wall")?;
    let wall_normal = assets.textures.get("wall_normal")?;

    for (shader, height) in [("phong_textured", 2.0), ("phong_textured_normals", 0.0)] {
        scene.add_entity(
            EntityDesc::new(assets.shaders.get(shader)?, plane.clone())
                .with_textures(vec![wall.clone(), wall_normal.clone()])
                .with_transform(
                    Transform::from_position(Vec3::new(0.0, height, 0.0)).with_rotation(Vec3::new(90.0, 0.0, 0.0)),
                )
                .with_material(default_material()),
            AddEntityOptions::forwarding(),
        )?;
    }

    if let Some(light) = scene.insert_light(PointLight::at(Vec3::new(1.0, 1.0, 2.0))) {
        scene.invoke_light(light);
    }
    Ok(scene)
}

/// Stacked translucent shells faking grass blades
pub fn shell_texturing(assets: &DemoAssets, config: &SceneConfig) -> Result<Scene, HarnessError> {
    const SHELLS: u8 = 64;
    const PLANE_SCALE: f32 = 10.0;
    const MAX_GRASS_HEIGHT: f32 = 0.25;

    let mut scene = Scene::with_config("shell_texturing", config);
    let plane = assets.meshes.get("plane")?;
    let grass = assets.shaders.get("grass")?;
    let grass_material: Rc<dyn Material> = Rc::new(
        PhongBlinnMaterial::new()
            .with_ambient_color(Vec3::new(1.0, 1.0, 1.0))
            .with_diffuse_color(Vec3::new(1.0, 1.0, 1.0))
            .with_specular_color(Vec3::zeros()),
    );
    let ground = Transform::identity().with_scale(Vec3::new(PLANE_SCALE, 1.0, PLANE_SCALE));

    scene.add_entity(
        EntityDesc::new(assets.shaders.get("black")?, plane.clone())
            .with_transform(ground)
            .with_material(grass_material.clone()),
        AddEntityOptions::empty(),
    )?;

    let step = MAX_GRASS_HEIGHT / f32::from(SHELLS);
    for shell in 0..SHELLS {
        scene.add_entity(
            EntityDesc::new(grass.clone(), plane.clone())
                .with_transform(ground.with_position(Vec3::new(0.0, step * f32::from(shell), 0.0)))
                .with_material(grass_material.clone()),
            AddEntityOptions::empty(),
        )?;
    }

    scene.add_entity(
        EntityDesc::new(assets.shaders.get("phong_textured")?, assets.meshes.get("tree")?)
            .with_texture(assets.textures.get("mad")?)
            .with_transform(Transform::identity().with_uniform_scale(0.3))
            .with_material(default_material()),
        AddEntityOptions::forwarding(),
    )?;

    scene.add_light(DirectionalLight::along(Vec3::new(0.0, -1.0, 1.0)));
    scene.camera_mut().move_up(3.0);
    Ok(scene)
}

/// Grass-textured terrain under a low sun
pub fn terrain(assets: &DemoAssets, config: &SceneConfig) -> Result<Scene, HarnessError> {
    let mut scene = Scene::with_config("terrain", config);

    scene.set_skybox(skybox(assets)?);
    scene.add_entity(
        EntityDesc::new(assets.shaders.get("phong_textured")?, assets.meshes.get("terrain")?)
            .with_texture(assets.textures.get("grass")?)
            .with_material(default_material()),
        AddEntityOptions::forwarding(),
    )?;

    scene.add_light(DirectionalLight::along(Vec3::new(0.0, -1.0, 1.0)));
    scene.camera_mut().move_up(3.0);
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_engine::input::InputManager;

    #[test]
    fn test_every_scene_builds() {
        let assets = DemoAssets::headless();
        for (name, builder) in DEMO_SCENES {
            let scene = builder(&assets, &SceneConfig::default()).unwrap();
            assert_eq!(scene.name(), *name);
            assert!(scene.entity_count() > 0);
        }
    }

    #[test]
    fn test_forest_is_reproducible() {
        let assets = DemoAssets::headless();
        let first = forest(&assets, &SceneConfig::default()).unwrap();
        let second = forest(&assets, &SceneConfig::default()).unwrap();

        let positions = |scene: &Scene| -> Vec<Vec3> {
            scene
                .graph()
                .iter()
                .map(|(_, entity)| entity.transform().position)
                .collect()
        };
        assert_eq!(positions(&first), positions(&second));
        assert_eq!(first.entity_count(), 1 + 60 + 3 + 100);
    }

    #[test]
    fn test_solar_system_first_planet_orbits_sun() {
        let assets = DemoAssets::headless();
        let mut scene = solar_system(&assets, &SceneConfig::default()).unwrap();
        // 0.9 s at 100 deg/s is a quarter turn
        for _ in 0..9 {
            scene.update(&InputManager::new(), 0.1);
        }

        let planet = scene.graph().ids()[2];
        let world = scene.world_matrix(planet).unwrap();
        let position = utils::translation_of(&world);
        assert!((position - Vec3::new(5.0, 0.0, 0.0)).norm() < 1e-3);
    }

    #[test]
    fn test_moons_orbit_their_planets() {
        let assets = DemoAssets::headless();
        let mut scene = solar_system(&assets, &SceneConfig::default()).unwrap();
        let ids = scene.graph().ids().to_vec();
        let (sun, first_planet, first_moon, second_planet, second_moon) = (ids[1], ids[2], ids[3], ids[4], ids[5]);

        assert_eq!(scene.graph().children_of(sun), vec![first_planet, second_planet]);
        assert_eq!(scene.graph().children_of(first_planet), vec![first_moon]);
        assert_eq!(scene.graph().children_of(second_planet), vec![second_moon]);

        for _ in 0..7 {
            scene.update(&InputManager::new(), 0.13);
        }
        let at = |id: EntityId| utils::translation_of(&scene.world_matrix(id).unwrap());
        // moon radius scaled by the moon's own 0.7
        assert!(((at(first_moon) - at(first_planet)).norm() - 8.0 * 0.7).abs() < 1e-3);
    }

    #[test]
    fn test_forest_spotlight_starts_at_camera() {
        let assets = DemoAssets::headless();
        let scene = forest(&assets, &SceneConfig::default()).unwrap();
        let spot = &scene.lights::<SpotLight>()[0];

        assert!(scene.spotlights_locked());
        assert!((spot.position - scene.camera().position()).norm() < 1e-5);
    }

    #[test]
    fn test_find_by_name() {
        assert!(find("terrain").is_some());
        assert!(find("teapot").is_none());
    }
}
