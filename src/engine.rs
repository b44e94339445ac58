use three_d::*;

use crate::config::ViewerConfig;
use crate::controls::OrbitControl;
use crate::grid::Grid;
use crate::scene::{build_ground, hex_to_rgb, hex_to_srgba, to_vec3, Scene, SceneObject};

/// Rendering context, camera, lights and scene, ticked once per frame.
pub struct Engine {
    context: Context,
    camera: Camera,
    controls: OrbitControl,
    ambient: AmbientLight,
    directional: DirectionalLight,
    grid: Option<Grid>,
    scene: Scene,

    background: [f32; 3],
    shadows_enabled: bool,
    shadow_map_size: u32,
    shadows_stale: bool,
}

impl Engine {
    /// Build the camera, orbit controls, lights, ground plane and grid.
    ///
    /// `config` is expected to have passed [`ViewerConfig::validate`].
    pub fn new(context: &Context, viewport: Viewport, config: &ViewerConfig) -> Self {
        let target = to_vec3(config.camera.target);
        let camera = Camera::new_perspective(
            viewport,
            to_vec3(config.camera.position),
            target,
            vec3(0.0, 1.0, 0.0),
            degrees(config.camera.fov),
            config.camera.near,
            config.camera.far,
        );
        let controls = OrbitControl::from_config(target, &config.controls);

        let lights = &config.lights;
        let ambient = AmbientLight::new(
            context,
            lights.ambient_intensity,
            hex_to_srgba(lights.ambient_color),
        );
        let direction = target - to_vec3(lights.directional_position);
        let directional = DirectionalLight::new(
            context,
            lights.directional_intensity,
            hex_to_srgba(lights.directional_color),
            &direction,
        );

        let mut scene = Scene::new();
        scene.add(build_ground(context, &config.ground));

        let grid = config.grid.enabled.then(|| Grid::new(context, &config.grid));

        let shadows_enabled = config.renderer.shadows && lights.cast_shadow;
        log::info!(
            "engine ready: {}x{} viewport, shadows {}",
            viewport.width,
            viewport.height,
            if shadows_enabled { "on" } else { "off" }
        );

        Self {
            context: context.clone(),
            camera,
            controls,
            ambient,
            directional,
            grid,
            scene,
            background: hex_to_rgb(config.renderer.background_color),
            shadows_enabled,
            shadow_map_size: lights.shadow_map_size,
            shadows_stale: true,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Attach an object to the scene.
    pub fn add(&mut self, object: SceneObject) {
        log::debug!(
            "adding '{}' to scene{}",
            object.name,
            if object.cast_shadow { " (casts shadow)" } else { "" }
        );
        if object.cast_shadow {
            self.shadows_stale = true;
        }
        self.scene.add(object);
    }

    /// Render one frame.
    pub fn tick(&mut self, mut frame_input: FrameInput) -> FrameOutput {
        if self.camera.set_viewport(frame_input.viewport) {
            log::debug!(
                "viewport resized to {}x{}",
                frame_input.viewport.width,
                frame_input.viewport.height
            );
        }

        self.controls.handle_events(&mut frame_input.events);
        self.controls.update(&mut self.camera);

        if self.shadows_stale {
            self.refresh_shadow_map();
        }

        let mut objects: Vec<&dyn Object> = self
            .scene
            .iter()
            .map(|o| &o.model as &dyn Object)
            .collect();
        if let Some(grid) = &self.grid {
            objects.extend(grid.objects());
        }
        let lights: [&dyn Light; 2] = [&self.ambient, &self.directional];

        let [r, g, b] = self.background;
        frame_input
            .screen()
            .clear(ClearState::color_and_depth(r, g, b, 1.0, 1.0))
            .render(&self.camera, objects, &lights);

        FrameOutput::default()
    }

    /// Only shadow casters are drawn into the map. The scene is static, so
    /// this runs once after objects are added rather than every frame.
    fn refresh_shadow_map(&mut self) {
        let casters: Vec<&Mesh> = self
            .scene
            .shadow_casters()
            .map(|o| &o.model.geometry)
            .collect();

        if self.shadows_enabled && !casters.is_empty() {
            log::debug!(
                "generating {0}x{0} shadow map from {1} caster(s)",
                self.shadow_map_size,
                casters.len()
            );
            self.directional
                .generate_shadow_map(self.shadow_map_size, casters);
        } else {
            self.directional.clear_shadow_map();
        }
        self.shadows_stale = false;
    }
}
