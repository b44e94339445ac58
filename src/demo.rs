use crate::config::CubeConfig;
use crate::engine::Engine;
use crate::scene::build_box;

/// Add the demo cube: a blue box resting on the ground plane.
pub fn create_hello_cube(engine: &mut Engine, config: &CubeConfig) {
    let cube = build_box(engine.context(), "cube", config);
    engine.add(cube);
}
