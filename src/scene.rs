use three_d::*;

use crate::config::{CubeConfig, GroundConfig};

/// A lit mesh attached to the engine's scene.
pub struct SceneObject {
    pub name: String,
    pub model: Gm<Mesh, PhysicalMaterial>,
    /// Whether the mesh contributes to the directional light's shadow map
    pub cast_shadow: bool,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, model: Gm<Mesh, PhysicalMaterial>) -> Self {
        Self {
            name: name.into(),
            model,
            cast_shadow: false,
        }
    }

    pub fn with_cast_shadow(mut self, cast_shadow: bool) -> Self {
        self.cast_shadow = cast_shadow;
        self
    }
}

/// Flat, insertion-ordered collection of everything the engine lights and draws.
#[derive(Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn shadow_casters(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.cast_shadow)
    }
}

/// Convert a `0xRRGGBB` integer into an opaque color.
pub fn hex_to_srgba(hex: u32) -> Srgba {
    Srgba::new_opaque(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

/// `[r, g, b]` channels in `0..=1`, the form `ClearState` expects.
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    let c = hex_to_srgba(hex);
    [c.r as f32 / 255.0, c.g as f32 / 255.0, c.b as f32 / 255.0]
}

pub fn to_vec3(v: [f32; 3]) -> Vec3 {
    vec3(v[0], v[1], v[2])
}

/// Transformation taking `CpuMesh::square()` (2x2 in XY, facing +Z) to a
/// horizontal `width` x `depth` plane at height `y`, facing +Y.
pub fn plane_transform(width: f32, depth: f32, y: f32) -> Mat4 {
    Mat4::from_translation(vec3(0.0, y, 0.0))
        * Mat4::from_angle_x(radians(-std::f32::consts::FRAC_PI_2))
        * Mat4::from_nonuniform_scale(width * 0.5, depth * 0.5, 1.0)
}

/// Transformation taking `CpuMesh::cube()` (2x2x2 around the origin) to a
/// box with the given edge lengths centered at `position`.
pub fn box_transform(size: [f32; 3], position: [f32; 3]) -> Mat4 {
    Mat4::from_translation(to_vec3(position))
        * Mat4::from_nonuniform_scale(size[0] * 0.5, size[1] * 0.5, size[2] * 0.5)
}

/// The ground plane. Rendered double-sided; it receives the directional
/// light's shadows but does not cast any.
pub fn build_ground(context: &Context, config: &GroundConfig) -> SceneObject {
    let mut mesh = Mesh::new(context, &CpuMesh::square());
    mesh.set_transformation(plane_transform(config.width, config.depth, config.y));

    let mut material = PhysicalMaterial::new_opaque(
        context,
        &CpuMaterial {
            albedo: hex_to_srgba(config.color),
            ..Default::default()
        },
    );
    material.render_states.cull = Cull::None;

    SceneObject::new("ground", Gm::new(mesh, material))
}

/// A solid box with a standard material.
pub fn build_box(context: &Context, name: &str, config: &CubeConfig) -> SceneObject {
    let mut mesh = Mesh::new(context, &CpuMesh::cube());
    mesh.set_transformation(box_transform(config.size, config.position));

    let material = PhysicalMaterial::new_opaque(
        context,
        &CpuMaterial {
            albedo: hex_to_srgba(config.color),
            ..Default::default()
        },
    );

    SceneObject::new(name, Gm::new(mesh, material)).with_cast_shadow(config.cast_shadow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn apply(m: Mat4, p: Vec3) -> Vec3 {
        let v = m * p.extend(1.0);
        vec3(v.x, v.y, v.z)
    }

    #[test]
    fn test_hex_to_srgba() {
        let c = hex_to_srgba(0x1E90FF);
        assert_eq!((c.r, c.g, c.b, c.a), (0x1E, 0x90, 0xFF, 255));

        let c = hex_to_srgba(0x404040);
        assert_eq!((c.r, c.g, c.b), (64, 64, 64));
    }

    #[test]
    fn test_hex_ignores_high_byte() {
        let c = hex_to_srgba(0xAA_11_22_33);
        assert_eq!((c.r, c.g, c.b), (0x11, 0x22, 0x33));
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb(0x000000), [0.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb(0xffffff), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_plane_is_horizontal() {
        let m = plane_transform(10.0, 6.0, 0.0);

        let corner = apply(m, vec3(1.0, 1.0, 0.0));
        assert_relative_eq!(corner.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(corner.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(corner.z, -3.0, epsilon = 1e-5);

        // Square normal (+Z) ends up pointing up
        let n = m * vec4(0.0, 0.0, 1.0, 0.0);
        assert_relative_eq!(n.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(n.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(n.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_plane_height() {
        let m = plane_transform(10.0, 10.0, 2.5);
        let center = apply(m, vec3(0.0, 0.0, 0.0));
        assert_relative_eq!(center.y, 2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_unit_box_rests_on_ground() {
        let config = CubeConfig::default();
        let m = box_transform(config.size, config.position);

        let bottom = apply(m, vec3(-1.0, -1.0, -1.0));
        let top = apply(m, vec3(1.0, 1.0, 1.0));
        assert_relative_eq!(bottom.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(top.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(top.x - bottom.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(top.z - bottom.z, 1.0, epsilon = 1e-5);
    }
}
