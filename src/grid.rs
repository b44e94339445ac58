//! Square line grid on the XZ plane.
//!
//! Lines are drawn as thin instanced cylinders with unlit materials, one
//! instanced mesh per color.

use three_d::*;

use crate::config::GridConfig;
use crate::scene::hex_to_srgba;

/// One straight grid line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub start: Vec3,
    pub end: Vec3,
    /// Lines through the origin are drawn in the center color
    pub center: bool,
}

impl GridLine {
    /// Transformation taking `CpuMesh::cylinder` (unit length along +X, unit
    /// radius) onto this line.
    pub fn transformation(&self, radius: f32) -> Mat4 {
        let direction = self.end - self.start;
        let length = direction.magnitude();
        Mat4::from_translation(self.start)
            * Mat4::from(Quat::from_arc(vec3(1.0, 0.0, 0.0), direction / length, None))
            * Mat4::from_nonuniform_scale(length, radius, radius)
    }
}

/// Layout of a `size` x `size` grid centered on the origin with `divisions`
/// cells per side.
///
/// Yields `divisions + 1` lines parallel to X followed by as many parallel to
/// Z. Only an even division count has a line through the origin.
pub fn grid_lines(size: f32, divisions: u32) -> Vec<GridLine> {
    if divisions == 0 {
        return Vec::new();
    }

    let half = size * 0.5;
    let step = size / divisions as f32;
    let is_center = |i: u32| divisions % 2 == 0 && i == divisions / 2;

    let mut lines = Vec::with_capacity(2 * (divisions as usize + 1));
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        lines.push(GridLine {
            start: vec3(-half, 0.0, k),
            end: vec3(half, 0.0, k),
            center: is_center(i),
        });
    }
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        lines.push(GridLine {
            start: vec3(k, 0.0, -half),
            end: vec3(k, 0.0, half),
            center: is_center(i),
        });
    }
    lines
}

pub struct Grid {
    lines: Gm<InstancedMesh, ColorMaterial>,
    center: Option<Gm<InstancedMesh, ColorMaterial>>,
}

impl Grid {
    pub fn new(context: &Context, config: &GridConfig) -> Self {
        let layout = grid_lines(config.size, config.divisions);
        let line_count = layout.len();
        let (center, regular): (Vec<GridLine>, Vec<GridLine>) =
            layout.into_iter().partition(|l| l.center);

        let lines = Self::build(context, &regular, config.line_width, config.line_color);
        let center = (!center.is_empty())
            .then(|| Self::build(context, &center, config.line_width, config.center_color));

        log::debug!(
            "grid: {} lines, size {}, {} divisions",
            line_count,
            config.size,
            config.divisions
        );

        Self { lines, center }
    }

    fn build(
        context: &Context,
        lines: &[GridLine],
        radius: f32,
        color: u32,
    ) -> Gm<InstancedMesh, ColorMaterial> {
        let instances = Instances {
            transformations: lines.iter().map(|l| l.transformation(radius)).collect(),
            ..Default::default()
        };
        Gm::new(
            InstancedMesh::new(context, &instances, &CpuMesh::cylinder(8)),
            ColorMaterial::new_opaque(
                context,
                &CpuMaterial {
                    albedo: hex_to_srgba(color),
                    ..Default::default()
                },
            ),
        )
    }

    pub fn objects(&self) -> impl Iterator<Item = &dyn Object> {
        std::iter::once(&self.lines as &dyn Object)
            .chain(self.center.as_ref().map(|c| c as &dyn Object))
    }
}
