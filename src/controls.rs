//! Orbit controls with optional damping
//!
//! Controls:
//! - Left drag: orbit around the target
//! - Wheel: zoom towards the target
//!
//! Input is accumulated into pending motion. Each [`OrbitControl::update`]
//! applies it to the camera: all at once without damping, or a
//! `damping_factor` share per frame (the rest decaying) with damping, so the
//! camera glides to a stop after the pointer is released.
//!
//! Both motions scale with the distance to the target, so a drag or a wheel
//! notch feels the same close up and far away.

use three_d::*;

use crate::config::ControlsConfig;

/// Pending motion below this is dropped.
const REST_EPSILON: f32 = 1e-4;

/// Logical pixels three-d reports for one wheel notch.
pub const WHEEL_NOTCH: f32 = 24.0;

/// Orbit offset per dragged pixel, as a fraction of the target distance.
const ORBIT_PER_PIXEL: f32 = 0.01;

/// The parts of a pointer event the controls act on.
#[derive(Debug)]
pub enum PointerInput<'a> {
    Drag {
        button: Option<MouseButton>,
        delta: (f32, f32),
        handled: &'a mut bool,
    },
    Wheel {
        delta: (f32, f32),
        handled: &'a mut bool,
    },
}

impl<'a> PointerInput<'a> {
    pub fn from_event(event: &'a mut Event) -> Option<Self> {
        match event {
            Event::MouseMotion {
                button,
                delta,
                handled,
                ..
            } => Some(PointerInput::Drag {
                button: *button,
                delta: *delta,
                handled,
            }),
            Event::MouseWheel { delta, handled, .. } => Some(PointerInput::Wheel {
                delta: *delta,
                handled,
            }),
            _ => None,
        }
    }
}

pub struct OrbitControl {
    target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,

    pending_orbit: (f32, f32),
    pending_zoom: f32,

    // Configuration
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl OrbitControl {
    pub fn new(target: Vec3, min_distance: f32, max_distance: f32) -> Self {
        Self {
            target,
            min_distance,
            max_distance,
            pending_orbit: (0.0, 0.0),
            pending_zoom: 0.0,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 0.1,
        }
    }

    pub fn from_config(target: Vec3, config: &ControlsConfig) -> Self {
        Self::new(target, config.min_distance, config.max_distance)
            .with_damping(config.enable_damping, config.damping_factor)
            .with_rotate_speed(config.rotate_speed)
            .with_zoom_speed(config.zoom_speed)
    }

    /// Builder: enable or disable damping with the given per-frame factor
    pub fn with_damping(mut self, enabled: bool, factor: f32) -> Self {
        self.enable_damping = enabled;
        self.damping_factor = factor.clamp(f32::EPSILON, 1.0);
        self
    }

    /// Builder: set orbit speed (1.0 moves 1% of the target distance per pixel)
    pub fn with_rotate_speed(mut self, speed: f32) -> Self {
        self.rotate_speed = speed;
        self
    }

    /// Builder: set zoom speed (fraction of the target distance per wheel notch)
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Whether motion is still waiting to be applied.
    pub fn is_moving(&self) -> bool {
        self.pending_orbit != (0.0, 0.0) || self.pending_zoom != 0.0
    }

    /// Queue an orbit by a pointer delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.pending_orbit.0 += dx * self.rotate_speed;
        self.pending_orbit.1 += dy * self.rotate_speed;
    }

    /// Queue a zoom by a wheel delta in pixels; positive moves towards the
    /// target.
    pub fn zoom(&mut self, delta: f32) {
        self.pending_zoom += delta / WHEEL_NOTCH * self.zoom_speed;
    }

    /// Accumulate motion from this frame's events, marking the ones used as
    /// handled. Returns whether any event was consumed.
    pub fn handle_events(&mut self, events: &mut [Event]) -> bool {
        let mut consumed = false;
        for event in events.iter_mut() {
            if let Some(input) = PointerInput::from_event(event) {
                consumed |= self.handle_input(input);
            }
        }
        consumed
    }

    /// Left drags orbit and the vertical wheel zooms. Events someone else
    /// already handled are left alone.
    pub fn handle_input(&mut self, input: PointerInput) -> bool {
        match input {
            PointerInput::Drag {
                button: Some(MouseButton::Left),
                delta,
                handled,
            } if !*handled => {
                self.orbit(delta.0, delta.1);
                *handled = true;
                true
            }
            PointerInput::Wheel { delta, handled } if !*handled => {
                self.zoom(delta.1);
                *handled = true;
                true
            }
            _ => false,
        }
    }

    /// Take the share of pending motion to apply this frame as
    /// `(orbit_x, orbit_y, zoom)`.
    pub fn step(&mut self) -> (f32, f32, f32) {
        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        let step = (
            self.pending_orbit.0 * factor,
            self.pending_orbit.1 * factor,
            self.pending_zoom * factor,
        );
        self.pending_orbit.0 -= step.0;
        self.pending_orbit.1 -= step.1;
        self.pending_zoom -= step.2;

        if self.pending_orbit.0.abs() < REST_EPSILON {
            self.pending_orbit.0 = 0.0;
        }
        if self.pending_orbit.1.abs() < REST_EPSILON {
            self.pending_orbit.1 = 0.0;
        }
        if self.pending_zoom.abs() < REST_EPSILON {
            self.pending_zoom = 0.0;
        }
        step
    }

    /// Move the camera by this frame's share of pending motion.
    ///
    /// Returns whether the camera changed.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.is_moving() {
            return false;
        }
        let (x, y, zoom) = self.step();
        let distance = self.target.distance(*camera.position());
        if x != 0.0 || y != 0.0 {
            let scale = ORBIT_PER_PIXEL * distance;
            camera.rotate_around_with_fixed_up(&self.target, x * scale, y * scale);
        }
        if zoom != 0.0 {
            camera.zoom_towards(
                &self.target,
                zoom * distance,
                self.min_distance,
                self.max_distance,
            );
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new_perspective(
            Viewport::new_at_origo(800, 600),
            vec3(5.0, 5.0, 5.0),
            vec3(0.0, 0.0, 0.0),
            vec3(0.0, 1.0, 0.0),
            degrees(75.0),
            0.1,
            1000.0,
        )
    }

    fn distance(camera: &Camera) -> f32 {
        camera.position().magnitude()
    }

    fn default_control() -> OrbitControl {
        OrbitControl::from_config(vec3(0.0, 0.0, 0.0), &ControlsConfig::default())
    }

    fn settle(control: &mut OrbitControl, camera: &mut Camera) {
        for _ in 0..300 {
            control.update(camera);
        }
    }

    fn drag(button: Option<MouseButton>, delta: (f32, f32), handled: &mut bool) -> PointerInput<'_> {
        PointerInput::Drag {
            button,
            delta,
            handled,
        }
    }

    #[test]
    fn test_from_config() {
        let config = ControlsConfig::default();
        let control = OrbitControl::from_config(vec3(1.0, 2.0, 3.0), &config);
        assert_eq!(control.target(), vec3(1.0, 2.0, 3.0));
        assert!(control.enable_damping);
        assert_eq!(control.damping_factor, config.damping_factor);
        assert_eq!(control.min_distance, config.min_distance);
    }

    #[test]
    fn test_undamped_applies_everything_at_once() {
        let mut control = OrbitControl::new(vec3(0.0, 0.0, 0.0), 0.5, 100.0).with_rotate_speed(1.0);
        control.orbit(4.0, -2.0);

        let (x, y, zoom) = control.step();
        assert_eq!((x, y, zoom), (4.0, -2.0, 0.0));
        assert!(!control.is_moving());
    }

    #[test]
    fn test_damped_applies_a_share_per_frame() {
        let mut control = OrbitControl::new(vec3(0.0, 0.0, 0.0), 0.5, 100.0)
            .with_rotate_speed(1.0)
            .with_damping(true, 0.05);
        control.orbit(10.0, 0.0);

        let (x, _, _) = control.step();
        assert_relative_eq!(x, 0.5, epsilon = 1e-6);
        let (x, _, _) = control.step();
        assert_relative_eq!(x, 0.475, epsilon = 1e-6);
        assert!(control.is_moving());
    }

    #[test]
    fn test_damped_motion_comes_to_rest() {
        let mut control = OrbitControl::new(vec3(0.0, 0.0, 0.0), 0.5, 100.0)
            .with_rotate_speed(1.0)
            .with_damping(true, 0.05);
        control.orbit(10.0, 0.0);

        let mut total = 0.0;
        for _ in 0..1000 {
            total += control.step().0;
        }
        assert!(!control.is_moving());
        assert_relative_eq!(total, 10.0, epsilon = 1e-2);
    }

    #[test]
    fn test_damping_factor_is_clamped() {
        let control = OrbitControl::new(vec3(0.0, 0.0, 0.0), 0.5, 100.0).with_damping(true, 3.0);
        assert_eq!(control.damping_factor, 1.0);
    }

    #[test]
    fn test_idle_update_leaves_camera() {
        let mut control = OrbitControl::new(vec3(0.0, 0.0, 0.0), 0.5, 100.0);
        let mut camera = camera();
        let before = *camera.position();

        assert!(!control.update(&mut camera));
        assert_eq!(*camera.position(), before);
    }

    #[test]
    fn test_orbit_keeps_distance_to_target() {
        let mut control = OrbitControl::new(vec3(0.0, 0.0, 0.0), 0.5, 100.0);
        let mut camera = camera();
        let before = distance(&camera);

        control.orbit(30.0, 10.0);
        assert!(control.update(&mut camera));

        assert_relative_eq!(distance(&camera), before, epsilon = 1e-3);
        assert_ne!(*camera.position(), vec3(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_short_drag_orbits_a_few_degrees() {
        let mut control = default_control();
        let mut camera = camera();
        let before = camera.position().normalize();

        let mut handled = false;
        assert!(control.handle_input(drag(Some(MouseButton::Left), (10.0, 0.0), &mut handled)));
        settle(&mut control, &mut camera);

        let after = camera.position().normalize();
        let turned = before.dot(after).clamp(-1.0, 1.0).acos().to_degrees();
        assert!(turned > 1.0 && turned < 10.0, "10px drag turned {turned} degrees");
    }

    #[test]
    fn test_one_wheel_notch_zooms_a_fraction_of_the_distance() {
        let mut control = default_control();
        let mut camera = camera();
        let before = distance(&camera);

        let mut handled = false;
        assert!(control.handle_input(PointerInput::Wheel {
            delta: (0.0, WHEEL_NOTCH),
            handled: &mut handled,
        }));
        assert!(handled);
        settle(&mut control, &mut camera);

        let ratio = distance(&camera) / before;
        assert!(ratio > 0.85 && ratio < 0.95, "one notch scaled distance by {ratio}");
        assert!(!control.is_moving());
    }

    #[test]
    fn test_wheel_out_moves_away() {
        let mut control = default_control();
        let mut camera = camera();
        let before = distance(&camera);

        control.zoom(-WHEEL_NOTCH);
        settle(&mut control, &mut camera);
        assert!(distance(&camera) > before);
    }

    #[test]
    fn test_zoom_is_clamped_to_min_distance() {
        let mut control = OrbitControl::new(vec3(0.0, 0.0, 0.0), 2.0, 100.0);
        let mut camera = camera();

        control.zoom(1000.0 * WHEEL_NOTCH);
        control.update(&mut camera);
        assert!(distance(&camera) >= 2.0 - 1e-3);
    }

    #[test]
    fn test_left_drag_queues_orbit_and_marks_handled() {
        let mut control = default_control();
        let mut handled = false;

        assert!(control.handle_input(drag(Some(MouseButton::Left), (5.0, 2.0), &mut handled)));
        assert!(handled);
        assert!(control.is_moving());
    }

    #[test]
    fn test_other_buttons_and_hover_are_ignored() {
        let mut control = default_control();

        for button in [None, Some(MouseButton::Right), Some(MouseButton::Middle)] {
            let mut handled = false;
            assert!(!control.handle_input(drag(button, (5.0, 2.0), &mut handled)));
            assert!(!handled);
        }
        assert!(!control.is_moving());
    }

    #[test]
    fn test_handled_input_is_left_alone() {
        let mut control = default_control();

        let mut handled = true;
        assert!(!control.handle_input(drag(Some(MouseButton::Left), (5.0, 2.0), &mut handled)));
        let mut handled = true;
        assert!(!control.handle_input(PointerInput::Wheel {
            delta: (0.0, WHEEL_NOTCH),
            handled: &mut handled,
        }));
        assert!(!control.is_moving());
    }

    #[test]
    fn test_non_pointer_events_are_skipped() {
        let mut control = default_control();
        let mut events = vec![
            Event::MouseEnter,
            Event::MouseLeave,
            Event::Text("a".to_string()),
            Event::ModifiersChange {
                modifiers: Modifiers::default(),
            },
        ];

        assert!(!control.handle_events(&mut events));
        assert!(!control.is_moving());
        for event in events.iter_mut() {
            assert!(PointerInput::from_event(event).is_none());
        }
    }
}
