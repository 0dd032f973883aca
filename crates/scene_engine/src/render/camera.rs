//! # FPS Camera
//!
//! First-person camera driven by keyboard and mouse, oriented with spherical
//! angles.
//!
//! ## Coordinate System
//! Right-handed, Y-up. The look direction is
//! `(sin α cos φ, cos α, sin α sin φ)` where `α` is the polar angle measured
//! from the up axis and `φ` the azimuth. With the defaults (`α = 90°`,
//! `φ = 0°`) the camera looks along +X.
//!
//! ## Change Notification
//! The camera announces itself through its [`EventProducer`] whenever an
//! [`update`](Camera::update) changed its pose, or on demand through
//! [`invoke`](Camera::invoke). Direct mutations through the `move_*` /
//! `rotate_*` methods only invalidate the cached view matrix.

use std::cell::Cell;

use crate::core::config::CameraConfig;
use crate::events::EventProducer;
use crate::foundation::math::{constants, utils, Mat4, Mat4Ext, Vec3};
use crate::input::{InputManager, KeyCode};

/// Margin keeping the polar angle away from the poles, where look-at degenerates
pub const POLAR_EPSILON: f32 = 1e-4;

/// Sprint multiplier applied while shift is held
const SPRINT_FACTOR: f32 = 2.0;

/// First-person camera
#[derive(Debug)]
pub struct Camera {
    position: Vec3,
    up: Vec3,
    alpha_rads: f32,
    phi_rads: f32,
    speed: f32,
    sensitivity: f32,
    view_cache: Cell<Option<Mat4>>,
    producer: EventProducer<Camera>,
}

impl Camera {
    /// Create a camera from its configuration
    ///
    /// # Arguments
    /// * `config` - initial position, angles (degrees), speed and mouse sensitivity
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            up: config.up,
            alpha_rads: utils::deg_to_rad(config.alpha_degrees)
                .clamp(POLAR_EPSILON, constants::PI - POLAR_EPSILON),
            phi_rads: utils::deg_to_rad(config.phi_degrees) % constants::TAU,
            speed: config.speed,
            sensitivity: config.sensitivity,
            view_cache: Cell::new(None),
            producer: EventProducer::new(),
        }
    }

    /// Current world position
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Up axis
    pub const fn up(&self) -> Vec3 {
        self.up
    }

    /// Polar angle from the up axis, in radians
    pub const fn alpha_rads(&self) -> f32 {
        self.alpha_rads
    }

    /// Azimuth, in radians
    pub const fn phi_rads(&self) -> f32 {
        self.phi_rads
    }

    /// Movement speed in units per second
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Unit look direction
    pub fn target(&self) -> Vec3 {
        let (sin_alpha, cos_alpha) = self.alpha_rads.sin_cos();
        let (sin_phi, cos_phi) = self.phi_rads.sin_cos();
        Vec3::new(sin_alpha * cos_phi, cos_alpha, sin_alpha * sin_phi)
    }

    /// World-to-view matrix, recomputed only after the pose changed
    pub fn view_matrix(&self) -> Mat4 {
        if let Some(view) = self.view_cache.get() {
            return view;
        }

        let view = Mat4::look_at(self.position, self.position + self.target(), self.up);
        self.view_cache.set(Some(view));
        log::trace!("Camera view matrix recomputed at {:?}", self.position);
        view
    }

    /// Whether a view matrix is cached for the current pose
    pub fn has_cached_view(&self) -> bool {
        self.view_cache.get().is_some()
    }

    fn invalidate(&mut self) {
        self.view_cache.set(None);
    }

    fn horizontal_target(&self) -> Option<Vec3> {
        let mut flat = self.target();
        flat.y = 0.0;
        flat.try_normalize(f32::EPSILON)
    }

    /// Teleport the camera
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.invalidate();
    }

    /// Move along the look direction projected onto the horizontal plane
    pub fn move_forward(&mut self, distance: f32) {
        if let Some(forward) = self.horizontal_target() {
            self.position += forward * distance;
            self.invalidate();
        }
    }

    /// Strafe perpendicular to the horizontal look direction
    pub fn move_right(&mut self, distance: f32) {
        if let Some(forward) = self.horizontal_target() {
            self.position += forward.cross(&self.up) * distance;
            self.invalidate();
        }
    }

    /// Move along the up axis
    pub fn move_up(&mut self, distance: f32) {
        self.position += self.up * distance;
        self.invalidate();
    }

    /// Tilt by `angle_degrees`; the polar angle stays inside `[ε, π − ε]`
    pub fn rotate_up(&mut self, angle_degrees: f32) {
        self.alpha_rads = (self.alpha_rads + utils::deg_to_rad(angle_degrees))
            .clamp(POLAR_EPSILON, constants::PI - POLAR_EPSILON);
        self.invalidate();
    }

    /// Turn by `angle_degrees`; the azimuth wraps modulo 2π
    pub fn rotate_right(&mut self, angle_degrees: f32) {
        self.phi_rads = (self.phi_rads + utils::deg_to_rad(angle_degrees)) % constants::TAU;
        self.invalidate();
    }

    /// Apply one frame of keyboard/mouse input
    ///
    /// W/S move forward/back, D/A strafe, E or Space rise and Q sinks. Shift
    /// doubles the speed. The mouse only rotates the camera in relative
    /// mouse mode. Returns whether the pose changed; a change is announced
    /// through the notify callback.
    pub fn update(&mut self, input: &InputManager, delta_time: f32) -> bool {
        let mut speed = self.speed;
        if input.is_key_pressed(KeyCode::LeftShift) {
            speed *= SPRINT_FACTOR;
        }
        let step = speed * delta_time;
        let mut changed = false;

        let axis = |positive: bool, negative: bool| -> f32 {
            match (positive, negative) {
                (true, false) => 1.0,
                (false, true) => -1.0,
                _ => 0.0,
            }
        };

        let forward = axis(input.is_key_pressed(KeyCode::W), input.is_key_pressed(KeyCode::S));
        let right = axis(input.is_key_pressed(KeyCode::D), input.is_key_pressed(KeyCode::A));
        let up = axis(
            input.is_key_pressed(KeyCode::E) || input.is_key_pressed(KeyCode::Space),
            input.is_key_pressed(KeyCode::Q),
        );

        if forward != 0.0 {
            self.move_forward(forward * step);
            changed = true;
        }
        if right != 0.0 {
            self.move_right(right * step);
            changed = true;
        }
        if up != 0.0 {
            self.move_up(up * step);
            changed = true;
        }

        if input.relative_mouse_mode() {
            let (dx, dy) = input.mouse_delta();
            if dx != 0.0 || dy != 0.0 {
                self.rotate_up(dy * self.sensitivity);
                self.rotate_right(dx * self.sensitivity);
                changed = true;
            }
        }

        if changed {
            self.invoke();
        }
        changed
    }

    /// Install the change callback
    pub fn set_notify_callback<F>(&mut self, callback: F)
    where
        F: Fn(&Self) + 'static,
    {
        self.producer.set_notify_callback(callback);
    }

    /// Announce the current state through the notify callback
    pub fn invoke(&self) {
        self.producer.notify(self);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}
