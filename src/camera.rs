use glam::{
    Mat4,
    Vec3,
};

use crate::view::{
    LookAt,
    ViewTransform,
};

// default camera values, angles in degrees
pub const YAW : f32 = -90.0;
pub const PITCH : f32 = 0.0;
pub const SPEED : f32 = 2.5;
pub const SENSITIVITY : f32 = 0.1;
pub const ZOOM : f32 = 45.0;

/// pitch stays one degree short of vertical, at ±90° yaw stops affecting
/// the look direction
pub const PITCH_LIMIT : f32 = 89.0;

pub const MIN_ZOOM : f32 = 1.0;
pub const MAX_ZOOM : f32 = 45.0;

/// Keyboard-like movement, independent of any window system's key codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Whether mouse movement keeps pitch within ±[`PITCH_LIMIT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PitchConstraint {
    Clamped,
    /// the caller accepts degenerate basis vectors near ±90°
    Free,
}

impl Default for PitchConstraint {
    fn default() -> Self {
        PitchConstraint::Clamped
    }
}

/// Construction-time settings for a [`Camera`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub position : Vec3,
    pub world_up : Vec3,
    pub yaw : f32,
    pub pitch : f32,
    pub movement_speed : f32,
    pub mouse_sensitivity : f32,
    pub zoom : f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position : Vec3::ZERO,
            world_up : Vec3::Y,
            yaw : YAW,
            pitch : PITCH,
            movement_speed : SPEED,
            mouse_sensitivity : SENSITIVITY,
            zoom : ZOOM,
        }
    }
}

impl CameraConfig {
    pub fn with_position(mut self, position : Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_world_up(mut self, world_up : Vec3) -> Self {
        self.world_up = world_up;
        self
    }

    pub fn with_yaw(mut self, yaw : f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_pitch(mut self, pitch : f32) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_movement_speed(mut self, speed : f32) -> Self {
        self.movement_speed = speed;
        self
    }

    pub fn with_mouse_sensitivity(mut self, sensitivity : f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    pub fn with_zoom(mut self, zoom : f32) -> Self {
        self.zoom = zoom;
        self
    }
}

/// A first person camera driven by Euler angles.
///
/// The orientation angles are only mutated through the `process_*`
/// methods, which keep `front`, `right` and `up` in sync, so the basis
/// read back through the accessors is never stale.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position : Vec3,
    pub movement_speed : f32,
    pub mouse_sensitivity : f32,

    world_up : Vec3,

    // degrees
    yaw : f32,
    pitch : f32,
    zoom : f32,

    front : Vec3,
    right : Vec3,
    up : Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(CameraConfig::default())
    }
}

impl Camera {
    /// Camera with default speed, sensitivity and zoom.
    pub fn new(position : Vec3, world_up : Vec3, yaw : f32, pitch : f32) -> Self {
        Self::from_config(
            CameraConfig::default()
                .with_position(position)
                .with_world_up(world_up)
                .with_yaw(yaw)
                .with_pitch(pitch)
        )
    }

    pub fn from_config(config : CameraConfig) -> Self {
        let mut camera = Self {
            position : config.position,
            movement_speed : config.movement_speed,
            mouse_sensitivity : config.mouse_sensitivity,
            world_up : config.world_up.normalize(),
            yaw : config.yaw,
            pitch : config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            zoom : config.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            front : -Vec3::Z,
            right : Vec3::X,
            up : Vec3::Y,
        };

        camera.update_camera_vectors();
        camera
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// The point one unit ahead of the camera.
    pub fn target(&self) -> Vec3 {
        self.position + self.front
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix_with(&LookAt)
    }

    pub fn view_matrix_with<V>(&self, builder : &V) -> Mat4
    where
        V : ViewTransform + ?Sized
    {
        builder.view_matrix(self.position, self.front, self.up)
    }

    /// Walk-style movement: forward and backward follow `front` projected
    /// onto the horizontal plane, so looking up or down never changes
    /// height. Strafing follows the full `right` vector.
    pub fn process_keyboard(&mut self, direction : CameraMovement, delta_time : f32) {
        let velocity = self.movement_speed * delta_time;
        let walk = Vec3::new(self.front.x, 0.0, self.front.z);

        match direction {
            CameraMovement::Forward => self.position += walk * velocity,
            CameraMovement::Backward => self.position -= walk * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Mouse look with the default [`PitchConstraint::Clamped`].
    pub fn process_mouse_movement(&mut self, x_offset : f32, y_offset : f32) {
        self.process_mouse_movement_with(
            x_offset,
            y_offset,
            PitchConstraint::default(),
        );
    }

    pub fn process_mouse_movement_with(
        &mut self,
        x_offset : f32,
        y_offset : f32,
        constraint : PitchConstraint,
    ) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constraint == PitchConstraint::Clamped {
            let clamped = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            if clamped != self.pitch {
                log::trace!("pitch {} clamped to {}", self.pitch, clamped);
            }
            self.pitch = clamped;
        }

        self.update_camera_vectors();
    }

    /// Only the vertical wheel axis is used.
    pub fn process_mouse_scroll(&mut self, y_offset : f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_camera_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());

        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        ).normalize();

        // the cross products shrink as front approaches world_up, normalize
        // so strafing speed doesn't depend on pitch
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}
