use glam::Vec2;
use glutin::event::VirtualKeyCode;
use winit_input_helper::WinitInputHelper;

use crate::camera::{
    Camera,
    CameraMovement,
    PitchConstraint,
};

/// Turns absolute cursor samples into offsets.
///
/// The first sample after creation or [`reset`](Self::reset) only seeds
/// the tracker and yields no offset, an unseeded previous position would
/// otherwise show up as a large jump.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorTracker {
    last : Option<Vec2>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window y grows downward, so the y offset is reversed to make
    /// moving the cursor up pitch the camera up.
    pub fn offset(&mut self, x : f32, y : f32) -> Vec2 {
        let current = Vec2::new(x, y);

        let offset = match self.last {
            Some(last) => Vec2::new(current.x - last.x, last.y - current.y),
            None => Vec2::ZERO,
        };

        self.last = Some(current);
        offset
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn is_seeded(&self) -> bool {
        self.last.is_some()
    }
}

/// Key to movement mapping, WASD by default.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyBindings {
    bindings : Vec<(VirtualKeyCode, CameraMovement)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(vec![
            (VirtualKeyCode::W, CameraMovement::Forward),
            (VirtualKeyCode::S, CameraMovement::Backward),
            (VirtualKeyCode::A, CameraMovement::Left),
            (VirtualKeyCode::D, CameraMovement::Right),
        ])
    }
}

impl KeyBindings {
    pub fn new(bindings : Vec<(VirtualKeyCode, CameraMovement)>) -> Self {
        Self { bindings }
    }

    /// Binds `key`, replacing any earlier binding of the same key.
    pub fn bind(&mut self, key : VirtualKeyCode, movement : CameraMovement) {
        match self.bindings.iter_mut().find(|(k, _)| *k == key) {
            Some(binding) => binding.1 = movement,
            None => self.bindings.push((key, movement)),
        }
    }

    pub fn movement(&self, key : VirtualKeyCode) -> Option<CameraMovement> {
        self.bindings.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, m)| *m)
    }

    /// Movements whose key `held` reports down, in binding order.
    pub fn movements<'a, F>(
        &'a self,
        held : F,
    ) -> impl Iterator<Item = CameraMovement> + 'a
    where
        F : Fn(VirtualKeyCode) -> bool + 'a
    {
        self.bindings.iter()
            .filter(move |(key, _)| held(*key))
            .map(|(_, movement)| *movement)
    }
}

/// Routes polled window input into a [`Camera`].
#[derive(Clone, Debug, Default)]
pub struct CameraInput {
    pub cursor : CursorTracker,
    pub bindings : KeyBindings,
    pub pitch : PitchConstraint,
}

impl CameraInput {
    pub fn new(bindings : KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Applies one frame of input. Keys first, then the cursor, then the
    /// scroll wheel; build the frame's view matrix after this returns.
    ///
    /// A frame without a cursor position, as while the window is unfocused,
    /// re-arms seeding so the next sample yields no offset.
    pub fn apply(
        &mut self,
        camera : &mut Camera,
        input : &WinitInputHelper,
        delta_time : f32,
    ) {
        self.apply_keys(camera, |key| input.key_held(key), delta_time);

        match input.mouse() {
            Some((x, y)) => self.apply_cursor(camera, x, y),
            None => self.cursor.reset(),
        }

        self.apply_scroll(camera, input.scroll_diff());
    }

    pub fn apply_keys<F>(&self, camera : &mut Camera, held : F, delta_time : f32)
    where
        F : Fn(VirtualKeyCode) -> bool
    {
        for movement in self.bindings.movements(held) {
            camera.process_keyboard(movement, delta_time);
        }
    }

    pub fn apply_cursor(&mut self, camera : &mut Camera, x : f32, y : f32) {
        let offset = self.cursor.offset(x, y);
        camera.process_mouse_movement_with(offset.x, offset.y, self.pitch);
    }

    pub fn apply_scroll(&self, camera : &mut Camera, y_offset : f32) {
        if y_offset != 0.0 {
            camera.process_mouse_scroll(y_offset);
        }
    }
}
