use learning_gl::{
    Camera,
    CameraConfig,
    CameraInput,
    CameraMovement,
    FrameClock,
    KeyBindings,
    PitchConstraint,
};

use learning_gl::camera::{
    MAX_ZOOM,
    MIN_ZOOM,
    PITCH_LIMIT,
};

use glam::Vec3;
use glutin::dpi::PhysicalPosition;
use glutin::event::{
    DeviceId,
    ElementState,
    KeyboardInput,
    ModifiersState,
    MouseScrollDelta,
    TouchPhase,
    VirtualKeyCode,
    WindowEvent,
};
use winit_input_helper::WinitInputHelper;

use std::time::{
    Duration,
    Instant,
};

#[test]
fn first_cursor_sample_far_from_origin() {
    let mut camera = Camera::from_config(
        CameraConfig::default().with_position(Vec3::new(0.0, 0.0, 3.0))
    );
    let before = camera.clone();
    let mut input = CameraInput::default();

    input.apply_cursor(&mut camera, 12345.0, -6789.0);

    assert_eq!(camera, before);
}

#[test]
fn reactivation_does_not_jump() {
    let mut camera = Camera::default();
    let mut input = CameraInput::default();

    input.apply_cursor(&mut camera, 100.0, 100.0);
    input.apply_cursor(&mut camera, 110.0, 100.0);
    let yaw = camera.yaw();

    // cursor released, moved far away, grabbed again
    input.cursor.reset();
    input.apply_cursor(&mut camera, 900.0, 20.0);

    assert_eq!(camera.yaw(), yaw);
}

#[test]
fn cursor_pitch_stays_clamped() {
    let mut camera = Camera::default();
    let mut input = CameraInput::default();

    let mut y = 0.0;
    for _ in 0..500 {
        // cursor keeps moving up the screen
        y -= 250.0;
        input.apply_cursor(&mut camera, 0.0, y);
        assert!(camera.pitch() <= PITCH_LIMIT);
        assert!(camera.pitch() >= -PITCH_LIMIT);
    }

    assert_eq!(camera.pitch(), PITCH_LIMIT);
}

#[test]
fn free_pitch_passes_through() {
    let mut camera = Camera::default();
    let mut input = CameraInput {
        pitch : PitchConstraint::Free,
        ..Default::default()
    };

    input.apply_cursor(&mut camera, 0.0, 0.0);
    input.apply_cursor(&mut camera, 0.0, -1000.0);

    assert!((camera.pitch() - 100.0).abs() < 1e-3);
}

#[test]
fn scroll_sequence_stays_in_range() {
    let mut camera = Camera::default();
    let input = CameraInput::default();

    for i in 0..100 {
        let offset = ((i * 29) % 23) as f32 - 11.0;
        input.apply_scroll(&mut camera, offset);

        assert!(camera.zoom() >= MIN_ZOOM);
        assert!(camera.zoom() <= MAX_ZOOM);
    }
}

#[test]
fn walking_a_frame_sequence() {
    let start = Instant::now();
    let mut clock = FrameClock::starting_at(start);
    let mut camera = Camera::new(Vec3::new(0.0, 1.5, 3.0), Vec3::Y, -90.0, 0.0);
    let mut input = CameraInput::default();

    // look up, height must not change while walking
    input.apply_cursor(&mut camera, 0.0, 0.0);
    input.apply_cursor(&mut camera, 0.0, -300.0);

    clock.tick_at(start);
    for frame in 1..=60 {
        let dt = clock.tick_at(start + Duration::from_millis(frame * 16));
        input.apply_keys(&mut camera, |key| key == VirtualKeyCode::W, dt);
    }

    assert_eq!(camera.position.y, 1.5);
    assert!(camera.position.z < 3.0);
    assert!(camera.position.x.abs() < 1e-4);
}

#[test]
fn rebinding_keys() {
    let mut bindings = KeyBindings::default();
    bindings.bind(VirtualKeyCode::Right, CameraMovement::Right);

    let input = CameraInput::new(bindings);
    let mut camera = Camera::default();

    input.apply_keys(&mut camera, |key| key == VirtualKeyCode::Right, 1.0);

    assert!(camera.position.abs_diff_eq(Vec3::new(2.5, 0.0, 0.0), 1e-5));
}

fn device() -> DeviceId {
    unsafe { DeviceId::dummy() }
}

#[allow(deprecated)]
fn cursor_moved(x : f64, y : f64) -> WindowEvent<'static> {
    WindowEvent::CursorMoved {
        device_id : device(),
        position : PhysicalPosition::new(x, y),
        modifiers : ModifiersState::empty(),
    }
}

#[allow(deprecated)]
fn key_pressed(key : VirtualKeyCode) -> WindowEvent<'static> {
    WindowEvent::KeyboardInput {
        device_id : device(),
        input : KeyboardInput {
            scancode : 0,
            state : ElementState::Pressed,
            virtual_keycode : Some(key),
            modifiers : ModifiersState::empty(),
        },
        is_synthetic : false,
    }
}

#[allow(deprecated)]
fn scrolled(lines : f32) -> WindowEvent<'static> {
    WindowEvent::MouseWheel {
        device_id : device(),
        delta : MouseScrollDelta::LineDelta(0.0, lines),
        phase : TouchPhase::Moved,
        modifiers : ModifiersState::empty(),
    }
}

fn frame(
    helper : &mut WinitInputHelper,
    input : &mut CameraInput,
    camera : &mut Camera,
    events : &[WindowEvent<'static>],
) {
    helper.step_with_window_events(events);
    input.apply(camera, helper, 1.0);
}

#[test]
fn focus_regain_does_not_jump() {
    let mut helper = WinitInputHelper::new();
    let mut input = CameraInput::default();
    let mut camera = Camera::default();

    frame(&mut helper, &mut input, &mut camera, &[
        WindowEvent::Focused(true),
        cursor_moved(100.0, 100.0),
    ]);
    frame(&mut helper, &mut input, &mut camera, &[cursor_moved(101.0, 100.0)]);

    let yaw = camera.yaw();
    let pitch = camera.pitch();
    assert!((yaw - (-89.9)).abs() < 1e-4);

    frame(&mut helper, &mut input, &mut camera, &[WindowEvent::Focused(false)]);
    assert!(!input.cursor.is_seeded());

    // cursor came back somewhere else entirely
    frame(&mut helper, &mut input, &mut camera, &[
        WindowEvent::Focused(true),
        cursor_moved(700.0, 500.0),
    ]);

    assert_eq!(camera.yaw(), yaw);
    assert_eq!(camera.pitch(), pitch);

    frame(&mut helper, &mut input, &mut camera, &[cursor_moved(710.0, 500.0)]);
    assert!((camera.yaw() - (yaw + 1.0)).abs() < 1e-4);
    assert_eq!(camera.pitch(), pitch);
}

#[test]
fn frame_applies_keys_then_cursor_then_scroll() {
    let mut helper = WinitInputHelper::new();
    let mut input = CameraInput::default();
    let mut camera = Camera::default();

    frame(&mut helper, &mut input, &mut camera, &[cursor_moved(0.0, 0.0)]);
    assert_eq!(camera, Camera::default());

    frame(&mut helper, &mut input, &mut camera, &[
        key_pressed(VirtualKeyCode::W),
        cursor_moved(100.0, 0.0),
        scrolled(3.0),
    ]);

    // moved along the old front, straight down -z
    assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, -2.5), 1e-5));
    assert!((camera.yaw() - (-80.0)).abs() < 1e-4);
    assert_eq!(camera.zoom(), 42.0);

    // W stays held, the cursor rests and the wheel is still
    let start = camera.position;
    frame(&mut helper, &mut input, &mut camera, &[]);

    let front = camera.front();
    let expected = start + Vec3::new(front.x, 0.0, front.z) * 2.5;
    assert!(camera.position.abs_diff_eq(expected, 1e-4));
    assert!((camera.yaw() - (-80.0)).abs() < 1e-4);
    assert_eq!(camera.zoom(), 42.0);
}
