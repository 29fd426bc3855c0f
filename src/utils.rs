use crate::error::{
    Error,
    Result,
};

pub(crate) type GlutinContext = glutin::ContextWrapper<
    glutin::PossiblyCurrent,
    glutin::window::Window
>;

pub const TITLE : &str = "LearnOpenGL";
pub const WIDTH : f64 = 800.0;
pub const HEIGHT : f64 = 600.0;

pub fn create_display(
    event_loop : &glutin::event_loop::EventLoop<()>,
) -> Result<(GlutinContext, glow::Context)> {
    let window_builder = glutin::window::WindowBuilder::new()
        .with_title(TITLE)
        .with_resizable(true)
        .with_inner_size(glutin::dpi::LogicalSize {
            width : WIDTH,
            height : HEIGHT,
        });

    let gl_window = unsafe {
        glutin::ContextBuilder::new()
            .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (3, 3)))
            .with_gl_profile(glutin::GlProfile::Core)
            .with_depth_buffer(24)
            .with_srgb(true)
            .with_stencil_buffer(0)
            .with_vsync(true)
            .build_windowed(window_builder, event_loop)
            .map_err(|e| Error::Context(e.to_string()))?
            .make_current()
            .map_err(|(_, e)| Error::Context(e.to_string()))?
    };

    let gl = unsafe {
        glow::Context::from_loader_function(|s| {
            gl_window.get_proc_address(s)
        })
    };

    Ok((gl_window, gl))
}

/// Hides the cursor and keeps it in the window for mouse look. Not every
/// platform supports grabbing, that only gets logged.
pub fn grab_cursor(window : &glutin::window::Window, grab : bool) {
    if let Err(e) = window.set_cursor_grab(grab) {
        log::warn!("cursor grab not available: {}", e);
    }

    window.set_cursor_visible(!grab);
}
