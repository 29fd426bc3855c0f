pub mod camera;
pub mod error;
pub mod frame;
pub mod input;
pub mod mesh;
pub mod program;
pub mod utils;
pub mod view;

pub use camera::{
    Camera,
    CameraConfig,
    CameraMovement,
    PitchConstraint,
};

pub use error::{
    Error,
    Result,
};

pub use frame::FrameClock;

pub use input::{
    CameraInput,
    CursorTracker,
    KeyBindings,
};

pub use view::{
    BasisMatrix,
    LookAt,
    ViewForm,
    ViewTransform,
};

use mesh::{
    LoadedMesh,
    Mesh,
};

use program::{
    LoadedProg,
    UniformSetter,
    Uniforms,
};

use utils::{
    create_display,
    GlutinContext,
};

use std::path::Path;

use glow::HasContext;

pub struct GraphicsContext {
    gl : glow::Context,
    gl_window : GlutinContext,
    egui : egui_glow::EguiGlow,
}

impl GraphicsContext {
    pub fn render_egui<T>(
        &mut self,
        mut f : impl FnMut(&egui::CtxRef) -> T
    ) -> T {
        self.egui.begin_frame(self.gl_window.window());

        let ret = (f)(self.egui.ctx());

        let (needs_repaint, shapes) = self.egui.end_frame(
            self.gl_window.window()
        );

        if needs_repaint {
            self.gl_window.window().request_redraw();
        }

        self.egui.paint(&self.gl_window, &self.gl, shapes);

        ret
    }

    pub fn window(&self) -> &glutin::window::Window {
        self.gl_window.window()
    }

    pub fn request_redraw(&self) {
        self.window().request_redraw();
    }

    pub fn grab_cursor(&self, grab : bool) {
        utils::grab_cursor(self.window(), grab);
    }

    pub fn aspect(&self) -> f32 {
        let (width, height) = self.physical_size();
        if height == 0 {
            return 1.0;
        }

        (width as f32) / (height as f32)
    }

    pub fn physical_size(&self) -> (u32, u32) {
        let size = self.window().inner_size();

        (size.width, size.height)
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.gl_window.swap_buffers()
            .map_err(|e| Error::Context(e.to_string()))
    }

    pub fn load_mesh(&self, mesh : &Mesh) -> Result<LoadedMesh> {
        let vao;
        let position_vbo;
        let tex_coord_vbo;

        unsafe {
            vao = self.gl.create_vertex_array().map_err(Error::Gl)?;
            self.gl.bind_vertex_array(Some(vao));
        }

        check_error(&self.gl)?;

        // positions, location 0
        unsafe {
            position_vbo = self.gl.create_buffer().map_err(Error::Gl)?;
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(position_vbo));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&mesh.positions),
                glow::STATIC_DRAW,
            );
            self.gl.enable_vertex_attrib_array(0);
            self.gl.vertex_attrib_pointer_f32(
                0,
                3,
                glow::FLOAT,
                false,
                0,
                0,
            );
        }

        // texture coordinates, location 1
        unsafe {
            tex_coord_vbo = self.gl.create_buffer().map_err(Error::Gl)?;
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(tex_coord_vbo));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&mesh.tex_coords),
                glow::STATIC_DRAW,
            );
            self.gl.enable_vertex_attrib_array(1);
            self.gl.vertex_attrib_pointer_f32(
                1,
                2,
                glow::FLOAT,
                false,
                0,
                0,
            );
        }

        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.bind_vertex_array(None);
        }

        check_error(&self.gl)?;

        Ok(LoadedMesh{
            vao, position_vbo, tex_coord_vbo,
            count : mesh.len(),
        })
    }

    pub fn unload_mesh(&self, mesh : LoadedMesh) {
        unsafe {
            self.gl.delete_vertex_array(mesh.vao);
            self.gl.delete_buffer(mesh.position_vbo);
            self.gl.delete_buffer(mesh.tex_coord_vbo);
        }
    }

    pub fn load_program(
        &self,
        vert_src : &str,
        frag_src : &str,
    ) -> Result<LoadedProg> {
        let vert = program::compile_shader(
            &self.gl,
            error::Stage::Vertex,
            vert_src,
        )?;

        let frag = match program::compile_shader(
            &self.gl,
            error::Stage::Fragment,
            frag_src,
        ) {
            Ok(v) => v,
            Err(e) => {
                unsafe { self.gl.delete_shader(vert) };
                return Err(e);
            }
        };

        let prog = program::link_program(&self.gl, vert, frag)?;
        log::info!("linked program with {} uniforms", prog.active_uniforms.len());

        Ok(prog)
    }

    pub fn unload_program(
        &self,
        prog : &LoadedProg,
    ) {
        unsafe {
            self.gl.delete_program(prog.prog);
        }
    }

    /// Decodes an image file and uploads it, flipped so the first row is
    /// the bottom of the texture as OpenGL expects.
    pub fn load_texture(&self, path : impl AsRef<Path>) -> Result<glow::Texture> {
        let path = path.as_ref();
        let img = image::open(path)?.flipv().into_rgba8();

        log::info!(
            "loaded texture {} ({}x{})",
            path.display(),
            img.width(),
            img.height(),
        );

        self.texture_2d_image(&img)
    }

    fn set_texture_parameters(&self) {
        unsafe {
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::REPEAT as i32,
            );

            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::REPEAT as i32,
            );

            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );

            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
        }
    }

    pub fn texture_2d_image(
        &self,
        img : &image::RgbaImage,
    ) -> Result<glow::Texture> {
        unsafe {
            let tex = self.gl.create_texture().map_err(Error::Gl)?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(tex));

            self.set_texture_parameters();

            self.gl.tex_image_2d(
                glow::TEXTURE_2D, // target
                0, // level
                glow::RGBA as i32, // internalformat
                img.width() as i32,
                img.height() as i32,
                0, // border
                glow::RGBA, // format
                glow::UNSIGNED_BYTE, // type
                Some(img.as_raw()), // data
            );

            self.gl.generate_mipmap(glow::TEXTURE_2D);
            self.gl.bind_texture(glow::TEXTURE_2D, None);

            check_error(&self.gl)?;

            Ok(tex)
        }
    }

    pub fn bind_texture(&self, unit : u32, tex : Option<glow::Texture>) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, tex);
        }
    }

    pub fn unload_texture(&self, tex : glow::Texture) {
        unsafe {
            self.gl.delete_texture(tex);
        }
    }

    pub fn clear(&self, r : f32, g : f32, b : f32, a : f32) {
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    /// major, minor
    pub fn gl_version(&self) -> (i32, i32) {
        unsafe {
            let major = self.gl.get_parameter_i32(
                glow::MAJOR_VERSION,
            );

            let minor = self.gl.get_parameter_i32(
                glow::MINOR_VERSION,
            );

            (major, minor)
        }
    }

    /// Binds `prog`, sets `uniforms` and draws every vertex of `mesh`.
    pub fn draw_mesh<U>(
        &self,
        prog : &LoadedProg,
        mesh : &LoadedMesh,
        uniforms : &U,
    ) -> Result<()>
    where
        U : Uniforms + ?Sized,
    {
        unsafe {
            self.gl.use_program(Some(prog.prog));
            self.gl.enable(glow::DEPTH_TEST);

            let (w, h) = self.physical_size();
            self.gl.viewport(0, 0, w as i32, h as i32);
        }

        uniforms.set_uniforms(&mut UniformSetter{
            gl : &self.gl,
            prog,
        })?;

        unsafe {
            self.gl.bind_vertex_array(Some(mesh.vao));
            self.gl.draw_arrays(glow::TRIANGLES, 0, mesh.count as i32);

            self.gl.bind_vertex_array(None);
            self.gl.use_program(None);
            self.gl.disable(glow::DEPTH_TEST);
        }

        check_error(&self.gl)
    }
}

pub(crate) fn check_error(gl : &glow::Context) -> Result<()> {
    match unsafe { gl.get_error() } {
        glow::NO_ERROR => Ok(()),
        code => Err(Error::Gl(format!("glGetError returned {:#x}", code))),
    }
}

pub trait App : Sized {
    // load shaders, textures, etc.
    fn init(ctx : &mut GraphicsContext) -> Result<Self>;

    // handle input and render
    fn update(
        &mut self,
        event : &glutin::event::Event<'_, ()>,
        ctx : &mut GraphicsContext,
        control_flow : &mut glutin::event_loop::ControlFlow,
    );
}

pub fn is_redraw_event<T>(event : &glutin::event::Event<'_, T>) -> bool {
    // Platform-dependent event handlers to workaround a winit bug
    // See: https://github.com/rust-windowing/winit/issues/987
    // See: https://github.com/rust-windowing/winit/issues/1619
    match event {
        glutin::event::Event::RedrawEventsCleared if cfg!(windows) => true,
        glutin::event::Event::RedrawRequested(_) if !cfg!(windows) => true,
        _ => false,
    }
}

/// Opens the window, initializes `A` and runs the event loop until the
/// app exits. Never returns, startup failures exit the process with 1.
pub fn run<A : App + 'static>() {
    env_logger::init();

    let event_loop = glutin::event_loop::EventLoop::with_user_event();

    let (gl_window, gl) = match create_display(&event_loop) {
        Ok(v) => v,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let egui = egui_glow::EguiGlow::new(&gl_window, &gl);

    let mut render_ctx = GraphicsContext {
        gl, gl_window, egui
    };

    let (major, minor) = render_ctx.gl_version();
    log::info!("OpenGL version: {}.{}", major, minor);

    let mut a = match A::init(&mut render_ctx) {
        Ok(a) => a,
        Err(e) => {
            log::error!("init failed: {}", e);
            std::process::exit(1);
        }
    };

    event_loop.run(move |event, _, control_flow| {
        if let glutin::event::Event::WindowEvent { ref event, .. } = event {
            if render_ctx.egui.is_quit_event(event) {
                *control_flow = glutin::event_loop::ControlFlow::Exit;
            }

            if let glutin::event::WindowEvent::Resized(physical_size) = event {
                render_ctx.gl_window.resize(*physical_size);
            }

            render_ctx.egui.on_event(event);
        }

        if let glutin::event::Event::LoopDestroyed = event {
            render_ctx.egui.destroy(&render_ctx.gl);
        }

        a.update(&event, &mut render_ctx, control_flow);
    });
}
