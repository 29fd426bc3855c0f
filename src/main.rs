use learning_gl::*;

use learning_gl::mesh::{
    LoadedMesh,
    Mesh,
};

use learning_gl::program::{
    LoadedProg,
    UniformSetter,
    Uniforms,
};

use learning_gl::view::perspective;

use glam::{
    Mat4,
    Vec3,
};

use glutin::event::VirtualKeyCode;
use glutin::event_loop::ControlFlow;

use winit_input_helper::WinitInputHelper;

const CUBE_POSITIONS : [[f32; 3]; 10] = [
    [ 0.0,  0.0,   0.0],
    [ 2.0,  5.0, -15.0],
    [-1.5, -2.2,  -2.5],
    [-3.8, -2.0, -12.3],
    [ 2.4, -0.4,  -3.5],
    [-1.7,  3.0,  -7.5],
    [ 1.3, -2.0,  -2.5],
    [ 1.5,  2.0,  -2.5],
    [ 1.5,  0.2,  -1.5],
    [-1.3,  1.0,  -1.5],
];

const CLEAR_COLOR : [f32; 4] = [0.5, 0.867, 0.949, 1.0];

const NEAR : f32 = 0.1;
const FAR : f32 = 100.0;

const FACE_ALPHA_STEP : f32 = 0.05;

// degrees per second
const SPIN_SPEED : f32 = 25.0;

fn cube_model(index : usize, time : f32) -> Mat4 {
    let angle = if index % 2 != 0 {
        time * SPIN_SPEED
    } else {
        20.0 * index as f32
    };

    Mat4::from_translation(Vec3::from(CUBE_POSITIONS[index])) *
    Mat4::from_axis_angle(
        Vec3::new(1.0, 0.0, 0.5).normalize(),
        angle.to_radians(),
    )
}

fn checkerboard(color : [u8; 4]) -> image::RgbaImage {
    image::RgbaImage::from_fn(64, 64, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            image::Rgba(color)
        } else {
            image::Rgba([40, 40, 40, 255])
        }
    })
}

fn load_texture_or_checker(
    ctx : &GraphicsContext,
    path : &str,
    color : [u8; 4],
) -> Result<glow::Texture> {
    match ctx.load_texture(path) {
        Ok(tex) => Ok(tex),
        Err(e) => {
            log::warn!("{}: {}, using a checkerboard instead", path, e);
            ctx.texture_2d_image(&checkerboard(color))
        }
    }
}

struct CubeUniforms {
    model : Mat4,
    view : Mat4,
    projection : Mat4,
    face_alpha : f32,
}

impl Uniforms for CubeUniforms {
    fn set_uniforms(&self, setter : &mut UniformSetter<'_>) -> Result<()> {
        setter.set("model_matrix", self.model)?;
        setter.set("view_matrix", self.view)?;
        setter.set("projection_matrix", self.projection)?;
        setter.set("face_alpha", self.face_alpha)?;
        setter.set("container_texture", 0i32)?;
        setter.set("face_texture", 1i32)?;
        Ok(())
    }
}

struct Cubes {
    prog : LoadedProg,
    cube : LoadedMesh,
    container : glow::Texture,
    face : glow::Texture,

    camera : Camera,
    camera_input : CameraInput,
    view_form : ViewForm,

    input : WinitInputHelper,
    clock : FrameClock,

    face_alpha : f32,
    mouse_look : bool,
}

impl Cubes {
    fn handle_input(&mut self, ctx : &GraphicsContext) -> bool {
        let input = &self.input;

        if input.key_pressed(VirtualKeyCode::Escape) || input.quit() {
            return true;
        }

        if input.key_pressed(VirtualKeyCode::Up) {
            self.face_alpha = (self.face_alpha + FACE_ALPHA_STEP).clamp(0.0, 1.0);
        }

        if input.key_pressed(VirtualKeyCode::Down) {
            self.face_alpha = (self.face_alpha - FACE_ALPHA_STEP).clamp(0.0, 1.0);
        }

        if input.key_pressed(VirtualKeyCode::V) {
            self.view_form = self.view_form.toggled();
            log::info!("building the view matrix with {:?}", self.view_form);
        }

        // release the cursor to use the panel
        if input.key_pressed(VirtualKeyCode::Tab) {
            self.mouse_look = !self.mouse_look;
            ctx.grab_cursor(self.mouse_look);
            self.camera_input.cursor.reset();
        }

        let delta_time = self.clock.tick();

        if self.mouse_look {
            self.camera_input.apply(&mut self.camera, input, delta_time);
        } else {
            self.camera_input.apply_keys(
                &mut self.camera,
                |key| input.key_held(key),
                delta_time,
            );
        }

        false
    }

    fn render(&mut self, ctx : &mut GraphicsContext) -> Result<()> {
        let [r, g, b, a] = CLEAR_COLOR;
        ctx.clear(r, g, b, a);

        // all input for this frame has been applied
        let projection = perspective(self.camera.zoom(), ctx.aspect(), NEAR, FAR);
        let view = self.camera.view_matrix_with(&self.view_form);
        let time = self.clock.elapsed();

        ctx.bind_texture(0, Some(self.container));
        ctx.bind_texture(1, Some(self.face));

        for index in 0..CUBE_POSITIONS.len() {
            ctx.draw_mesh(
                &self.prog,
                &self.cube,
                &CubeUniforms {
                    model : cube_model(index, time),
                    view,
                    projection,
                    face_alpha : self.face_alpha,
                },
            )?;
        }

        ctx.bind_texture(1, None);
        ctx.bind_texture(0, None);

        self.camera_panel(ctx);

        ctx.swap_buffers()
    }

    fn camera_panel(&mut self, ctx : &mut GraphicsContext) {
        let camera = &mut self.camera;
        let view_form = self.view_form;

        ctx.render_egui(|egui_ctx| {
            egui::Window::new("camera").show(egui_ctx, |ui| {
                let p = camera.position;
                ui.label(format!("position: {:.2} {:.2} {:.2}", p.x, p.y, p.z));
                ui.label(format!("yaw: {:.1}", camera.yaw()));
                ui.label(format!("pitch: {:.1}", camera.pitch()));
                ui.label(format!("zoom: {:.1}", camera.zoom()));
                ui.label(format!("view: {:?}", view_form));

                ui.separator();

                ui.add(
                    egui::Slider::new(&mut camera.movement_speed, 0.5..=10.0)
                        .text("speed")
                );
                ui.add(
                    egui::Slider::new(&mut camera.mouse_sensitivity, 0.01..=1.0)
                        .text("sensitivity")
                );
            });
        });
    }

    fn unload(&self, ctx : &GraphicsContext) {
        ctx.unload_mesh(self.cube);
        ctx.unload_texture(self.container);
        ctx.unload_texture(self.face);
        ctx.unload_program(&self.prog);
    }
}

impl App for Cubes {
    fn init(ctx : &mut GraphicsContext) -> Result<Self> {
        let prog = ctx.load_program(
            include_str!("shaders/cube.vert"),
            include_str!("shaders/cube.frag"),
        )?;

        let cube = ctx.load_mesh(&Mesh::textured_cube())?;

        let container = load_texture_or_checker(
            ctx,
            "assets/container.jpg",
            [200, 140, 60, 255],
        )?;

        let face = load_texture_or_checker(
            ctx,
            "assets/awesomeface.png",
            [250, 220, 40, 255],
        )?;

        ctx.grab_cursor(true);

        Ok(Self {
            prog,
            cube,
            container,
            face,
            camera : Camera::new(
                Vec3::new(0.0, 0.0, 3.0),
                Vec3::Y,
                camera::YAW,
                camera::PITCH,
            ),
            camera_input : CameraInput::default(),
            view_form : ViewForm::BasisMatrix,
            input : WinitInputHelper::new(),
            clock : FrameClock::new(),
            face_alpha : 0.2,
            mouse_look : true,
        })
    }

    fn update(
        &mut self,
        event : &glutin::event::Event<'_, ()>,
        ctx : &mut GraphicsContext,
        control_flow : &mut ControlFlow,
    ) {
        let mut quit = false;

        if self.input.update(event) {
            quit = self.handle_input(ctx);
            ctx.request_redraw();
        }

        if is_redraw_event(event) {
            if let Err(e) = self.render(ctx) {
                log::error!("render failed: {}", e);
                quit = true;
            }
        }

        if let glutin::event::Event::LoopDestroyed = event {
            self.unload(ctx);
            return;
        }

        if quit {
            *control_flow = ControlFlow::Exit;
        } else if *control_flow != ControlFlow::Exit {
            *control_flow = ControlFlow::Poll;
        }
    }
}

fn main() {
    run::<Cubes>();
}
