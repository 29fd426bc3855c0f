use glow::HasContext;
use quick_from::QuickFrom;
use std::rc::Rc;

use crate::error::{
    Error,
    Result,
    Stage,
};

pub struct LoadedProg {
    pub(crate) prog : glow::NativeProgram,
    // sorted by name
    pub(crate) active_uniforms : Rc<[(glow::ActiveUniform, glow::UniformLocation)]>,
}

impl LoadedProg {
    pub(crate) fn find_active_uniform(
        &self,
        name : &str
    ) -> Option<&(glow::ActiveUniform, glow::UniformLocation)> {
        self.active_uniforms.binary_search_by_key(
            &name,
            |v| &v.0.name
        ).ok().map(|idx| &self.active_uniforms[idx])
    }
}

pub trait Uniforms {
    fn set_uniforms(&self, setter : &mut UniformSetter<'_>) -> Result<()>;
}

#[derive(QuickFrom, Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    #[quick_from]
    Int(i32),

    #[quick_from]
    Bool(bool),

    #[quick_from]
    Float(f32),

    #[quick_from]
    Vec3(glam::Vec3),

    #[quick_from]
    Vec4(glam::Vec4),

    #[quick_from]
    Mat4(glam::Mat4),
}

impl UniformValue {
    pub(crate) fn set_uniform(
        self,
        gl : &glow::Context,
        loc : &glow::UniformLocation
    ) {
        use UniformValue::*;

        let loc = Some(loc);

        unsafe {
            match self {
                Int(val) => gl.uniform_1_i32(loc, val),
                Bool(val) => gl.uniform_1_i32(loc, val as i32),
                Float(val) => gl.uniform_1_f32(loc, val),
                Vec3(val) => gl.uniform_3_f32_slice(
                    loc,
                    bytemuck::cast_slice(&[val]),
                ),
                Vec4(val) => gl.uniform_4_f32_slice(
                    loc,
                    bytemuck::cast_slice(&[val]),
                ),
                Mat4(val) => gl.uniform_matrix_4_f32_slice(
                    loc,
                    false,
                    bytemuck::cast_slice(&[val]),
                ),
            }
        }
    }
}

pub struct UniformSetter<'a> {
    pub(crate) gl : &'a glow::Context,
    pub(crate) prog : &'a LoadedProg,
}

impl<'a> UniformSetter<'a> {
    /// Uniforms the program doesn't have, including ones the driver
    /// optimized out, are skipped with a warning.
    pub fn set<V>(&self, name : &str, val : V) -> Result<()>
    where
        V : Into<UniformValue>
    {
        let (_, loc) = match self.prog.find_active_uniform(name) {
            Some(v) => v,
            None => {
                log::warn!("no uniform {}", name);
                return Ok(());
            }
        };

        val.into().set_uniform(self.gl, loc);

        crate::check_error(self.gl)
    }
}

pub(crate) fn compile_shader(
    gl : &glow::Context,
    stage : Stage,
    src : &str,
) -> Result<glow::NativeShader> {
    let kind = match stage {
        Stage::Vertex => glow::VERTEX_SHADER,
        Stage::Fragment => glow::FRAGMENT_SHADER,
    };

    log::debug!("compiling {} shader", stage);

    unsafe {
        let shader = gl.create_shader(kind).map_err(Error::Gl)?;
        gl.shader_source(shader, src);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(Error::Shader{ stage, log });
        }

        Ok(shader)
    }
}

pub(crate) fn link_program(
    gl : &glow::Context,
    vert : glow::NativeShader,
    frag : glow::NativeShader,
) -> Result<LoadedProg> {
    let prog;
    unsafe {
        prog = gl.create_program().map_err(Error::Gl)?;
        gl.attach_shader(prog, vert);
        gl.attach_shader(prog, frag);
        gl.link_program(prog);

        gl.detach_shader(prog, vert);
        gl.detach_shader(prog, frag);
        gl.delete_shader(vert);
        gl.delete_shader(frag);

        if !gl.get_program_link_status(prog) {
            let log = gl.get_program_info_log(prog);
            gl.delete_program(prog);
            return Err(Error::Link(log));
        }
    }

    let n = unsafe {
        gl.get_active_uniforms(prog)
    };

    let mut active_uniforms = Vec::with_capacity(n as usize);

    for i in 0..n {
        let u = unsafe {
            gl.get_active_uniform(prog, i)
        };

        let u = match u {
            Some(u) => u,
            None => continue,
        };

        let loc = unsafe {
            gl.get_uniform_location(prog, &u.name)
        };

        match loc {
            Some(loc) => {
                log::debug!("uniform {}", u.name);
                active_uniforms.push((u, loc));
            },
            // uniform block members have no location
            None => log::debug!("uniform {} has no location", u.name),
        }
    }

    active_uniforms.sort_unstable_by(|left, right| {
        left.0.name.cmp(&right.0.name)
    });

    Ok(LoadedProg{
        prog,
        active_uniforms : active_uniforms.into_boxed_slice().into(),
    })
}
