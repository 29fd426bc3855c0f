use glam::{
    Vec2,
    Vec3,
};

/// A mesh uploaded to the GPU, drawn as a triangle list without indices.
#[derive(Clone, Copy)]
pub struct LoadedMesh {
    pub(crate) vao : glow::NativeVertexArray,
    pub(crate) count : usize,
    pub(crate) position_vbo : glow::NativeBuffer,
    pub(crate) tex_coord_vbo : glow::NativeBuffer,
}

/// Triangle list with a texture coordinate per vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub positions : Vec<Vec3>,
    pub tex_coords : Vec<Vec2>,
}

// x, y, z, u, v
const CUBE : [[f32; 5]; 36] = [
    [-0.5, -0.5, -0.5,  0.0, 0.0],
    [ 0.5, -0.5, -0.5,  1.0, 0.0],
    [ 0.5,  0.5, -0.5,  1.0, 1.0],
    [ 0.5,  0.5, -0.5,  1.0, 1.0],
    [-0.5,  0.5, -0.5,  0.0, 1.0],
    [-0.5, -0.5, -0.5,  0.0, 0.0],

    [-0.5, -0.5,  0.5,  0.0, 0.0],
    [ 0.5, -0.5,  0.5,  1.0, 0.0],
    [ 0.5,  0.5,  0.5,  1.0, 1.0],
    [ 0.5,  0.5,  0.5,  1.0, 1.0],
    [-0.5,  0.5,  0.5,  0.0, 1.0],
    [-0.5, -0.5,  0.5,  0.0, 0.0],

    [-0.5,  0.5,  0.5,  1.0, 0.0],
    [-0.5,  0.5, -0.5,  1.0, 1.0],
    [-0.5, -0.5, -0.5,  0.0, 1.0],
    [-0.5, -0.5, -0.5,  0.0, 1.0],
    [-0.5, -0.5,  0.5,  0.0, 0.0],
    [-0.5,  0.5,  0.5,  1.0, 0.0],

    [ 0.5,  0.5,  0.5,  1.0, 0.0],
    [ 0.5,  0.5, -0.5,  1.0, 1.0],
    [ 0.5, -0.5, -0.5,  0.0, 1.0],
    [ 0.5, -0.5, -0.5,  0.0, 1.0],
    [ 0.5, -0.5,  0.5,  0.0, 0.0],
    [ 0.5,  0.5,  0.5,  1.0, 0.0],

    [-0.5, -0.5, -0.5,  0.0, 1.0],
    [ 0.5, -0.5, -0.5,  1.0, 1.0],
    [ 0.5, -0.5,  0.5,  1.0, 0.0],
    [ 0.5, -0.5,  0.5,  1.0, 0.0],
    [-0.5, -0.5,  0.5,  0.0, 0.0],
    [-0.5, -0.5, -0.5,  0.0, 1.0],

    [-0.5,  0.5, -0.5,  0.0, 1.0],
    [ 0.5,  0.5, -0.5,  1.0, 1.0],
    [ 0.5,  0.5,  0.5,  1.0, 0.0],
    [ 0.5,  0.5,  0.5,  1.0, 0.0],
    [-0.5,  0.5,  0.5,  0.0, 0.0],
    [-0.5,  0.5, -0.5,  0.0, 1.0],
];

impl Mesh {
    /// Unit cube centered on the origin, each face mapped to the whole
    /// texture.
    pub fn textured_cube() -> Self {
        Self::from_interleaved(&CUBE)
    }

    pub fn from_interleaved(vertices : &[[f32; 5]]) -> Self {
        let positions = vertices.iter()
            .map(|v| Vec3::new(v[0], v[1], v[2]))
            .collect();

        let tex_coords = vertices.iter()
            .map(|v| Vec2::new(v[3], v[4]))
            .collect();

        Self{ positions, tex_coords }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cube() {
        let cube = Mesh::textured_cube();

        assert_eq!(cube.len(), 36);
        assert!(!cube.is_empty());
        assert_eq!(cube.tex_coords.len(), 36);

        assert!(Mesh::from_interleaved(&[]).is_empty());

        for p in &cube.positions {
            assert_eq!(p.abs(), Vec3::splat(0.5));
        }

        for uv in &cube.tex_coords {
            assert!(uv.x == 0.0 || uv.x == 1.0);
            assert!(uv.y == 0.0 || uv.y == 1.0);
        }
    }

    #[test]
    fn cube_faces_are_planar() {
        let cube = Mesh::textured_cube();

        // every 6 vertices form a face, sharing one coordinate
        for face in cube.positions.chunks(6) {
            let shared = [0, 1, 2].iter().any(|&axis| {
                face.iter().all(|p| p[axis] == face[0][axis])
            });
            assert!(shared, "{:?}", face);
        }
    }
}
