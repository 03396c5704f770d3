// CPU-side mesh generation for the centerpiece.
//
// The icosphere follows the usual polyhedron subdivision: every face of the
// base icosahedron is split into a `(detail + 1)²` triangle grid and each
// vertex is pushed out to the sphere. Shared vertices are welded so the
// wireframe draws each edge exactly once.

use fnv::FnvHashSet;
use glam::Vec3;
use std::f32::consts::PI;

const WELD_EPSILON: f32 = 1e-4;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    /// Triangle list.
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique undirected edges as a line-list index buffer.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut seen: FnvHashSet<(u32, u32)> = FnvHashSet::default();
        let mut lines = Vec::with_capacity(self.indices.len());
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    lines.push(key.0);
                    lines.push(key.1);
                }
            }
        }
        lines
    }
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_corners() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

struct Welder {
    radius: f32,
    vertices: Vec<MeshVertex>,
}

impl Welder {
    fn index_of(&mut self, p: Vec3) -> u32 {
        let n = p.normalize();
        let pos = n * self.radius;
        if let Some(i) = self
            .vertices
            .iter()
            .position(|v| Vec3::from(v.position).distance(pos) < WELD_EPSILON)
        {
            return i as u32;
        }
        self.vertices.push(MeshVertex {
            position: pos.to_array(),
            normal: n.to_array(),
        });
        (self.vertices.len() - 1) as u32
    }
}

/// Subdivided icosahedron of the given radius. `detail = 0` is the plain
/// 20-face solid; each level adds one split per edge.
pub fn icosphere(radius: f32, detail: u32) -> MeshData {
    let corners = icosahedron_corners();
    let cols = detail as usize + 1;
    let mut welder = Welder {
        radius,
        vertices: Vec::new(),
    };
    let mut indices = Vec::with_capacity(ICOSAHEDRON_FACES.len() * cols * cols * 3);

    for face in ICOSAHEDRON_FACES {
        let (a, b, c) = (corners[face[0]], corners[face[1]], corners[face[2]]);
        // grid[i][j]: row i from the a-b edge toward c, column j along the row
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(cols + 1);
        for i in 0..=cols {
            let t = i as f32 / cols as f32;
            let aj = a.lerp(c, t);
            let bj = b.lerp(c, t);
            let rows = cols - i;
            let row = (0..=rows)
                .map(|j| {
                    let p = if rows == 0 {
                        aj
                    } else {
                        aj.lerp(bj, j as f32 / rows as f32)
                    };
                    welder.index_of(p)
                })
                .collect();
            grid.push(row);
        }
        for i in 0..cols {
            for j in 0..(2 * (cols - i) - 1) {
                let k = j / 2;
                if j % 2 == 0 {
                    indices.extend_from_slice(&[grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
                } else {
                    indices.extend_from_slice(&[
                        grid[i][k + 1],
                        grid[i + 1][k + 1],
                        grid[i + 1][k],
                    ]);
                }
            }
        }
    }

    MeshData {
        vertices: welder.vertices,
        indices,
    }
}

/// Latitude/longitude sphere with outward normals and counter-clockwise
/// front faces.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut vertices = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let n = Vec3::new(
                -(u * 2.0 * PI).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * 2.0 * PI).sin() * (v * PI).sin(),
            );
            vertices.push(MeshVertex {
                position: (n * radius).to_array(),
                normal: n.to_array(),
            });
        }
    }

    let stride = w + 1;
    let at = |ix: u32, iy: u32| iy * stride + ix;
    let mut indices = Vec::new();
    for iy in 0..h {
        for ix in 0..w {
            let a = at(ix + 1, iy);
            let b = at(ix, iy);
            let c = at(ix, iy + 1);
            let d = at(ix + 1, iy + 1);
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}
