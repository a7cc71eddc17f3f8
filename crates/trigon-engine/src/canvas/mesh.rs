use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;

/// Colored vertex in logical pixels.
///
/// `color` is linear premultiplied RGBA, matching the renderer's blend state.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends `other`, rebasing its indices.
    pub fn extend_from(&mut self, other: &Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Cuts every triangle down to the part inside `rect`.
    ///
    /// Each triangle is clipped against the four edges (Sutherland-Hodgman)
    /// and the remaining polygon is fanned back into triangles. Colors are
    /// interpolated along cut edges.
    pub fn clipped(&self, rect: Rect) -> Mesh {
        let r = rect.normalized();
        let (min, max) = (r.min(), r.max());
        // (axis, bound, sign): inside when sign * (p[axis] - bound) >= 0.
        let planes = [(0, min.x, 1.0), (0, max.x, -1.0), (1, min.y, 1.0), (1, max.y, -1.0)];

        let mut out = Mesh::new();
        let mut poly: Vec<MeshVertex> = Vec::with_capacity(9);
        let mut next: Vec<MeshVertex> = Vec::with_capacity(9);

        for tri in self.indices.chunks_exact(3) {
            poly.clear();
            poly.extend(tri.iter().map(|&i| self.vertices[i as usize]));

            for &(axis, bound, sign) in &planes {
                next.clear();
                let dist = |v: &MeshVertex| sign * (v.pos[axis] - bound);
                for (i, cur) in poly.iter().enumerate() {
                    let prev = &poly[(i + poly.len() - 1) % poly.len()];
                    let (dp, dc) = (dist(prev), dist(cur));
                    if (dp >= 0.0) != (dc >= 0.0) {
                        let mut cut = lerp_vertex(prev, cur, dp / (dp - dc));
                        cut.pos[axis] = bound;
                        next.push(cut);
                    }
                    if dc >= 0.0 {
                        next.push(*cur);
                    }
                }
                std::mem::swap(&mut poly, &mut next);
                if poly.len() < 3 {
                    break;
                }
            }

            if poly.len() < 3 {
                continue;
            }
            let base = out.vertices.len() as u32;
            out.vertices.extend_from_slice(&poly);
            for k in 1..poly.len() as u32 - 1 {
                out.indices.extend([base, base + k, base + k + 1]);
            }
        }
        out
    }
}

fn lerp_vertex(a: &MeshVertex, b: &MeshVertex, t: f32) -> MeshVertex {
    let mix = |x: f32, y: f32| x + (y - x) * t;
    MeshVertex {
        pos: [mix(a.pos[0], b.pos[0]), mix(a.pos[1], b.pos[1])],
        color: [
            mix(a.color[0], b.color[0]),
            mix(a.color[1], b.color[1]),
            mix(a.color[2], b.color[2]),
            mix(a.color[3], b.color[3]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(color: [f32; 4]) -> Mesh {
        Mesh {
            vertices: vec![
                MeshVertex { pos: [0.0, 0.0], color },
                MeshVertex { pos: [1.0, 0.0], color },
                MeshVertex { pos: [0.0, 1.0], color },
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn extend_rebases_indices() {
        let mut m = tri([1.0; 4]);
        m.extend_from(&tri([0.5; 4]));
        assert_eq!(m.vertices.len(), 6);
        assert_eq!(m.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(m.triangle_count(), 2);
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 24);
    }

    fn big_tri() -> Mesh {
        let color = [0.2, 0.4, 0.6, 1.0];
        Mesh {
            vertices: vec![
                MeshVertex { pos: [50.0, 50.0], color },
                MeshVertex { pos: [400.0, 50.0], color },
                MeshVertex { pos: [50.0, 400.0], color },
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn clip_keeps_everything_inside_the_rect() {
        let clipped = big_tri().clipped(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!clipped.is_empty());
        for v in &clipped.vertices {
            assert!(v.pos[0] >= 0.0 && v.pos[0] <= 100.0, "{v:?}");
            assert!(v.pos[1] >= 0.0 && v.pos[1] <= 100.0, "{v:?}");
            assert_eq!(v.color, [0.2, 0.4, 0.6, 1.0]);
        }
        // The visible part is the 50x50 square in the corner: two triangles.
        assert_eq!(clipped.triangle_count(), 2);
    }

    #[test]
    fn clip_leaves_contained_triangles_alone() {
        let m = tri([1.0; 4]);
        let clipped = m.clipped(Rect::new(-1.0, -1.0, 3.0, 3.0));
        assert_eq!(clipped, m);
    }

    #[test]
    fn clip_drops_triangles_outside() {
        let clipped = big_tri().clipped(Rect::new(0.0, 0.0, 40.0, 40.0));
        assert!(clipped.is_empty());
        assert!(clipped.vertices.is_empty());
    }

    #[test]
    fn clip_interpolates_color_on_cut_edges() {
        let m = Mesh {
            vertices: vec![
                MeshVertex { pos: [0.0, 0.0], color: [0.0; 4] },
                MeshVertex { pos: [20.0, 0.0], color: [1.0; 4] },
                MeshVertex { pos: [0.0, 10.0], color: [0.0; 4] },
            ],
            indices: vec![0, 1, 2],
        };
        let clipped = m.clipped(Rect::new(0.0, 0.0, 10.0, 10.0));
        let cut = clipped
            .vertices
            .iter()
            .find(|v| v.pos == [10.0, 0.0])
            .expect("cut vertex on the top edge");
        assert_eq!(cut.color, [0.5; 4]);
    }
}
