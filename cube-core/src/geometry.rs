/// Geometry primitives for the cube widgets
use std::collections::BTreeSet;

use nalgebra::Point3;

/// An indexed triangle mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    pub positions: Vec<Point3<f32>>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) -> u32 {
        self.positions.push(Point3::new(x, y, z));
        (self.positions.len() - 1) as u32
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.push([a, b, c]);
    }

    /// Create an axis-aligned box centered on the origin, two triangles per face
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        // Front corners (z = +half), then back corners (z = -half)
        let lbf = mesh.add_vertex(-half, -half, half);
        let rbf = mesh.add_vertex(half, -half, half);
        let rtf = mesh.add_vertex(half, half, half);
        let ltf = mesh.add_vertex(-half, half, half);
        let lbb = mesh.add_vertex(-half, -half, -half);
        let rbb = mesh.add_vertex(half, -half, -half);
        let rtb = mesh.add_vertex(half, half, -half);
        let ltb = mesh.add_vertex(-half, half, -half);

        // Front face
        mesh.add_triangle(lbf, rbf, rtf);
        mesh.add_triangle(lbf, rtf, ltf);

        // Back face
        mesh.add_triangle(lbb, ltb, rtb);
        mesh.add_triangle(lbb, rtb, rbb);

        // Top face
        mesh.add_triangle(ltb, ltf, rtf);
        mesh.add_triangle(ltb, rtf, rtb);

        // Bottom face
        mesh.add_triangle(lbb, rbb, rbf);
        mesh.add_triangle(lbb, rbf, lbf);

        // Right face
        mesh.add_triangle(rbb, rtb, rtf);
        mesh.add_triangle(rbb, rtf, rbf);

        // Left face
        mesh.add_triangle(lbb, lbf, ltf);
        mesh.add_triangle(lbb, ltf, ltb);

        mesh
    }

    /// Every distinct triangle edge, as drawn by a wireframe material
    pub fn wireframe(&self) -> Wireframe {
        let mut edges = BTreeSet::new();
        for &[a, b, c] in &self.triangles {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                edges.insert([from.min(to), from.max(to)]);
            }
        }

        Wireframe {
            positions: self.positions.clone(),
            edges: edges.into_iter().collect(),
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Line segments sharing an indexed vertex list
#[derive(Debug, Clone)]
pub struct Wireframe {
    pub positions: Vec<Point3<f32>>,
    pub edges: Vec<[u32; 2]>,
}

impl Wireframe {
    pub fn segments(&self) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + '_ {
        self.edges.iter().map(move |&[a, b]| {
            (self.positions[a as usize], self.positions[b as usize])
        })
    }

    /// Flattened `xyz` pairs for a `LINES` draw call
    pub fn line_list(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.edges.len() * 6);
        for (from, to) in self.segments() {
            out.extend_from_slice(&[from.x, from.y, from.z, to.x, to.y, to.z]);
        }
        out
    }

    pub fn vertex_count(&self) -> usize {
        self.edges.len() * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let cube = Mesh::cube(1.0);
        assert_eq!(cube.positions.len(), 8);
        assert_eq!(cube.triangles.len(), 12);
    }

    #[test]
    fn test_cube_is_centered() {
        let cube = Mesh::cube(1.0);
        for p in &cube.positions {
            assert!((p.x.abs() - 0.5).abs() < 1e-6);
            assert!((p.y.abs() - 0.5).abs() < 1e-6);
            assert!((p.z.abs() - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_wireframe_has_sides_and_diagonals() {
        let wire = Mesh::cube(1.0).wireframe();
        // 12 box sides plus one diagonal per face
        assert_eq!(wire.edges.len(), 18);
        assert_eq!(wire.vertex_count(), 36);
        assert_eq!(wire.line_list().len(), 108);

        let diagonals = wire
            .segments()
            .filter(|(a, b)| (a - b).norm() > 1.0 + 1e-6)
            .count();
        assert_eq!(diagonals, 6);
    }
}
