//! Surface and volume meshes exported from ParaView
//!
//! A [`SurfaceMesh`] is the triangulated form the renderer draws: flat xyz
//! vertices, triangle indices and one scalar per vertex. A [`RawGrid`] keeps
//! the untriangulated connectivity of a volume export as-is.

mod error;
pub mod vtk;


use std::fmt;

pub use error::MeshError;

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// x
    X,
    /// y
    Y,
    /// z
    Z,
}

impl Axis {
    /// All three axes in order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Offset within an xyz triple
    pub fn offset(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Lower-case axis name
    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// `[min, max]` of a sequence, `None` when empty.
///
/// A NaN anywhere makes both bounds NaN.
pub fn value_range<I: IntoIterator<Item = f64>>(values: I) -> Option<[f64; 2]> {
    values.into_iter().fold(None, |range, v| {
        Some(match range {
            _ if v.is_nan() => [f64::NAN, f64::NAN],
            Some([lo, hi]) if lo.is_nan() => [lo, hi],
            Some([lo, hi]) => [f64::min(lo, v), f64::max(hi, v)],
            None => [v, v],
        })
    })
}

fn axis_range(points: &[f64], axis: Axis) -> Option<[f64; 2]> {
    value_range(points.iter().skip(axis.offset()).step_by(3).copied())
}

/// Triangulated surface with one scalar per vertex
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    /// Flattened x, y, z vertex coordinates
    pub vertices: Vec<f64>,
    /// Triangle vertex indices, three per triangle
    pub indices: Vec<i64>,
    /// Scalar field sampled at each vertex
    pub scalars: Vec<f64>,
}

impl SurfaceMesh {
    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flip every triangle's orientation by swapping its first and last index.
    ///
    /// ParaView's wing export faces inwards in the renderer; flipping the
    /// winding turns the computed normals outwards.
    pub fn reverse_winding(&mut self) {
        for triangle in self.indices.chunks_exact_mut(3) {
            triangle.swap(0, 2);
        }
    }

    /// `[min, max]` of the vertex coordinates along an axis
    pub fn axis_domain(&self, axis: Axis) -> Option<[f64; 2]> {
        axis_range(&self.vertices, axis)
    }

    /// `[min, max]` of the scalar field
    pub fn scalar_domain(&self) -> Option<[f64; 2]> {
        value_range(self.scalars.iter().copied())
    }

    /// Check array shapes and index bounds
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.vertices.len() % 3 != 0 {
            return Err(MeshError::InvalidMesh(format!(
                "{} vertex coordinates is not a multiple of 3",
                self.vertices.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::InvalidMesh(format!(
                "{} triangle indices is not a multiple of 3",
                self.indices.len()
            )));
        }
        check_scalars(self.scalars.len(), self.vertex_count())?;
        check_indices(&self.indices, self.vertex_count())
    }
}

impl fmt::Display for SurfaceMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} triangles",
            self.vertex_count(),
            self.triangle_count()
        )
    }
}

/// Volume export arrays kept in their original VTK layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGrid {
    /// Flattened x, y, z point coordinates
    pub points: Vec<f64>,
    /// Cell connectivity, all cells concatenated
    pub connectivity: Vec<i64>,
    /// Scalar field sampled at each point
    pub scalars: Vec<f64>,
}

impl RawGrid {
    /// Number of points
    pub fn point_count(&self) -> usize {
        self.points.len() / 3
    }

    /// `[min, max]` of the point coordinates along an axis
    pub fn axis_domain(&self, axis: Axis) -> Option<[f64; 2]> {
        axis_range(&self.points, axis)
    }

    /// `[min, max]` of the scalar field
    pub fn scalar_domain(&self) -> Option<[f64; 2]> {
        value_range(self.scalars.iter().copied())
    }

    /// Check array shapes and index bounds
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.points.len() % 3 != 0 {
            return Err(MeshError::InvalidMesh(format!(
                "{} point coordinates is not a multiple of 3",
                self.points.len()
            )));
        }
        check_scalars(self.scalars.len(), self.point_count())?;
        check_indices(&self.connectivity, self.point_count())
    }
}

fn check_scalars(scalars: usize, vertices: usize) -> Result<(), MeshError> {
    if scalars != vertices {
        return Err(MeshError::InvalidMesh(format!(
            "{} scalar values for {} vertices",
            scalars, vertices
        )));
    }
    Ok(())
}

fn check_indices(indices: &[i64], vertices: usize) -> Result<(), MeshError> {
    match indices.iter().find(|&&i| i < 0 || i as usize >= vertices) {
        Some(bad) => Err(MeshError::InvalidMesh(format!(
            "index {} out of range for {} vertices",
            bad, vertices
        ))),
        None => Ok(()),
    }
}
