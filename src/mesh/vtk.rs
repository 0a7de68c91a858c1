//! VTK input via `vtkio`
//!
//! Reads ParaView exports in XML (`.vtu`, `.vtp`) or legacy (`.vtk`) form.
//! Only unstructured grids and poly data are accepted; all pieces of a file
//! are concatenated.

use std::path::Path;

use log::debug;
use vtkio::model::{
    Attribute, Attributes, CellType, DataSet, IOBuffer, PolyDataPiece, UnstructuredGridPiece,
    VertexNumbers,
};
use vtkio::Vtk;

use super::{MeshError, RawGrid, SurfaceMesh};

/// Kind of polygonal cell, as far as surface triangulation is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    /// Triangle, quad or general polygon: fan from the first vertex
    Polygon,
    /// Triangle strip
    Strip,
    /// VTK pixel: a quad with vertices in raster order
    Pixel,
    /// Points and lines carry no surface
    Skip,
}

impl Face {
    fn of(cell_type: CellType) -> Result<Self, MeshError> {
        match cell_type {
            CellType::Triangle | CellType::Quad | CellType::Polygon => Ok(Face::Polygon),
            CellType::TriangleStrip => Ok(Face::Strip),
            CellType::Pixel => Ok(Face::Pixel),
            CellType::Vertex | CellType::PolyVertex | CellType::Line | CellType::PolyLine => {
                Ok(Face::Skip)
            }
            other => Err(MeshError::UnsupportedCell(format!("{:?}", other))),
        }
    }
}

/// One piece of a dataset, reduced to what the converters need
struct MeshPiece {
    points: Vec<f64>,
    cells: Vec<(CellType, Vec<i64>)>,
    data: Attributes,
}

/// Load a triangulated surface with the named point scalar
pub fn load_surface<P: AsRef<Path>>(path: P, scalar: &str) -> Result<SurfaceMesh, MeshError> {
    let path = path.as_ref();
    let pieces = load_pieces(path)?;

    let mut mesh = SurfaceMesh::default();
    for piece in pieces {
        let offset = mesh.vertex_count() as i64;
        let count = piece.points.len() / 3;
        mesh.scalars.extend(point_scalars(&piece.data, scalar, count)?);
        mesh.vertices.extend(piece.points);
        for (cell_type, cell) in &piece.cells {
            triangulate(Face::of(*cell_type)?, cell, offset, &mut mesh.indices);
        }
    }

    mesh.validate()?;
    debug!("Loaded surface {} ({})", path.display(), mesh);
    Ok(mesh)
}

/// Load points, concatenated cell connectivity and the named point scalar.
///
/// Cells of any type are accepted and kept untriangulated.
pub fn load_raw_grid<P: AsRef<Path>>(path: P, scalar: &str) -> Result<RawGrid, MeshError> {
    let path = path.as_ref();
    let pieces = load_pieces(path)?;

    let mut grid = RawGrid::default();
    for piece in pieces {
        let offset = grid.point_count() as i64;
        let count = piece.points.len() / 3;
        grid.scalars.extend(point_scalars(&piece.data, scalar, count)?);
        grid.points.extend(piece.points);
        for (_, cell) in &piece.cells {
            grid.connectivity.extend(cell.iter().map(|&i| i + offset));
        }
    }

    grid.validate()?;
    debug!(
        "Loaded grid {} ({} points, {} connectivity entries)",
        path.display(),
        grid.point_count(),
        grid.connectivity.len()
    );
    Ok(grid)
}

fn load_pieces(path: &Path) -> Result<Vec<MeshPiece>, MeshError> {
    let vtk = Vtk::import(path).map_err(vtk_error)?;

    match vtk.data {
        DataSet::UnstructuredGrid { pieces, .. } => pieces
            .into_iter()
            .map(|p| {
                p.into_loaded_piece_data(Some(path))
                    .map_err(model_error)
                    .and_then(grid_piece)
            })
            .collect(),
        DataSet::PolyData { pieces, .. } => pieces
            .into_iter()
            .map(|p| {
                p.into_loaded_piece_data(Some(path))
                    .map_err(model_error)
                    .and_then(poly_piece)
            })
            .collect(),
        _ => Err(MeshError::UnsupportedDataSet(format!(
            "{} is neither an unstructured grid nor poly data",
            path.display()
        ))),
    }
}

fn vtk_error(e: vtkio::Error) -> MeshError {
    MeshError::VtkError(format!("{:?}", e))
}

fn model_error(e: vtkio::model::Error) -> MeshError {
    MeshError::VtkError(format!("{:?}", e))
}

fn grid_piece(piece: UnstructuredGridPiece) -> Result<MeshPiece, MeshError> {
    let cells = cell_lists(piece.cells.cell_verts)?;
    if cells.len() != piece.cells.types.len() {
        return Err(MeshError::InvalidMesh(format!(
            "{} cells but {} cell types",
            cells.len(),
            piece.cells.types.len()
        )));
    }
    let cells = piece.cells.types.into_iter().zip(cells).collect();

    Ok(MeshPiece {
        points: buffer_to_f64(piece.points)?,
        cells,
        data: piece.data,
    })
}

fn poly_piece(piece: PolyDataPiece) -> Result<MeshPiece, MeshError> {
    let mut cells = Vec::new();
    for (cell_type, numbers) in [
        (CellType::PolyVertex, piece.verts),
        (CellType::PolyLine, piece.lines),
        (CellType::Polygon, piece.polys),
        (CellType::TriangleStrip, piece.strips),
    ] {
        if let Some(numbers) = numbers {
            cells.extend(cell_lists(numbers)?.into_iter().map(|c| (cell_type, c)));
        }
    }

    Ok(MeshPiece {
        points: buffer_to_f64(piece.points)?,
        cells,
        data: piece.data,
    })
}

/// Split legacy (`n, i1..in, ...`) or XML (connectivity + end offsets) cell
/// lists into one index list per cell.
fn cell_lists(numbers: VertexNumbers) -> Result<Vec<Vec<i64>>, MeshError> {
    match numbers {
        VertexNumbers::Legacy { vertices, .. } => {
            let mut cells = Vec::new();
            let mut rest = vertices.as_slice();
            while let Some((&n, tail)) = rest.split_first() {
                let n = n as usize;
                if n > tail.len() {
                    return Err(MeshError::InvalidMesh(format!(
                        "cell of {} vertices but only {} indices left",
                        n,
                        tail.len()
                    )));
                }
                cells.push(tail[..n].iter().map(|&v| v as i64).collect());
                rest = &tail[n..];
            }
            Ok(cells)
        }
        VertexNumbers::XML {
            connectivity,
            offsets,
        } => {
            let mut cells = Vec::with_capacity(offsets.len());
            let mut start = 0usize;
            for end in offsets {
                let end = end as usize;
                let cell = connectivity.get(start..end).ok_or_else(|| {
                    MeshError::InvalidMesh(format!(
                        "cell offsets {}..{} exceed {} connectivity entries",
                        start,
                        end,
                        connectivity.len()
                    ))
                })?;
                cells.push(cell.iter().map(|&v| v as i64).collect());
                start = end;
            }
            Ok(cells)
        }
    }
}

fn triangulate(face: Face, cell: &[i64], offset: i64, out: &mut Vec<i64>) {
    match face {
        Face::Skip => {}
        Face::Polygon => {
            for i in 1..cell.len().saturating_sub(1) {
                out.extend([cell[0] + offset, cell[i] + offset, cell[i + 1] + offset]);
            }
        }
        Face::Pixel if cell.len() == 4 => {
            let quad = [cell[0], cell[1], cell[3], cell[2]];
            triangulate(Face::Polygon, &quad, offset, out);
        }
        Face::Pixel => triangulate(Face::Polygon, cell, offset, out),
        Face::Strip => {
            for (i, w) in cell.windows(3).enumerate() {
                // Every other strip triangle is stored with flipped winding.
                let tri = if i % 2 == 0 {
                    [w[0], w[1], w[2]]
                } else {
                    [w[1], w[0], w[2]]
                };
                out.extend(tri.iter().map(|&v| v + offset));
            }
        }
    }
}

fn point_scalars(data: &Attributes, name: &str, count: usize) -> Result<Vec<f64>, MeshError> {
    let buffer = data
        .point
        .iter()
        .find_map(|attr| match attr {
            Attribute::DataArray(array) if array.name == name => Some(array.data.clone()),
            Attribute::Field { data_array, .. } => data_array
                .iter()
                .find(|f| f.name == name)
                .map(|f| f.data.clone()),
            _ => None,
        })
        .ok_or_else(|| MeshError::MissingArray(name.to_string()))?;

    let values = buffer_to_f64(buffer)?;
    if values.len() != count {
        return Err(MeshError::InvalidMesh(format!(
            "point array '{}' has {} values for {} points",
            name,
            values.len(),
            count
        )));
    }
    Ok(values)
}

fn buffer_to_f64(buffer: IOBuffer) -> Result<Vec<f64>, MeshError> {
    fn widen<T: Into<f64>>(v: Vec<T>) -> Vec<f64> {
        v.into_iter().map(Into::into).collect()
    }

    Ok(match buffer {
        IOBuffer::F64(v) => v,
        IOBuffer::F32(v) => widen(v),
        IOBuffer::I32(v) => widen(v),
        IOBuffer::U32(v) => widen(v),
        IOBuffer::I16(v) => widen(v),
        IOBuffer::U16(v) => widen(v),
        IOBuffer::I8(v) => widen(v),
        IOBuffer::U8(v) => widen(v),
        IOBuffer::I64(v) => v.into_iter().map(|x| x as f64).collect(),
        IOBuffer::U64(v) => v.into_iter().map(|x| x as f64).collect(),
        _ => {
            return Err(MeshError::InvalidMesh(
                "bit arrays cannot be read as numbers".to_string(),
            ))
        }
    })
}
