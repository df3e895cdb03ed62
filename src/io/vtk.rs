//! Legacy VTK (`.vtk`) reader for unstructured grids.
//!
//! This implementation targets ASCII legacy VTK files with an
//! `UNSTRUCTURED_GRID` dataset. Both the classic `CELLS` layout (count-prefixed
//! rows) and the 5.x `OFFSETS`/`CONNECTIVITY` layout are accepted. Point and
//! cell data sections after `CELL_TYPES` are skipped.
//!
//! VTK point indices are 0-based; they become 1-based vertex handles in the
//! engine like every other reader. Polygon cells need at least 3 points, as
//! OBJ faces do.

use crate::io::{MeshReader, ReadOptions, parse_field};
use crate::mesh_error::MeshUgridError;
use crate::topology::entity_type::EntityType;
use crate::topology::handle::EntityHandle;
use crate::topology::mesh_core::MeshCore;
use std::io::Read;
use std::iter::Peekable;

/// Reader for ASCII legacy VTK unstructured grids.
#[derive(Debug, Default, Clone)]
pub struct VtkReader;

/// `None` means the cell is recognised but not a mesh entity (VTK_VERTEX).
fn vtk_cell_type(cell_type: i32) -> Result<Option<EntityType>, MeshUgridError> {
    match cell_type {
        1 => Ok(None),
        3 => Ok(Some(EntityType::Edge)),
        5 => Ok(Some(EntityType::Triangle)),
        7 => Ok(Some(EntityType::Polygon)),
        9 => Ok(Some(EntityType::Quadrilateral)),
        10 => Ok(Some(EntityType::Tetrahedron)),
        12 => Ok(Some(EntityType::Hexahedron)),
        13 => Ok(Some(EntityType::Prism)),
        14 => Ok(Some(EntityType::Pyramid)),
        _ => Err(MeshUgridError::MeshIoParse(format!(
            "unsupported VTK cell type {cell_type}"
        ))),
    }
}

fn expect_keyword<'a, I>(tokens: &mut I, keyword: &str) -> Result<(), MeshUgridError>
where
    I: Iterator<Item = &'a str>,
{
    match tokens.next() {
        Some(token) if token == keyword => Ok(()),
        Some(token) => Err(MeshUgridError::MeshIoParse(format!(
            "expected {keyword} section, found {token}"
        ))),
        None => Err(MeshUgridError::MeshIoParse(format!("missing {keyword}"))),
    }
}

/// Reads the `CELLS` block in either layout, returning per-cell point indices.
fn read_cells<'a, I>(tokens: &mut Peekable<I>) -> Result<Vec<Vec<usize>>, MeshUgridError>
where
    I: Iterator<Item = &'a str>,
{
    expect_keyword(tokens, "CELLS")?;
    let first: usize = parse_field(tokens.next(), "cell count")?;
    let second: usize = parse_field(tokens.next(), "cell size")?;

    if tokens.peek() == Some(&"OFFSETS") {
        tokens.next();
        let _offset_type = tokens.next();
        let offsets = (0..first)
            .map(|_| parse_field::<usize>(tokens.next(), "cell offset"))
            .collect::<Result<Vec<_>, _>>()?;
        expect_keyword(tokens, "CONNECTIVITY")?;
        let _conn_type = tokens.next();
        let conn = (0..second)
            .map(|_| parse_field::<usize>(tokens.next(), "cell index"))
            .collect::<Result<Vec<_>, _>>()?;
        return offsets
            .windows(2)
            .map(|w| {
                conn.get(w[0]..w[1]).map(<[usize]>::to_vec).ok_or_else(|| {
                    MeshUgridError::MeshIoParse("cell offsets out of range".into())
                })
            })
            .collect();
    }

    let mut cells = Vec::with_capacity(first);
    for _ in 0..first {
        let count: usize = parse_field(tokens.next(), "cell size")?;
        let cell = (0..count)
            .map(|_| parse_field::<usize>(tokens.next(), "cell index"))
            .collect::<Result<Vec<_>, _>>()?;
        cells.push(cell);
    }
    Ok(cells)
}

impl MeshReader for VtkReader {
    fn read_with_options<R: Read>(
        &self,
        mut reader: R,
        options: ReadOptions,
    ) -> Result<MeshCore, MeshUgridError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let mut lines = input.lines();
        let header = lines
            .next()
            .ok_or_else(|| MeshUgridError::MeshIoParse("empty VTK file".into()))?;
        if !header.trim_start().starts_with("# vtk DataFile") {
            return Err(MeshUgridError::MeshIoParse("missing VTK header".into()));
        }
        let _title = lines.next();
        let format = lines
            .next()
            .ok_or_else(|| MeshUgridError::MeshIoParse("missing ASCII line".into()))?;
        if format.trim() != "ASCII" {
            return Err(MeshUgridError::MeshIoParse(
                "VTK ASCII format required".into(),
            ));
        }
        let dataset = lines
            .next()
            .ok_or_else(|| MeshUgridError::MeshIoParse("missing DATASET line".into()))?;
        if !dataset.trim().ends_with("UNSTRUCTURED_GRID") {
            return Err(MeshUgridError::MeshIoParse(
                "VTK UNSTRUCTURED_GRID required".into(),
            ));
        }

        let mut tokens = lines.flat_map(str::split_whitespace).peekable();

        expect_keyword(&mut tokens, "POINTS")?;
        let num_points: usize = parse_field(tokens.next(), "point count")?;
        let _point_type = tokens
            .next()
            .ok_or_else(|| MeshUgridError::MeshIoParse("missing point type".into()))?;
        let mut core = MeshCore::new();
        let mut handles = Vec::with_capacity(num_points);
        for _ in 0..num_points {
            let x = parse_field(tokens.next(), "point value")?;
            let y = parse_field(tokens.next(), "point value")?;
            let z = parse_field(tokens.next(), "point value")?;
            handles.push(core.add_vertex([x, y, z])?);
        }

        let cells = read_cells(&mut tokens)?;

        expect_keyword(&mut tokens, "CELL_TYPES")?;
        let cell_types_count: usize = parse_field(tokens.next(), "cell types count")?;
        if cell_types_count != cells.len() {
            return Err(MeshUgridError::MeshIoParse(format!(
                "CELL_TYPES count {cell_types_count} does not match {} cells",
                cells.len()
            )));
        }
        for (index, cell) in cells.iter().enumerate() {
            let raw: i32 = parse_field(tokens.next(), "cell type")?;
            let Some(entity_type) = vtk_cell_type(raw)? else {
                continue;
            };
            if entity_type == EntityType::Polygon && cell.len() < 3 {
                return Err(MeshUgridError::MeshIoParse(format!(
                    "cell {index}: polygon needs at least 3 points, found {}",
                    cell.len()
                )));
            }
            let conn = cell
                .iter()
                .map(|&idx| {
                    handles.get(idx).copied().ok_or_else(|| {
                        MeshUgridError::MeshIoParse(format!("point index {idx} out of range"))
                    })
                })
                .collect::<Result<Vec<EntityHandle>, _>>()?;
            core.add_element(entity_type, conn)?;
        }

        if let Some(next) = tokens.next() {
            let is_data = matches!(next, "POINT_DATA" | "CELL_DATA" | "FIELD" | "METADATA");
            if options.strict && !is_data {
                return Err(MeshUgridError::MeshIoParse(format!(
                    "unexpected token {next}"
                )));
            }
        }

        Ok(core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &str = "# vtk DataFile Version 3.0
polygons
ASCII
DATASET UNSTRUCTURED_GRID
POINTS 6 double
0 0 0  1 0 0  1 1 0  0 1 0  2 0 0  2 1 0
CELLS 4 17
3 1 4 5
4 0 1 2 3
5 0 1 4 5 2
1 3
CELL_TYPES 4
5
9
7
1
CELL_DATA 4
SCALARS id int 1
LOOKUP_TABLE default
0 1 2 3
";

    const MODERN: &str = "# vtk DataFile Version 5.1
polygons
ASCII
DATASET UNSTRUCTURED_GRID
POINTS 4 float
0 0 0 1 0 0 1 1 0 0 1 0
CELLS 3 7
OFFSETS vtktypeint64
0 3 7
CONNECTIVITY vtktypeint64
0 1 2 0 1 2 3
CELL_TYPES 2
5
9
";

    fn face_ids(core: &MeshCore) -> Vec<Vec<u64>> {
        core.entities_by_dimension(2)
            .into_iter()
            .map(|f| core.connectivity(f).unwrap().iter().map(|v| v.id()).collect())
            .collect()
    }

    #[test]
    fn classic_layout_with_polygons() {
        let core = VtkReader.read(CLASSIC.as_bytes()).expect("read vtk");
        assert_eq!(core.num_vertices(), 6);
        // grouped triangle, quad, polygon
        assert_eq!(
            face_ids(&core),
            vec![vec![2, 5, 6], vec![1, 2, 3, 4], vec![1, 2, 5, 6, 3]]
        );
    }

    #[test]
    fn offsets_connectivity_layout() {
        let core = VtkReader.read(MODERN.as_bytes()).expect("read vtk 5.1");
        assert_eq!(face_ids(&core), vec![vec![1, 2, 3], vec![1, 2, 3, 4]]);
    }

    #[test]
    fn binary_is_rejected() {
        let input = CLASSIC.replacen("ASCII", "BINARY", 1);
        let err = VtkReader.read(input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("ASCII"));
    }

    #[test]
    fn non_vtk_input_is_rejected() {
        let err = VtkReader.read("v 0 0 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshUgridError::MeshIoParse(_)));
    }

    #[test]
    fn out_of_range_point_index_fails() {
        let input = CLASSIC.replacen("3 1 4 5", "3 1 4 9", 1);
        let err = VtkReader.read(input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn polygon_with_fewer_than_three_points_fails() {
        let input = CLASSIC
            .replacen("CELLS 4 17", "CELLS 4 14", 1)
            .replacen("5 0 1 4 5 2", "2 0 1", 1);
        let err = VtkReader.read(input.as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Mesh I/O parse error: cell 2: polygon needs at least 3 points, found 2"
        );
    }

    #[test]
    fn strict_mode_rejects_trailing_garbage() {
        let input = format!("{MODERN}GARBAGE\n");
        assert!(VtkReader.read(input.as_bytes()).is_ok());
        let strict = ReadOptions { strict: true };
        assert!(VtkReader.read_with_options(input.as_bytes(), strict).is_err());
        assert!(VtkReader.read_with_options(MODERN.as_bytes(), strict).is_ok());
    }
}
