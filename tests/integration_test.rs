//! Integration tests for aerovis
//!
//! These tests run whole case conversions against small exports on disk and
//! read the written assets back.

use aerovis::binary::{read_array, ElementType, NumericArray};
use aerovis::case::{convert_all, convert_case, CaseConfig, CaseError};
use aerovis::streamline::{StreamlineCollection, StreamlineError};
use aerovis::validator::validate_streamline_file;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

const WING: &str = "# vtk DataFile Version 2.0
wing
ASCII
DATASET UNSTRUCTURED_GRID
POINTS 4 float
0 -0.5 0
1 0 0
0 0.5 0
0.5 0 0.25
CELLS 2 8
3 0 1 3
3 1 2 3
CELL_TYPES 2
5
5
POINT_DATA 4
SCALARS Mach float 1
LOOKUP_TABLE default
0.5 0.75 0.5 0.25
";

const WING_VTU: &str = r#"<VTKFile type="UnstructuredGrid" version="0.1" byte_order="LittleEndian">
  <UnstructuredGrid>
    <Piece NumberOfPoints="4" NumberOfCells="2">
      <PointData Scalars="Mach">
        <DataArray type="Float32" Name="Mach" NumberOfComponents="1" format="ascii">
          0.5 0.75 0.5 0.25
        </DataArray>
      </PointData>
      <Points>
        <DataArray type="Float32" NumberOfComponents="3" format="ascii">
          0 -0.5 0 1 0 0 0 0.5 0 0.5 0 0.25
        </DataArray>
      </Points>
      <Cells>
        <DataArray type="Int32" Name="connectivity" format="ascii">
          0 1 3 1 2 3
        </DataArray>
        <DataArray type="Int32" Name="offsets" format="ascii">
          3 6
        </DataArray>
        <DataArray type="UInt8" Name="types" format="ascii">
          5 5
        </DataArray>
      </Cells>
    </Piece>
  </UnstructuredGrid>
</VTKFile>
"#;

const BLOCK: &str = "# vtk DataFile Version 2.0
block
ASCII
DATASET UNSTRUCTURED_GRID
POINTS 4 float
0 0 0
1 0 0
0 1 0
0 0 1
CELLS 1 5
4 0 1 2 3
CELL_TYPES 1
10
POINT_DATA 4
SCALARS Mach float 1
LOOKUP_TABLE default
0.5 0.5 0.5 1
";

const STREAMLINES: &str = r#""IntegrationTime","Mach","Points:0","Points:1","Points:2"
0,0.5,0.25,0,0.1
0.001,0.55,0.3,0,0.1
0.002,0.6,0.35,0,0.1
0,0.5,0.25,0,0.1
-0.001,0.45,0.2,0,0.1
0,0.7,0.5,0.25,0.1
0,0.8,0.75,-0.25,0.1
0.001,0.85,0.8,-0.25,0.1
"#;

fn write_case(root: &Path, case: &str) {
    let dir = root.join("in").join(case);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("wing.vtk"), WING).unwrap();
    fs::write(dir.join("wing.vtu"), WING_VTU).unwrap();
    fs::write(dir.join("block.vtk"), BLOCK).unwrap();
    fs::write(dir.join("streamlines.csv"), STREAMLINES).unwrap();
}

fn config(root: &Path, cases: &[&str]) -> CaseConfig {
    config_with_wing(root, cases, "wing.vtk")
}

fn config_with_wing(root: &Path, cases: &[&str], wing: &str) -> CaseConfig {
    let cases: Vec<String> = cases.iter().map(|c| format!("'{}'", c)).collect();
    format!(
        r#"
        cases = [{cases}]

        [paths]
        input_root = '{input}'
        output_root = '{output}'
        browser_root = 'assets/deltawing'

        [[surface]]
        component = "wing"
        label = "Delta wing"
        source = '{wing}'

        [[volume]]
        component = "block"
        label = "Isosurface"
        source = "block.vtk"

        [[streamlines]]
        source = "streamlines.csv"
        output = "streamlines/vortex.json"
        write_summary = true
        "#,
        cases = cases.join(", "),
        input = root.join("in").display(),
        output = root.join("out").display(),
        wing = wing,
    )
    .parse()
    .unwrap()
}

#[test]
fn test_convert_case() {
    let dir = tempdir().unwrap();
    write_case(dir.path(), "case_a");
    let config = config(dir.path(), &["case_a"]);

    let report = convert_case(&config, "case_a").unwrap();
    assert_eq!(report.components.len(), 2);
    assert_eq!(report.streamlines.len(), 1);

    let out = dir.path().join("out").join("case_a");

    // Wing: triangles reversed, float32 vertices, int32 indices
    let indices = read_array(out.join("wing/indices.bin"), ElementType::Int32, Some(6)).unwrap();
    assert_eq!(indices, NumericArray::Int(vec![3, 1, 0, 3, 2, 1]));
    let vertices = read_array(out.join("wing/vertices.bin"), ElementType::Float32, Some(12)).unwrap();
    assert_eq!(vertices.to_f64()[3..6], [1.0, 0.0, 0.0]);
    let mach = read_array(out.join("wing/mach.bin"), ElementType::Float32, None).unwrap();
    assert_eq!(mach, NumericArray::Float(vec![0.5, 0.75, 0.5, 0.25]));

    let wing: serde_json::Value =
        serde_json::from_reader(File::open(out.join("wing/config.json")).unwrap()).unwrap();
    assert_eq!(wing["name"], "Delta wing");
    assert_eq!(wing["domain"]["x"], serde_json::json!([0.0, 1.0]));
    assert_eq!(wing["domain"]["z"], serde_json::json!([0.0, 0.25]));
    assert_eq!(wing["domain"]["mach"], serde_json::json!([0.25, 0.75]));
    assert_eq!(wing["indices"], "./assets/deltawing/case_a/wing/indices.bin");

    // Block: raw tetra connectivity, winding untouched
    let block = read_array(out.join("block/indices.bin"), ElementType::Int32, None).unwrap();
    assert_eq!(block, NumericArray::Int(vec![0, 1, 2, 3]));

    // Streamlines: two lines, lone seed dropped
    let json = out.join("streamlines/vortex.json");
    let collection = StreamlineCollection::from_json_file(&json).unwrap();
    assert_eq!(collection.len(), 2);
    let first = &collection.to_arrays()[0];
    assert_eq!(first.integration_time, vec![-0.001, 0.0, 0.001, 0.002]);
    assert_eq!(first.values, vec![0.45, 0.5, 0.55, 0.6]);

    let summary: serde_json::Value = serde_json::from_reader(
        File::open(out.join("streamlines/vortex.summary.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(summary["lines"], 2);
    assert_eq!(summary["integration_span"], serde_json::json!([-0.001, 0.002]));

    let validation = validate_streamline_file(&json, None).unwrap();
    assert!(!validation.has_failures());
}

#[test]
fn test_convert_case_from_vtu_surface() {
    let dir = tempdir().unwrap();
    write_case(dir.path(), "case_a");
    let config = config_with_wing(dir.path(), &["case_a"], "wing.vtu");

    convert_case(&config, "case_a").unwrap();

    let out = dir.path().join("out/case_a/wing");
    let indices = read_array(out.join("indices.bin"), ElementType::Int32, Some(6)).unwrap();
    assert_eq!(indices, NumericArray::Int(vec![3, 1, 0, 3, 2, 1]));
    let mach = read_array(out.join("mach.bin"), ElementType::Float32, Some(4)).unwrap();
    assert_eq!(mach, NumericArray::Float(vec![0.5, 0.75, 0.5, 0.25]));

    let wing: serde_json::Value =
        serde_json::from_reader(File::open(out.join("config.json")).unwrap()).unwrap();
    assert_eq!(wing["domain"]["y"], serde_json::json!([-0.5, 0.5]));
}

#[test]
fn test_convert_all_cases() {
    let dir = tempdir().unwrap();
    write_case(dir.path(), "case_a");
    write_case(dir.path(), "case_b");
    let config = config(dir.path(), &["case_a", "case_b"]);

    let reports = convert_all(&config, &[]).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(dir.path().join("out/case_b/wing/config.json").exists());

    // Explicit selection overrides the configured list
    let reports = convert_all(&config, &["case_b".to_string()]).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].case, "case_b");
    assert!(reports[0].to_string().starts_with("Case case_b"));
}

#[test]
fn test_missing_streamline_column_aborts_the_case() {
    let dir = tempdir().unwrap();
    write_case(dir.path(), "case_a");
    fs::write(
        dir.path().join("in/case_a/streamlines.csv"),
        "\"Mach\",\"Points:0\",\"Points:1\",\"Points:2\"\n0.5,0,0,0\n",
    )
    .unwrap();
    let config = config(dir.path(), &["case_a"]);

    let err = convert_case(&config, "case_a").unwrap_err();
    match err {
        CaseError::StreamlineError { error, .. } => {
            assert!(matches!(error, StreamlineError::MissingColumn(ref c) if c == "IntegrationTime"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_mesh_scalar_aborts_the_case() {
    let dir = tempdir().unwrap();
    write_case(dir.path(), "case_a");
    fs::write(
        dir.path().join("in/case_a/wing.vtk"),
        WING.replace("SCALARS Mach", "SCALARS Pressure"),
    )
    .unwrap();
    let config = config(dir.path(), &["case_a"]);

    let err = convert_case(&config, "case_a").unwrap_err();
    assert!(matches!(err, CaseError::MeshError { .. }));
    assert!(err.to_string().contains("Mach"));
}

#[test]
fn test_missing_case_directory() {
    let dir = tempdir().unwrap();
    let config = config(dir.path(), &["absent"]);

    assert!(convert_all(&config, &[]).is_err());
}
