use super::*;
use tempfile::tempdir;

fn wing() -> SurfaceMesh {
    SurfaceMesh {
        vertices: vec![0.0, -0.5, 0.0, 1.0, 0.5, 0.0, 1.0, 0.0, 0.125],
        indices: vec![0, 1, 2],
        scalars: vec![0.3, 0.9, 0.5],
    }
}

#[test]
fn test_domain_of_surface() {
    let domain = Domain::of_surface(&wing(), "mach").unwrap();
    let keys: Vec<&str> = domain.entries().iter().map(|(k, _)| k.as_str()).collect();

    assert_eq!(keys, vec!["x", "y", "z", "mach"]);
    assert_eq!(domain.get("y"), Some([-0.5, 0.5]));
    assert_eq!(domain.get("mach"), Some([0.3, 0.9]));
    assert_eq!(domain.get("pressure"), None);
}

#[test]
fn test_domain_of_nan_scalars_fails() {
    let mut mesh = SurfaceMesh {
        vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        indices: vec![0, 1, 2],
        scalars: vec![0.5, f64::NAN, 0.75],
    };
    let err = Domain::of_surface(&mesh, "mach").unwrap_err();
    assert!(matches!(err, ComponentError::NonFiniteDomain(ref k) if k == "mach"));

    mesh.scalars[1] = f64::INFINITY;
    assert!(Domain::of_surface(&mesh, "mach").is_err());
}

#[test]
fn test_domain_of_empty_mesh_fails() {
    let err = Domain::of_surface(&SurfaceMesh::default(), "mach").unwrap_err();
    assert!(matches!(err, ComponentError::EmptyArray(ref k) if k == "x"));
}

#[test]
fn test_config_key_order() {
    let config = ComponentConfig {
        name: "Delta wing".to_string(),
        domain: Some(Domain::new().with("x", [0.0, 1.0]).with("mach", [0.5, 0.75])),
        arrays: vec![
            ("vertices".to_string(), "./a/vertices.bin".to_string()),
            ("indices".to_string(), "./a/indices.bin".to_string()),
        ],
    };
    let mut buffer = Vec::new();
    config.to_writer(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let name = text.find("\"name\"").unwrap();
    let domain = text.find("\"domain\"").unwrap();
    let vertices = text.find("\"vertices\"").unwrap();
    let indices = text.find("\"indices\"").unwrap();
    assert!(name < domain && domain < vertices && vertices < indices);
    assert!(text.lines().all(|l| !l.starts_with(' ')));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["domain"]["mach"], serde_json::json!([0.5, 0.75]));
}

#[test]
fn test_config_without_domain() {
    let config = ComponentConfig {
        name: "Isosurface".to_string(),
        domain: None,
        arrays: vec![],
    };
    let mut buffer = Vec::new();
    config.to_writer(&mut buffer).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

    assert_eq!(value, serde_json::json!({"name": "Isosurface"}));
}

#[test]
fn test_array_url() {
    let writer = ComponentWriter::new("wing", "/tmp/unused", "./assets/deltawing/case/wing/");
    assert_eq!(writer.array_url("mach"), "./assets/deltawing/case/wing/mach.bin");
}

#[test]
fn test_write_component() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("case").join("wing");
    let writer = ComponentWriter::new("wing", &output, "./assets/deltawing/case/wing");

    let mesh = wing();
    let domain = Domain::of_surface(&mesh, "mach").unwrap();
    let stats = writer
        .write("Delta wing", Some(domain), &BinaryArray::surface(&mesh, "mach"))
        .unwrap();

    assert_eq!(stats.arrays_written, 3);
    assert_eq!(stats.bytes_written, 9 * 4 + 3 * 4 + 3 * 4);
    assert_eq!(stats.config_path, output.join(CONFIG_FILE_NAME));

    let indices = binary::read_array(output.join("indices.bin"), ElementType::Int32, None).unwrap();
    assert_eq!(indices, NumericArray::Int(vec![0, 1, 2]));

    let config: serde_json::Value =
        serde_json::from_reader(File::open(&stats.config_path).unwrap()).unwrap();
    assert_eq!(config["name"], "Delta wing");
    assert_eq!(config["mach"], "./assets/deltawing/case/wing/mach.bin");
    assert_eq!(config["domain"]["z"], serde_json::json!([0.0, 0.125]));
}

#[test]
fn test_duplicate_array_names_are_rejected() {
    let dir = tempdir().unwrap();
    let writer = ComponentWriter::new("wing", dir.path(), "./wing");
    let arrays = vec![
        BinaryArray::float32("mach", vec![1.0]),
        BinaryArray::float32("mach", vec![2.0]),
    ];

    let err = writer.write("Delta wing", None, &arrays).unwrap_err();
    assert!(matches!(err, ComponentError::DuplicateArray(ref n) if n == "mach"));
}

#[test]
fn test_reserved_array_names_are_rejected() {
    let dir = tempdir().unwrap();
    let writer = ComponentWriter::new("wing", dir.path().join("wing"), "./wing");

    for reserved in RESERVED_KEYS {
        let arrays = vec![BinaryArray::float32(reserved, vec![1.0])];
        let err = writer.write("Delta wing", None, &arrays).unwrap_err();
        assert!(matches!(err, ComponentError::ReservedArrayName(ref n) if n == reserved));
    }
    assert!(!dir.path().join("wing").exists());
}

#[test]
fn test_uncastable_array_fails_the_component() {
    let dir = tempdir().unwrap();
    let writer = ComponentWriter::new("block", dir.path(), "./block");
    let arrays = vec![BinaryArray::int32("indices", vec![0.5f64])];

    let err = writer.write("Isosurface", None, &arrays).unwrap_err();
    assert!(matches!(err, ComponentError::BinaryError(_)));
}
