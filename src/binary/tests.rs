use super::*;
use tempfile::tempdir;

#[test]
fn test_element_type_names() {
    assert_eq!("float32".parse::<ElementType>().unwrap(), ElementType::Float32);
    assert_eq!("Int32".parse::<ElementType>().unwrap(), ElementType::Int32);
    assert!(matches!(
        "float64".parse::<ElementType>(),
        Err(BinaryError::UnsupportedElementType(_))
    ));
    assert_eq!(ElementType::Int32.to_string(), "int32");
}

#[test]
fn test_encode_is_headerless_native_endian() {
    let bytes = encode(&NumericArray::Int(vec![1, -2, 3]), ElementType::Int32).unwrap();
    assert_eq!(bytes.len(), 12);
    assert_eq!(&bytes[..4], &1i32.to_ne_bytes());
    assert_eq!(&bytes[4..8], &(-2i32).to_ne_bytes());

    let bytes = encode(&NumericArray::Float(vec![0.5]), ElementType::Float32).unwrap();
    assert_eq!(bytes, 0.5f32.to_ne_bytes().to_vec());
}

#[test]
fn test_int_roundtrip_is_exact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("indices.bin");
    let values = NumericArray::Int(vec![0, 1, 2, 2, 1, 3, i32::MAX as i64, i32::MIN as i64]);

    let written = write_array(&path, &values, ElementType::Int32).unwrap();
    assert_eq!(written, 32);

    let restored = read_array(&path, ElementType::Int32, Some(8)).unwrap();
    assert_eq!(restored, values);
}

#[test]
fn test_float_roundtrip_within_f32_precision() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mach.bin");
    let values = vec![0.1, 0.523456789, -12.75, 1e-3];

    write_array(&path, &NumericArray::Float(values.clone()), ElementType::Float32).unwrap();
    let restored = read_array(&path, ElementType::Float32, None).unwrap().to_f64();

    assert_eq!(restored.len(), values.len());
    for (a, b) in values.iter().zip(&restored) {
        assert_eq!(*b, *a as f32 as f64);
    }
}

#[test]
fn test_indices_can_be_stored_as_float() {
    let bytes = encode(&NumericArray::Int(vec![7]), ElementType::Float32).unwrap();
    assert_eq!(bytes, 7.0f32.to_ne_bytes().to_vec());
}

#[test]
fn test_out_of_range_int_is_schema_mismatch() {
    let err = encode(&NumericArray::Int(vec![0, i64::from(i32::MAX) + 1]), ElementType::Int32).unwrap_err();
    assert!(matches!(err, BinaryError::SchemaMismatch { index: 1, .. }));
}

#[test]
fn test_fractional_float_cannot_become_int32() {
    assert!(encode(&NumericArray::Float(vec![1.0, 2.0]), ElementType::Int32).is_ok());

    let err = encode(&NumericArray::Float(vec![1.0, 2.5]), ElementType::Int32).unwrap_err();
    assert!(matches!(err, BinaryError::SchemaMismatch { index: 1, .. }));

    let err = encode(&NumericArray::Float(vec![f64::NAN]), ElementType::Int32).unwrap_err();
    assert!(matches!(err, BinaryError::SchemaMismatch { index: 0, .. }));
}

#[test]
fn test_decode_rejects_bad_lengths() {
    let err = decode(&[0u8; 7], ElementType::Float32, None).unwrap_err();
    assert!(matches!(err, BinaryError::InvalidLength { actual: 7, .. }));

    let err = decode(&[0u8; 8], ElementType::Int32, Some(3)).unwrap_err();
    assert!(matches!(err, BinaryError::InvalidLength { expected: 12, actual: 8 }));
}

#[test]
fn test_stats() {
    let stats = NumericArray::Int(vec![4, -1, 9]).stats();
    assert_eq!(stats.len, 3);
    assert_eq!(stats.min, Some(-1.0));
    assert_eq!(stats.max, Some(9.0));
    assert_eq!(stats.to_string(), "3 elements, range [-1, 9]");

    assert_eq!(NumericArray::Float(vec![]).stats().to_string(), "0 elements");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_i32_roundtrip(values in prop::collection::vec(any::<i32>(), 0..200)) {
            let array = NumericArray::Int(values.iter().map(|&v| v as i64).collect());
            let bytes = encode(&array, ElementType::Int32).unwrap();
            let decoded = decode(&bytes, ElementType::Int32, Some(values.len())).unwrap();
            prop_assert_eq!(decoded, array);
        }

        #[test]
        fn test_f32_roundtrip(values in prop::collection::vec(any::<f32>().prop_filter("finite", |v| v.is_finite()), 0..200)) {
            let array = NumericArray::Float(values.iter().map(|&v| v as f64).collect());
            let bytes = encode(&array, ElementType::Float32).unwrap();
            let decoded = decode(&bytes, ElementType::Float32, None).unwrap();
            prop_assert_eq!(decoded, array);
        }
    }
}
