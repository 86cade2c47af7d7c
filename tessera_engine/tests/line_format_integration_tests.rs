//! Integration tests for line-format parsing and reconciliation
//!
//! Device-free: only the public parser and reconciler are exercised.
//!
//! Run with: cargo test --test line_format_integration_tests

use tessera_engine::tessera::import::{parse_line_format, reconcile, reconcile_strict};
use tessera_engine::tessera::{Error, ParseErrorKind};

// ============================================================================
// FIXTURES
// ============================================================================

const TRIANGLE: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
vt 0 0
vt 1 0
vt 1 1
f 1/1 2/2 3/3
";

/// Unit cube, 8 shared corners, 12 triangles, per-position UVs and normals
const CUBE: &str = "\
# cube
o cube
v -1 -1 -1
v  1 -1 -1
v  1  1 -1
v -1  1 -1
v -1 -1  1
v  1 -1  1
v  1  1  1
v -1  1  1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vt 0.5 0
vt 0.5 1
vt 0 0.5
vt 1 0.5
vn -0.577 -0.577 -0.577
vn  0.577 -0.577 -0.577
vn  0.577  0.577 -0.577
vn -0.577  0.577 -0.577
vn -0.577 -0.577  0.577
vn  0.577 -0.577  0.577
vn  0.577  0.577  0.577
vn -0.577  0.577  0.577
s off
f 1/1/1 3/3/3 2/2/2
f 1/1/1 4/4/4 3/3/3
f 5/5/5 6/6/6 7/7/7
f 5/5/5 7/7/7 8/8/8
f 1/1/1 2/2/2 6/6/6
f 1/1/1 6/6/6 5/5/5
f 4/4/4 8/8/8 7/7/7
f 4/4/4 7/7/7 3/3/3
f 1/1/1 5/5/5 8/8/8
f 1/1/1 8/8/8 4/4/4
f 2/2/2 3/3/3 7/7/7
f 2/2/2 7/7/7 6/6/6
";

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn test_integration_triangle_scenario() {
    let data = parse_line_format(TRIANGLE).unwrap();
    let mesh = reconcile(&data).unwrap();

    assert_eq!(mesh.positions, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
    assert_eq!(mesh.uvs, vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
}

#[test]
fn test_integration_cube_shares_vertices() {
    let data = parse_line_format(CUBE).unwrap();
    assert_eq!(data.triangle_count(), 12);

    let mesh = reconcile_strict(&data).unwrap();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.index_count(), 36);
    assert_eq!(&mesh.normals[18..21], &[0.577, 0.577, 0.577]);
    assert_eq!(&mesh.uvs[8..10], &[0.5, 0.0]);
    assert!(mesh.validate().is_ok());
}

#[test]
fn test_integration_errors_carry_line_numbers() {
    let cases: [(&str, usize); 4] = [
        ("v 0 0 0\nv 0 0\n", 2),
        ("v 0 0 0\n\n# c\nvn 0 x 1\n", 4),
        ("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3 4\n", 5),
        ("v 0 0 0\nf 1 1 9\n", 2),
    ];

    for (source, expected_line) in cases {
        match parse_line_format(source) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, expected_line, "source: {:?}", source),
            other => panic!("Expected parse error for {:?}, got {:?}", source, other.map(|d| d.faces.len())),
        }
    }
}

#[test]
fn test_integration_out_of_range_uv() {
    let result = parse_line_format("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/2 3/1\n");

    match result {
        Err(Error::Parse { line: 5, kind: ParseErrorKind::IndexOutOfRange { attribute, index, len } }) => {
            assert_eq!(attribute, "uv");
            assert_eq!(index, 1);
            assert_eq!(len, 1);
        }
        other => panic!("Expected out-of-range uv, got {:?}", other.map(|d| d.faces.len())),
    }
}
