//! FILENAME: sparse-grid/tests/test_roundtrip.rs
//! Property tests for the sparse codec round-trip and minimality invariants.

use proptest::prelude::*;
use sparse_grid::{CellValue, DenseGrid, SparseSheet};

/// Strategy for one optional cell: mostly absent, like the real templates.
fn arb_cell() -> impl Strategy<Value = Option<CellValue>> {
    prop_oneof![
        6 => Just(Option::<CellValue>::None),
        2 => any::<i64>().prop_map(|n| Some(CellValue::from(n))),
        1 => "[a-zA-Z0-9 ]{0,12}".prop_map(|s| Some(CellValue::Text(s))),
        1 => any::<bool>().prop_map(|b| Some(CellValue::Boolean(b))),
    ]
}

/// Strategy for a rectangular grid, including 0x0 and single-cell shapes.
fn arb_grid() -> impl Strategy<Value = DenseGrid> {
    (0usize..12, 0usize..12).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(proptest::collection::vec(arb_cell(), cols), rows)
            .prop_map(DenseGrid::from_rows)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// decode(encode(g)) == g for every rectangular grid, element-wise,
    /// absent cells included.
    #[test]
    fn encode_decode_round_trips(grid in arb_grid()) {
        let sparse = SparseSheet::encode(&grid).expect("rectangular input");
        let dense = sparse.decode().expect("in-bounds by construction");
        prop_assert_eq!(dense, grid);
    }

    /// The sparse form never contains an empty row map, and its cell count
    /// matches the number of non-absent cells in the input.
    #[test]
    fn encode_is_minimal(grid in arb_grid()) {
        let sparse = SparseSheet::encode(&grid).expect("rectangular input");
        for row_data in sparse.data.values() {
            prop_assert!(!row_data.is_empty());
        }
        prop_assert_eq!(sparse.cell_count(), grid.stored_cells());
    }

    /// JSON serialization of the sparse form is itself lossless.
    #[test]
    fn sparse_json_round_trips(grid in arb_grid()) {
        let sparse = SparseSheet::encode(&grid).expect("rectangular input");
        let json = serde_json::to_string(&sparse).expect("serialize");
        let back: SparseSheet = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(back, sparse);
    }
}

#[test]
fn all_present_grid_round_trips() {
    let grid = DenseGrid::from_rows(vec![
        vec![Some(CellValue::from(1)), Some(CellValue::from(2))],
        vec![Some(CellValue::from(3)), Some(CellValue::from(4))],
    ]);
    let sparse = SparseSheet::encode(&grid).unwrap();
    assert_eq!(sparse.cell_count(), 4);
    assert_eq!(sparse.decode().unwrap(), grid);
}

#[test]
fn all_absent_grid_round_trips() {
    let grid = DenseGrid::from_rows(vec![vec![None; 4]; 3]);
    let sparse = SparseSheet::encode(&grid).unwrap();
    assert!(sparse.data.is_empty());
    assert_eq!(sparse.meta.rows, 3);
    assert_eq!(sparse.meta.cols, 4);
    assert_eq!(sparse.decode().unwrap(), grid);
}
