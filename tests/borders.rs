mod common;

use common::{COLS, ROWS, wml, wml_children, wml_val};

const THIN: &str = "4";
const THICK: &str = "12";

#[test]
fn every_cell_has_explicit_borders_with_thick_frame() {
    let path = common::generate_fixture("borders");
    let xml_content = common::read_part(&path, "word/document.xml");
    let xml = roxmltree::Document::parse(&xml_content).expect("document.xml parses");
    let body = wml(xml.root_element(), "body").expect("w:body");
    let tbl = wml(body, "tbl").expect("w:tbl");

    let rows: Vec<_> = wml_children(tbl, "tr").collect();
    assert_eq!(rows.len(), ROWS);

    let mut failures = Vec::new();
    for (ri, tr) in rows.iter().enumerate() {
        let mut grid_col = 0usize;
        for tc in wml_children(*tr, "tc") {
            let tc_pr = wml(tc, "tcPr").expect("w:tcPr");
            let span: usize = wml(tc_pr, "gridSpan")
                .and_then(|n| wml_val(n, "val"))
                .map(|v| v.parse().unwrap())
                .unwrap_or(1);
            let borders = wml(tc_pr, "tcBorders").expect("w:tcBorders");

            let expected = [
                ("top", ri == 0),
                ("bottom", ri == 0 || ri == ROWS - 1),
                ("left", grid_col == 0),
                ("right", grid_col + span == COLS),
            ];
            for (edge, thick) in expected {
                let Some(node) = wml(borders, edge) else {
                    failures.push(format!("({ri}, {grid_col}) missing {edge} border"));
                    continue;
                };
                assert_eq!(wml_val(node, "val"), Some("single"));
                assert_eq!(wml_val(node, "color"), Some("000000"));
                let want = if thick { THICK } else { THIN };
                if wml_val(node, "sz") != Some(want) {
                    failures.push(format!(
                        "({ri}, {grid_col}) {edge}: sz={:?}, expected {want}",
                        wml_val(node, "sz")
                    ));
                }
            }
            grid_col += span;
        }
        assert_eq!(grid_col, COLS, "row {ri} spans {grid_col} columns");
    }

    if !failures.is_empty() {
        for f in &failures {
            println!("  - {f}");
        }
        panic!("{} border mismatches", failures.len());
    }
}

#[test]
fn table_uses_fixed_layout_grid() {
    let path = common::generate_fixture("borders_grid");
    let xml_content = common::read_part(&path, "word/document.xml");
    let xml = roxmltree::Document::parse(&xml_content).unwrap();
    let body = wml(xml.root_element(), "body").unwrap();
    let tbl = wml(body, "tbl").unwrap();
    let tbl_pr = wml(tbl, "tblPr").unwrap();
    let layout = wml(tbl_pr, "tblLayout").expect("w:tblLayout");
    assert_eq!(wml_val(layout, "type"), Some("fixed"));

    let grid: Vec<&str> = wml_children(wml(tbl, "tblGrid").unwrap(), "gridCol")
        .filter_map(|n| wml_val(n, "w"))
        .collect();
    assert_eq!(grid, ["1152", "864", "864", "1008", "4277", "1296", "1296"]);
}
