mod common;

use std::fs;
use std::path::Path;

#[test]
fn creates_missing_parent_directories() {
    let _ = env_logger::try_init();
    let root = common::output_path("nested_output");
    let path = root.join("a").join("b").join("c").join("sheet.docx");
    assert!(!root.exists());

    logsheet_docx::generate(&path).expect("generate into nested directories");
    assert!(path.is_file());
    let summary = logsheet_docx::inspect(&path).expect("readable package");
    assert_eq!(summary.row_count(), common::ROWS);
}

#[test]
fn regenerating_overwrites_existing_file() {
    let _ = env_logger::try_init();
    let path = common::output_path("overwrite").join("sheet.docx");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"stale content that is not a docx").unwrap();

    logsheet_docx::generate(&path).unwrap();
    let first = fs::read(&path).unwrap();
    assert!(first.starts_with(b"PK"));
    let first_summary = logsheet_docx::inspect(&path).unwrap();

    logsheet_docx::generate(&path).unwrap();
    assert_eq!(logsheet_docx::inspect(&path).unwrap(), first_summary);
    let rendered = logsheet_docx::render().unwrap();
    assert_eq!(logsheet_docx::inspect_bytes(&rendered).unwrap(), first_summary);
}

#[test]
fn package_contains_wordprocessing_parts() {
    let path = common::generate_fixture("package_parts");
    let names = common::part_names(&path);
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/_rels/document.xml.rels",
        "word/document.xml",
        "word/styles.xml",
    ] {
        assert!(names.iter().any(|n| n == part), "missing {part} in {names:?}");
    }

    let content_types = common::read_part(&path, "[Content_Types].xml");
    assert!(content_types.contains("wordprocessingml.document.main+xml"));
    let rels = common::read_part(&path, "_rels/.rels");
    assert!(rels.contains("word/document.xml"));
    let styles = common::read_part(&path, "word/styles.xml");
    assert!(roxmltree::Document::parse(&styles).is_ok());
    assert!(styles.contains("Times New Roman"));
}

#[test]
fn default_output_path_is_in_crate_root() {
    let path = logsheet_docx::default_output_path();
    assert!(path.ends_with(logsheet_docx::DEFAULT_FILE_NAME));
    assert_eq!(path.parent(), Some(Path::new(env!("CARGO_MANIFEST_DIR"))));
}

#[test]
fn page_geometry_is_a4_with_narrow_margins() {
    let path = common::generate_fixture("page_geometry");
    let doc = logsheet_docx::read_document(&path).unwrap();
    let s = &doc.section;
    let inches = |pt: f32| pt / 72.0;
    assert!((inches(s.page_width) - 8.27).abs() < 0.001);
    assert!((inches(s.page_height) - 11.69).abs() < 0.001);
    assert!((inches(s.margin_left) - 0.4).abs() < 0.001);
    assert!((inches(s.margin_right) - 0.4).abs() < 0.001);
    assert!((inches(s.margin_top) - 0.35).abs() < 0.001);
    assert!((inches(s.margin_bottom) - 0.35).abs() < 0.001);

    let xml_content = common::read_part(&path, "word/document.xml");
    let xml = roxmltree::Document::parse(&xml_content).unwrap();
    let body = common::wml(xml.root_element(), "body").unwrap();
    let pg_sz = common::wml(common::wml(body, "sectPr").unwrap(), "pgSz").unwrap();
    assert_eq!(common::wml_val(pg_sz, "w"), Some("11909"));
    assert_eq!(common::wml_val(pg_sz, "h"), Some("16834"));
}

#[test]
fn table_fits_on_one_page() {
    let path = common::generate_fixture("page_fit");
    let doc = logsheet_docx::read_document(&path).unwrap();
    let table = doc.tables().next().unwrap();
    let s = &doc.section;

    let width: f32 = table.col_widths.iter().sum();
    assert!(width <= s.page_width - s.margin_left - s.margin_right);
    let height: f32 = table.rows.iter().filter_map(|r| r.height).sum();
    assert!(height <= s.page_height - s.margin_top - s.margin_bottom);
}

#[test]
fn unwritable_parent_is_an_io_error() {
    let blocker = common::output_path("not_a_directory");
    fs::create_dir_all(blocker.parent().unwrap()).unwrap();
    fs::write(&blocker, b"plain file").unwrap();

    let err = logsheet_docx::generate(&blocker.join("sheet.docx")).unwrap_err();
    assert!(matches!(err, logsheet_docx::Error::Io(_)), "got {err}");
    assert!(err.to_string().contains("not_a_directory"), "got {err}");
}

#[test]
fn reading_a_non_docx_is_rejected() {
    let path = common::output_path("garbage.docx");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"definitely not a zip").unwrap();
    let err = logsheet_docx::inspect(&path).unwrap_err();
    assert!(matches!(err, logsheet_docx::Error::InvalidDocx(_)), "got {err}");

    let err = logsheet_docx::inspect_bytes(b"still not a zip").unwrap_err();
    assert!(matches!(err, logsheet_docx::Error::InvalidDocx(_)));
}
