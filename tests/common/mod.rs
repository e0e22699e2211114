#![allow(dead_code)]

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub const ROWS: usize = 16;
pub const COLS: usize = 7;
pub const TITLE: &str = "LOG SHEET OF WORK PERFORMED DURING INTERNSHIP";

/// Output location for a test: tests/output/<name>. Any previous file is removed.
pub fn output_path(name: &str) -> PathBuf {
    let path = PathBuf::from("tests/output").join(name);
    if path.is_dir() {
        fs::remove_dir_all(&path).ok();
    } else {
        fs::remove_file(&path).ok();
    }
    path
}

/// Generate a fresh log sheet at tests/output/<dir>/log_sheet.docx.
pub fn generate_fixture(dir: &str) -> PathBuf {
    let _ = env_logger::try_init();
    let path = output_path(dir).join("log_sheet.docx");
    logsheet_docx::generate(&path).expect("generate log sheet");
    path
}

pub fn read_part(docx: &Path, name: &str) -> String {
    let file = fs::File::open(docx).expect("open docx");
    let mut zip = zip::ZipArchive::new(file).expect("docx is a ZIP archive");
    let mut content = String::new();
    zip.by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"))
        .read_to_string(&mut content)
        .expect("read part");
    content
}

pub fn part_names(docx: &Path) -> Vec<String> {
    let file = fs::File::open(docx).expect("open docx");
    let zip = zip::ZipArchive::new(file).expect("docx is a ZIP archive");
    zip.file_names().map(String::from).collect()
}

pub fn wml_children<'a>(
    node: roxmltree::Node<'a, 'a>,
    name: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'a>> + 'a {
    node.children()
        .filter(move |n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

pub fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &'a str) -> Option<roxmltree::Node<'a, 'a>> {
    wml_children(node, name).next()
}

pub fn wml_val<'a>(node: roxmltree::Node<'a, 'a>, attr: &str) -> Option<&'a str> {
    node.attribute((WML_NS, attr))
}
