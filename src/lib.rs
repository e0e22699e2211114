mod docx;
mod error;
pub mod grid;
mod inspect;
mod log_sheet;
pub mod model;

pub use error::Error;
pub use inspect::{CellSummary, TableSummary};
pub use log_sheet::build_document;

use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name used when no output path is given.
pub const DEFAULT_FILE_NAME: &str = "Log_Sheet_Work_Performed_During_Internship.docx";

pub fn default_output_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_FILE_NAME)
}

fn with_path(e: std::io::Error, path: &Path) -> Error {
    Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())))
}

/// Build the log sheet and serialize it into DOCX bytes.
pub fn render() -> Result<Vec<u8>, Error> {
    let doc = build_document()?;
    docx::to_bytes(&doc)
}

/// Write the log sheet to `output`, creating missing parent directories and
/// overwriting any existing file.
pub fn generate(output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let doc = build_document()?;
    let t_build = t0.elapsed();

    let bytes = docx::to_bytes(&doc)?;
    let t_render = t0.elapsed();

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| with_path(e, parent))?;
    }
    std::fs::write(output, &bytes).map_err(|e| with_path(e, output))?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: build={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_build.as_secs_f64() * 1000.0,
        (t_render - t_build).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

/// Summarize the first table of the DOCX at `path`.
pub fn inspect(path: &Path) -> Result<TableSummary, Error> {
    let doc = docx::parse(path)?;
    TableSummary::from_document(&doc)
        .ok_or_else(|| Error::InvalidDocx(format!("{} contains no table", path.display())))
}

/// Summarize the first table of an in-memory DOCX.
pub fn inspect_bytes(data: &[u8]) -> Result<TableSummary, Error> {
    let doc = docx::parse_bytes(data)?;
    TableSummary::from_document(&doc)
        .ok_or_else(|| Error::InvalidDocx("document contains no table".into()))
}

/// Parse the DOCX at `path` back into the document model.
pub fn read_document(path: &Path) -> Result<model::Document, Error> {
    docx::parse(path)
}
