use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "logsheet-docx")]
#[command(version)]
#[command(
    about = "Generate the internship work-hours log sheet as a DOCX table",
    long_about = None
)]
struct Cli {
    /// Output DOCX file
    /// (defaults to Log_Sheet_Work_Performed_During_Internship.docx in the crate root)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Read the written file back and print its table layout
    #[arg(long)]
    inspect: bool,
}

fn run(cli: Cli) -> Result<(), logsheet_docx::Error> {
    let output = cli
        .output
        .unwrap_or_else(logsheet_docx::default_output_path);

    logsheet_docx::generate(&output)?;
    println!("Wrote: {}", output.display());

    if cli.inspect {
        let summary = logsheet_docx::inspect(&output)?;
        print!("{summary}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
