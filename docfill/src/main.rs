//! Generate a DOCX document from a `KEY=value` file and a DOCX template.
//!
//! Placeholders in the template are Jinja expressions matching the keys
//! exactly (case-sensitive), e.g. `Dear {{ FIRSTNAME }} {{ LASTNAME }},`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use docfill::error::DocfillError;
use docfill::exit_codes;
use docfill::generate::{GenerateOptions, generate};
use docfill::io::config::resolve_config;
use docfill::logging;

#[derive(Parser, Debug)]
#[command(
    name = "docfill",
    version,
    about = "Generate DOCX from a key=value file and a DOCX template"
)]
struct Cli {
    /// Path to the key=value text file.
    #[arg(short, long)]
    kvfile: PathBuf,

    /// Path to the DOCX template (Jinja placeholders matching the keys).
    #[arg(short, long)]
    template: PathBuf,

    /// Output directory [default: output_docs].
    #[arg(short, long)]
    outdir: Option<PathBuf>,

    /// Output filename (overrides automatic naming).
    #[arg(short, long)]
    name: Option<String>,

    /// TOML config file [default: ./docfill.toml if present].
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail when a placeholder has no value in the kv file.
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn into_options(self) -> Result<GenerateOptions, DocfillError> {
        let config = resolve_config(self.config.as_deref()).map_err(DocfillError::Config)?;
        let mut options = GenerateOptions::from_config(self.kvfile, self.template, &config);
        if let Some(outdir) = self.outdir {
            options.outdir = outdir;
        }
        options.name = self.name;
        options.strict |= self.strict;
        Ok(options)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                exit_codes::INVALID
            } else {
                exit_codes::OK
            };
            return exit_code(code);
        }
    };
    logging::init();

    match cli.into_options().and_then(|options| generate(&options)) {
        Ok(generated) => {
            println!("Generated: {}", generated.path.display());
            exit_code(exit_codes::OK)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            exit_code(err.exit_code())
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
