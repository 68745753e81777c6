//! One docfill run: check inputs, parse, name, render.

use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use tracing::{debug, info};

use crate::core::filename::output_filename;
use crate::error::DocfillError;
use crate::io::config::DocfillConfig;
use crate::io::docx::{RenderOptions, render_docx};
use crate::io::kv_file::load_context;

/// Resolved inputs of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub kv_path: PathBuf,
    pub template_path: PathBuf,
    pub outdir: PathBuf,
    /// Output filename used verbatim instead of the derived one.
    pub name: Option<String>,
    pub max_filename_len: usize,
    pub name_keys: Vec<String>,
    pub strict: bool,
}

impl GenerateOptions {
    /// Options for `kv_path`/`template_path` with the remaining values from `config`.
    pub fn from_config(kv_path: PathBuf, template_path: PathBuf, config: &DocfillConfig) -> Self {
        Self {
            kv_path,
            template_path,
            outdir: config.outdir.clone(),
            name: None,
            max_filename_len: config.max_filename_len,
            name_keys: config.name_keys.clone(),
            strict: config.strict,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub path: PathBuf,
    pub keys: usize,
}

/// Generate a document.
///
/// The template is checked before the KV file is read. The output directory
/// is only created once both inputs are known to be usable.
pub fn generate(options: &GenerateOptions) -> Result<Generated, DocfillError> {
    if !options.template_path.exists() {
        return Err(DocfillError::TemplateNotFound(
            options.template_path.clone(),
        ));
    }

    let context = load_context(&options.kv_path).map_err(DocfillError::KvFile)?;

    let filename = output_filename(
        options.name.as_deref(),
        &context,
        options.name_keys.as_slice(),
        options.max_filename_len,
    );
    let out_path = options.outdir.join(&filename);
    debug!(output = %out_path.display(), "output filename chosen");

    fs::create_dir_all(&options.outdir)
        .with_context(|| format!("create output directory {}", options.outdir.display()))
        .map_err(DocfillError::Generation)?;

    let summary = render_docx(
        &options.template_path,
        &context,
        &out_path,
        &RenderOptions {
            strict: options.strict,
        },
    )
    .map_err(DocfillError::Generation)?;
    info!(
        output = %out_path.display(),
        rendered_parts = summary.rendered_parts.len(),
        copied_parts = summary.copied_parts,
        "document generated"
    );

    Ok(Generated {
        path: out_path,
        keys: context.len(),
    })
}
