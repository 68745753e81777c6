//! DOCX template rendering.
//!
//! A DOCX file is a zip package of XML parts. Parts that carry document text
//! (body, headers, footers, notes) are rendered as Jinja templates with
//! minijinja; everything else (styles, media, relationships) is copied over
//! raw.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::core::kv::Context;
use crate::core::placeholders::{has_template_syntax, patch_xml};

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fail on placeholders that are not in the context.
    pub strict: bool,
}

/// What a render touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Names of the parts that went through the template engine.
    pub rendered_parts: Vec<String>,
    /// Number of parts copied unchanged.
    pub copied_parts: usize,
}

/// Render `template` with `context` and write the result to `out`.
///
/// The document is assembled in a sibling `.tmp` file and renamed into place,
/// so `out` is never left half-written.
pub fn render_docx(
    template: &Path,
    context: &Context,
    out: &Path,
    options: &RenderOptions,
) -> Result<RenderSummary> {
    let tmp_path = tmp_sibling(out);
    let result = render_to(template, context, &tmp_path, options).and_then(|summary| {
        fs::rename(&tmp_path, out).with_context(|| format!("replace {}", out.display()))?;
        Ok(summary)
    });
    if result.is_err()
        && tmp_path.exists()
        && let Err(err) = fs::remove_file(&tmp_path)
    {
        warn!(path = %tmp_path.display(), error = %err, "failed to remove partial output");
    }
    result
}

fn render_to(
    template: &Path,
    context: &Context,
    out: &Path,
    options: &RenderOptions,
) -> Result<RenderSummary> {
    let file =
        File::open(template).with_context(|| format!("open template {}", template.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("read {} as a docx package", template.display()))?;

    let out_file = File::create(out).with_context(|| format!("create {}", out.display()))?;
    let mut writer = ZipWriter::new(BufWriter::new(out_file));
    let part_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let env = environment(options);
    let mut summary = RenderSummary::default();

    for index in 0..archive.len() {
        let name = archive
            .by_index_raw(index)
            .with_context(|| format!("read entry {index} of {}", template.display()))?
            .name()
            .to_string();

        if !is_text_part(&name) {
            let raw = archive
                .by_index_raw(index)
                .with_context(|| format!("read {name}"))?;
            writer
                .raw_copy_file(raw)
                .with_context(|| format!("copy {name}"))?;
            summary.copied_parts += 1;
            continue;
        }

        let mut xml = String::new();
        archive
            .by_index(index)
            .with_context(|| format!("read {name}"))?
            .read_to_string(&mut xml)
            .with_context(|| format!("read {name} as utf-8"))?;

        let rendered = if has_template_syntax(&xml) {
            let patched = patch_xml(&xml);
            let rendered = env
                .render_named_str(&name, &patched, context)
                .with_context(|| format!("render {name}"))?;
            debug!(part = %name, bytes = rendered.len(), "rendered part");
            summary.rendered_parts.push(name.clone());
            rendered
        } else {
            xml
        };

        writer
            .start_file(name.as_str(), part_options)
            .with_context(|| format!("start {name}"))?;
        writer
            .write_all(rendered.as_bytes())
            .with_context(|| format!("write {name}"))?;
    }

    let mut inner = writer
        .finish()
        .with_context(|| format!("finish {}", out.display()))?;
    inner
        .flush()
        .with_context(|| format!("flush {}", out.display()))?;
    Ok(summary)
}

fn environment(options: &RenderOptions) -> Environment<'static> {
    let mut env = Environment::new();
    // Parts are XML; values must not inject markup.
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.set_keep_trailing_newline(true);
    if options.strict {
        env.set_undefined_behavior(UndefinedBehavior::Strict);
    }
    env
}

/// Parts of a WordprocessingML package that hold user-visible text.
fn is_text_part(name: &str) -> bool {
    let Some(file) = name.strip_prefix("word/") else {
        return false;
    };
    let Some(stem) = file.strip_suffix(".xml") else {
        return false;
    };
    if stem.contains('/') {
        return false;
    }
    matches!(stem, "document" | "footnotes" | "endnotes")
        || stem.starts_with("header")
        || stem.starts_with("footer")
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{document_xml, read_part, write_docx};

    fn ctx(pairs: &[(&str, &str)]) -> Context {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn recognizes_text_parts() {
        assert!(is_text_part("word/document.xml"));
        assert!(is_text_part("word/header1.xml"));
        assert!(is_text_part("word/footer2.xml"));
        assert!(is_text_part("word/footnotes.xml"));
        assert!(!is_text_part("word/styles.xml"));
        assert!(!is_text_part("word/_rels/document.xml.rels"));
        assert!(!is_text_part("word/media/header.xml"));
        assert!(!is_text_part("[Content_Types].xml"));
    }

    #[test]
    fn renders_placeholders_in_body() {
        let temp = tempfile::tempdir().expect("tempdir");
        let template = write_docx(
            temp.path(),
            "letter.docx",
            &document_xml("Dear {{ FIRSTNAME }} {{ LASTNAME }},"),
        );
        let out = temp.path().join("out.docx");
        let context = ctx(&[("FIRSTNAME", "John"), ("LASTNAME", "DOE")]);

        let summary =
            render_docx(&template, &context, &out, &RenderOptions::default()).expect("render");

        assert_eq!(summary.rendered_parts, vec!["word/document.xml"]);
        let body = read_part(&out, "word/document.xml");
        assert!(body.contains("Dear John DOE,"), "{body}");
        assert!(!temp.path().join("out.docx.tmp").exists());
    }

    #[test]
    fn renders_placeholder_split_across_runs() {
        let temp = tempfile::tempdir().expect("tempdir");
        let template = write_docx(
            temp.path(),
            "split.docx",
            &document_xml("{{ FIRST</w:t></w:r><w:r><w:t>NAME }}"),
        );
        let out = temp.path().join("out.docx");

        render_docx(
            &template,
            &ctx(&[("FIRSTNAME", "Anna")]),
            &out,
            &RenderOptions::default(),
        )
        .expect("render");

        let body = read_part(&out, "word/document.xml");
        assert!(body.contains("<w:t>Anna</w:t>"), "{body}");
    }

    #[test]
    fn escapes_markup_in_values() {
        let temp = tempfile::tempdir().expect("tempdir");
        let template = write_docx(temp.path(), "t.docx", &document_xml("{{ COMPANY }}"));
        let out = temp.path().join("out.docx");

        render_docx(
            &template,
            &ctx(&[("COMPANY", "Smith & <Sons>")]),
            &out,
            &RenderOptions::default(),
        )
        .expect("render");

        let body = read_part(&out, "word/document.xml");
        assert!(body.contains("Smith &amp; &lt;Sons&gt;"), "{body}");
    }

    #[test]
    fn missing_placeholder_renders_empty_unless_strict() {
        let temp = tempfile::tempdir().expect("tempdir");
        let template = write_docx(
            temp.path(),
            "t.docx",
            &document_xml("[{{ MISSING }}]"),
        );
        let out = temp.path().join("out.docx");

        render_docx(&template, &Context::new(), &out, &RenderOptions::default())
            .expect("lenient render");
        assert!(read_part(&out, "word/document.xml").contains("<w:t>[]</w:t>"));

        let strict_out = temp.path().join("strict.docx");
        let err = render_docx(
            &template,
            &Context::new(),
            &strict_out,
            &RenderOptions { strict: true },
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("render word/document.xml"), "{err:#}");
        assert!(!strict_out.exists());
        assert!(!temp.path().join("strict.docx.tmp").exists());
    }

    #[test]
    fn copies_other_parts_unchanged() {
        let temp = tempfile::tempdir().expect("tempdir");
        let template = write_docx(temp.path(), "t.docx", &document_xml("{{ A }}"));
        let out = temp.path().join("out.docx");

        let summary = render_docx(
            &template,
            &ctx(&[("A", "1")]),
            &out,
            &RenderOptions::default(),
        )
        .expect("render");

        assert_eq!(summary.copied_parts, 2);
        assert_eq!(
            read_part(&out, "word/styles.xml"),
            read_part(&template, "word/styles.xml")
        );
        assert_eq!(
            read_part(&out, "[Content_Types].xml"),
            read_part(&template, "[Content_Types].xml")
        );
    }

    #[test]
    fn conditionals_are_supported() {
        let temp = tempfile::tempdir().expect("tempdir");
        let template = write_docx(
            temp.path(),
            "t.docx",
            &document_xml("{% if TITLE %}{{ TITLE }} {% endif %}{{ NAME }}"),
        );
        let out = temp.path().join("out.docx");

        render_docx(
            &template,
            &ctx(&[("NAME", "Lee")]),
            &out,
            &RenderOptions::default(),
        )
        .expect("render");

        assert!(read_part(&out, "word/document.xml").contains("<w:t>Lee</w:t>"));
    }

    #[test]
    fn non_zip_template_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let template = temp.path().join("bad.docx");
        fs::write(&template, "not a zip").expect("write");
        let out = temp.path().join("out.docx");

        let err =
            render_docx(&template, &Context::new(), &out, &RenderOptions::default()).unwrap_err();
        assert!(format!("{err:#}").contains("docx package"), "{err:#}");
        assert!(!out.exists());
    }
}
