//! Test-only helpers for building and inspecting DOCX packages.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="Normal"><w:name w:val="Normal"/></w:style></w:styles>"#;

/// Fresh temporary directory.
pub fn tempdir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

/// Wrap `runs` in a minimal `word/document.xml` with a single paragraph.
///
/// `runs` is inserted inside `<w:r><w:t>..</w:t></w:r>`, so it may close and
/// reopen runs to simulate Word splitting a placeholder.
pub fn document_xml(runs: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>{runs}</w:t></w:r></w:p></w:body></w:document>"#
    )
}

/// Write a DOCX package with content types, styles and the given document part.
pub fn write_docx(dir: &Path, name: &str, document: &str) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("create docx");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (part, contents) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("word/styles.xml", STYLES),
        ("word/document.xml", document),
    ] {
        zip.start_file(part, options).expect("start part");
        zip.write_all(contents.as_bytes()).expect("write part");
    }
    zip.finish().expect("finish docx");
    path
}

/// Read a part of a DOCX package as text.
pub fn read_part(docx: &Path, part: &str) -> String {
    let file = File::open(docx).expect("open docx");
    let mut archive = ZipArchive::new(file).expect("read docx");
    let mut contents = String::new();
    archive
        .by_name(part)
        .expect("part present")
        .read_to_string(&mut contents)
        .expect("read part");
    contents
}

/// Write a KV file with the given contents.
pub fn write_kv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write kv file");
    path
}
