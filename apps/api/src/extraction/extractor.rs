//! Text extraction for uploaded resume files.
//!
//! Upload bytes are staged in a temporary file for the duration of one parse
//! and removed when the guard drops, whatever the outcome.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use dotext::MsDoc;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

/// Extensions accepted by the upload endpoint, lowercase and without the dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Carries the offending (lowercased) extension, empty if the name had none.
    #[error("Unsupported file type: .{0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    ExtractionFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    PlainText,
}

impl DocumentKind {
    /// Picks a parser from the original filename's extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let ext = file_extension(filename);
        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "doc" | "docx" => Ok(Self::Word),
            "txt" => Ok(Self::PlainText),
            _ => Err(ExtractionError::UnsupportedFormat(ext)),
        }
    }
}

pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

pub fn is_supported_filename(filename: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&file_extension(filename).as_str())
}

// ────────────────────────────────────────────────────────────────────────────
// Scoped temporary file
// ────────────────────────────────────────────────────────────────────────────

/// Upload bytes written to a temp file. Deleted on drop; a failed delete is
/// logged and swallowed.
pub struct StagedUpload {
    file: Option<NamedTempFile>,
}

impl StagedUpload {
    pub fn stage(bytes: &[u8], extension: &str) -> Result<Self, ExtractionError> {
        let mut file = tempfile::Builder::new()
            .prefix("resume-upload-")
            .suffix(&format!(".{extension}"))
            .tempfile()
            .map_err(|e| ExtractionError::ExtractionFailed(format!("could not stage upload: {e}")))?;
        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| ExtractionError::ExtractionFailed(format!("could not stage upload: {e}")))?;
        Ok(Self { file: Some(file) })
    }

    pub fn path(&self) -> &Path {
        match &self.file {
            Some(file) => file.path(),
            None => Path::new(""),
        }
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let path: PathBuf = file.path().to_path_buf();
            match file.close() {
                Ok(()) => debug!("Removed staged upload {}", path.display()),
                Err(e) => warn!("Failed to clean up staged upload {}: {e}", path.display()),
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Extracts plain text from an uploaded file.
///
/// The extension is checked before anything touches disk. Parsing runs on the
/// blocking pool; a parser panic is reported as `ExtractionFailed`.
pub async fn extract_text(bytes: Bytes, original_name: &str) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_filename(original_name)?;
    let extension = file_extension(original_name);

    tokio::task::spawn_blocking(move || {
        let staged = StagedUpload::stage(&bytes, &extension)?;
        read_document(kind, staged.path())
    })
    .await
    .map_err(|e| ExtractionError::ExtractionFailed(format!("extraction task aborted: {e}")))?
}

fn read_document(kind: DocumentKind, path: &Path) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text(path)
            .map_err(|e| ExtractionError::ExtractionFailed(e.to_string())),
        DocumentKind::Word => {
            let mut doc = dotext::Docx::open(path)
                .map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))?;
            let mut text = String::new();
            doc.read_to_string(&mut text)
                .map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))?;
            Ok(text)
        }
        DocumentKind::PlainText => {
            let bytes = std::fs::read(path)
                .map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))?;
            String::from_utf8(bytes).map_err(|e| {
                ExtractionError::ExtractionFailed(format!("file is not valid UTF-8: {e}"))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    /// A one-page PDF with a single line of Helvetica text.
    fn minimal_pdf(line: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 712 Td ({line}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
             /Resources << /Font << /F1 5 0 R >> >> >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref_at = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }

    /// A Word document holding one `w:p` per paragraph.
    fn minimal_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let content_types = r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

        let options =
            zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
        let mut archive = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        archive.start_file("[Content_Types].xml", options).unwrap();
        archive.write_all(content_types.as_bytes()).unwrap();
        archive.start_file("word/document.xml", options).unwrap();
        archive.write_all(document.as_bytes()).unwrap();
        archive.finish().unwrap().into_inner()
    }

    #[test]
    fn test_kind_from_filename_is_case_insensitive() {
        assert_eq!(DocumentKind::from_filename("cv.PDF").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("cv.Docx").unwrap(), DocumentKind::Word);
        assert_eq!(DocumentKind::from_filename("cv.doc").unwrap(), DocumentKind::Word);
        assert_eq!(
            DocumentKind::from_filename("my.resume.TXT").unwrap(),
            DocumentKind::PlainText
        );
    }

    #[test]
    fn test_unknown_extensions_are_unsupported() {
        match DocumentKind::from_filename("resume.xyz") {
            Err(ExtractionError::UnsupportedFormat(ext)) => assert_eq!(ext, "xyz"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            DocumentKind::from_filename("README"),
            Err(ExtractionError::UnsupportedFormat(ext)) if ext.is_empty()
        ));
    }

    #[test]
    fn test_supported_filename_check() {
        assert!(is_supported_filename("a.pdf"));
        assert!(is_supported_filename("a.TXT"));
        assert!(!is_supported_filename("a.rtf"));
        assert!(!is_supported_filename("pdf"));
    }

    #[test]
    fn test_staged_upload_is_removed_on_drop() {
        let staged = StagedUpload::stage(b"hello", "txt").unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        assert!(path.to_string_lossy().ends_with(".txt"));
        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_plain_text_is_returned_verbatim() {
        let content = "  Jane Doe\nSenior Engineer — Zürich\n\tSkills: Rust, Go  \n";
        let text = extract_text(Bytes::copy_from_slice(content.as_bytes()), "Resume.TXT")
            .await
            .unwrap();
        assert_eq!(text, content);
    }

    #[tokio::test]
    async fn test_pdf_text_is_extracted() {
        let text = extract_text(Bytes::from(minimal_pdf("Jane Doe Senior Engineer")), "cv.pdf")
            .await
            .unwrap();
        assert!(text.contains("Jane"), "got {text:?}");
        assert!(text.contains("Engineer"), "got {text:?}");
    }

    #[tokio::test]
    async fn test_docx_text_is_extracted() {
        let docx = minimal_docx(&["Jane Doe Senior Engineer", "Skills: Rust"]);
        let text = extract_text(Bytes::from(docx), "cv.DOCX").await.unwrap();
        assert!(text.contains("Jane Doe Senior Engineer"), "got {text:?}");
        assert!(text.contains("Skills: Rust"), "got {text:?}");
    }

    #[tokio::test]
    async fn test_invalid_utf8_fails() {
        let err = extract_text(Bytes::from_static(&[0xff, 0xfe, 0x00, 0x41]), "resume.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_unsupported_extension_rejected_before_parsing() {
        let err = extract_text(Bytes::from_static(b"%PDF-1.4"), "resume.xyz")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ext) if ext == "xyz"));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_fails_extraction() {
        let err = extract_text(Bytes::from_static(b"definitely not a pdf"), "resume.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_corrupt_docx_fails_extraction() {
        let err = extract_text(Bytes::from_static(b"not a zip archive"), "resume.docx")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ExtractionFailed(_)));
    }
}
