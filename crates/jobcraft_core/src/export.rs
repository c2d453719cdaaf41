use crate::OperationKind;

/// Content type of every exported artifact, whatever extension was chosen.
pub const EXPORT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Suggested extension for a saved artifact.
///
/// This only affects the filename. The payload is always the artifact text
/// encoded as UTF-8; no document conversion happens on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportExtension {
    #[default]
    Txt,
    Docx,
}

impl ExportExtension {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportExtension::Txt => "txt",
            ExportExtension::Docx => "docx",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(ExportExtension::Txt),
            "docx" => Some(ExportExtension::Docx),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Packages artifact text as a downloadable file named after the operation.
pub fn package_artifact(kind: OperationKind, text: &str, extension: ExportExtension) -> ExportedFile {
    ExportedFile {
        file_name: format!("{}.{}", kind.file_stem(), extension.as_str()),
        content_type: EXPORT_CONTENT_TYPE,
        bytes: text.as_bytes().to_vec(),
    }
}
