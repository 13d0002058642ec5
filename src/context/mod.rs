use crate::errors::PlannerError;
use fs_err as fs;
use std::path::Path;

/// Upper bound on reference text forwarded to the model, in characters.
pub const MAX_REFERENCE_CHARS: usize = 45_000;

pub const NO_REFERENCES: &str = "None. Use DepEd K-12 Curriculum Standards.";
pub const BINARY_PLACEHOLDER: &str = "(binary document; text not extracted)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Text,
    Pdf,
    Docx,
}

impl ReferenceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" | "md" => Some(ReferenceKind::Text),
            "pdf" => Some(ReferenceKind::Pdf),
            "docx" => Some(ReferenceKind::Docx),
            _ => None,
        }
    }
}

/// A file attached as reference material for the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceFile {
    pub name: String,
    pub kind: ReferenceKind,
    pub bytes: usize,
    /// Extracted text; `None` for formats we cannot read yet.
    pub text: Option<String>,
}

impl ReferenceFile {
    fn content(&self) -> &str {
        self.text.as_deref().unwrap_or(BINARY_PLACEHOLDER)
    }
}

/// Read an attachment from disk. Text formats are decoded lossily; PDF and
/// DOCX are accepted but only recorded by name and size.
pub fn load_reference(path: &Path) -> Result<ReferenceFile, PlannerError> {
    let kind = ReferenceKind::from_path(path).ok_or_else(|| {
        PlannerError::Attachment(format!(
            "{}: only .pdf, .docx, .txt and .md files are accepted",
            path.display()
        ))
    })?;
    let data = fs::read(path).map_err(|e| PlannerError::Attachment(e.to_string()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let text = match kind {
        ReferenceKind::Text => Some(String::from_utf8_lossy(&data).into_owned()),
        ReferenceKind::Pdf | ReferenceKind::Docx => None,
    };
    tracing::debug!(file = %name, bytes = data.len(), ?kind, "attached reference");
    Ok(ReferenceFile { name, kind, bytes: data.len(), text })
}

/// Render the reference section of the prompt.
pub fn reference_block(files: &[ReferenceFile]) -> String {
    if files.is_empty() {
        return NO_REFERENCES.to_string();
    }
    let combined = files
        .iter()
        .map(|f| format!("FILE: {}\nCONTENT: {}", f.name, f.content()))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");
    truncate_chars(&combined, MAX_REFERENCE_CHARS)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
