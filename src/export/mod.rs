use anyhow::bail;
use fs_err as fs;
use pulldown_cmark::{html, Options, Parser};
use std::path::Path;

use crate::form::Framework;
use crate::wire::GenerationResult;

/// How a saved plan is written, picked from the target file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    /// HTML with Office namespaces; Word opens it as a `.doc`.
    Word,
}

impl ExportFormat {
    pub fn for_path(path: &Path) -> anyhow::Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("doc") => Ok(ExportFormat::Word),
            Some("docx") => bail!("cannot write .docx; save as .doc to get a Word document"),
            _ => Ok(ExportFormat::Markdown),
        }
    }
}

fn page_size(framework: Framework) -> &'static str {
    if framework.is_log() {
        "11in 8.5in landscape"
    } else {
        "8.5in 11in portrait"
    }
}

/// Render the plan's Markdown tables as a Word-compatible HTML document.
/// A DLL is laid out landscape, a DLP portrait.
pub fn word_document(markdown: &str, framework: Framework) -> String {
    let mut body = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut body, Parser::new_ext(markdown, Options::ENABLE_TABLES));

    format!(
        "\u{feff}<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>
<head>
<meta charset='utf-8'>
<title>Lesson Plan - ACE AI Planner</title>
<style>
  @page {{ size: {size}; margin: 0.5in; }}
  body {{ font-family: 'Times New Roman', serif; font-size: 11pt; color: black; }}
  table {{ border-collapse: collapse; width: 100%; margin-bottom: 20px; table-layout: fixed; }}
  th, td {{ border: 1pt solid black; padding: 8px; vertical-align: top; word-wrap: break-word; }}
  th {{ background-color: #f3f4f6; font-weight: bold; }}
</style>
</head>
<body>
{body}</body>
</html>
",
        size = page_size(framework),
    )
}

/// Write the latest plan to `path`, as Markdown or as a Word document.
pub fn save(
    path: &Path,
    result: &GenerationResult,
    framework: Framework,
) -> anyhow::Result<ExportFormat> {
    let format = ExportFormat::for_path(path)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    match format {
        ExportFormat::Markdown => fs::write(path, &result.text)?,
        ExportFormat::Word => fs::write(path, word_document(&result.text, framework))?,
    }
    tracing::debug!(path = %path.display(), ?format, "plan exported");
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = "| Component | MONDAY |\n|---|---|\n| Abstraction | Equivalent fractions |\n";

    #[test]
    fn extension_picks_the_format() {
        assert_eq!(ExportFormat::for_path(Path::new("week1.md")).unwrap(), ExportFormat::Markdown);
        assert_eq!(ExportFormat::for_path(Path::new("notes")).unwrap(), ExportFormat::Markdown);
        assert_eq!(ExportFormat::for_path(Path::new("Fractions_ACE.DOC")).unwrap(), ExportFormat::Word);
        assert!(ExportFormat::for_path(Path::new("plan.docx")).is_err());
    }

    #[test]
    fn log_is_landscape_and_plan_is_portrait() {
        let log = word_document(PLAN, Framework::Dll4A);
        assert!(log.contains("@page { size: 11in 8.5in landscape; margin: 0.5in; }"));

        let plan = word_document(PLAN, Framework::Dlp7E);
        assert!(plan.contains("@page { size: 8.5in 11in portrait; margin: 0.5in; }"));
    }

    #[test]
    fn tables_are_rendered_as_html() {
        let doc = word_document(PLAN, Framework::Dll4A);
        assert!(doc.starts_with('\u{feff}'));
        assert!(doc.contains("xmlns:w='urn:schemas-microsoft-com:office:word'"));
        assert!(doc.contains("font-family: 'Times New Roman', serif;"));
        assert!(doc.contains("<table>"));
        assert!(doc.contains("<th>Component</th>"));
        assert!(doc.contains("<td>Equivalent fractions</td>"));
        assert!(!doc.contains("|---|"));
    }

    #[test]
    fn save_writes_markdown_verbatim_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plans").join("week1.md");
        let result = GenerationResult::new(PLAN.into());

        assert_eq!(save(&path, &result, Framework::Dll4A).unwrap(), ExportFormat::Markdown);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), PLAN);
    }

    #[test]
    fn save_writes_word_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Fractions_ACE.doc");
        let result = GenerationResult::new(PLAN.into());

        assert_eq!(save(&path, &result, Framework::Dlp4A).unwrap(), ExportFormat::Word);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("8.5in 11in portrait"));
        assert!(written.contains("<table>"));
    }

    #[test]
    fn docx_target_is_refused_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.docx");
        let result = GenerationResult::new(PLAN.into());

        assert!(save(&path, &result, Framework::Dlp4A).is_err());
        assert!(!path.exists());
    }
}
