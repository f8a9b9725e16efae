//! Rendering query results into tool response text.
//!
//! Two shapes are supported: the legacy `## <path>` sections and a
//! structured form with one frontmatter block per path.

use crate::config::ResponseFormat;
use crate::query::{DocResult, Document};
use std::fmt::Write as _;

/// Render results in the configured shape.
pub fn render(results: &[DocResult], format: ResponseFormat) -> String {
    match format {
        ResponseFormat::Legacy => render_legacy(results),
        ResponseFormat::Structured => render_structured(results),
    }
}

/// `## <path>\n\n<body>\n\n---\n` per result, joined with newlines.
pub fn render_legacy(results: &[DocResult]) -> String {
    results
        .iter()
        .map(|result| format!("## {}\n\n{}\n\n---\n", result.path(), legacy_body(result)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn legacy_body(result: &DocResult) -> String {
    match result {
        DocResult::File { content, .. } => content.clone(),
        DocResult::Directory {
            subdirectories,
            files,
            documents,
            suggestions,
            ..
        } => {
            let mut body = directory_body(subdirectories, files, documents);
            if let Some(suggestions) = suggestions {
                body.push_str("\n\n");
                body.push_str(suggestions.trim_end());
            }
            body
        }
        DocResult::Error {
            error, suggestions, ..
        } => match suggestions {
            Some(suggestions) => format!("{}\n\n{}", error, suggestions.trim_end()),
            None => error.clone(),
        },
    }
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push_str("\n\n");
    }
    out.push_str(title);
    for item in items {
        out.push_str("\n- ");
        out.push_str(item);
    }
}

fn directory_body(subdirectories: &[String], files: &[String], documents: &[Document]) -> String {
    let mut body = String::new();
    push_list(&mut body, "Subdirectories:", subdirectories);
    push_list(&mut body, "Files:", files);

    for document in documents {
        if !body.is_empty() {
            body.push_str("\n\n");
        }
        let _ = write!(body, "### {}\n\n{}", document.path, document.content.trim_end());
    }

    if body.is_empty() {
        body.push_str("Directory contains no Markdown files.");
    }
    body
}

/// JSON-quoted scalar; valid as a YAML frontmatter value.
fn quoted(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// One `---`-delimited metadata block per result followed by its body.
pub fn render_structured(results: &[DocResult]) -> String {
    results
        .iter()
        .map(structured_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

fn structured_entry(result: &DocResult) -> String {
    let mut entry = format!("---\ntype: {}\npath: {}\n", result.kind(), quoted(result.path()));

    if let DocResult::Error { error, .. } = result {
        let _ = writeln!(entry, "error: {}", quoted(error));
    }
    if let Some(suggestions) = result.suggestions() {
        let _ = writeln!(entry, "suggestions: {}", quoted(suggestions.trim_end()));
    }
    entry.push_str("---\n");

    match result {
        DocResult::File { content, .. } => entry.push_str(content),
        DocResult::Directory {
            subdirectories,
            files,
            documents,
            ..
        } => entry.push_str(&directory_body(subdirectories, files, documents)),
        DocResult::Error { .. } => {}
    }
    if !entry.ends_with('\n') {
        entry.push('\n');
    }

    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn file(path: &str, content: &str) -> DocResult {
        DocResult::File {
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    fn not_found(path: &str, suggestions: Option<&str>) -> DocResult {
        DocResult::Error {
            path: path.to_string(),
            error: format!("Path \"{}\" not found.", path),
            suggestions: suggestions.map(ToString::to_string),
        }
    }

    fn directory() -> DocResult {
        DocResult::Directory {
            path: "overview".to_string(),
            subdirectories: vec!["docs/overview/deep/".to_string()],
            files: vec!["docs/overview/a.md".to_string(), "docs/overview/b.md".to_string()],
            documents: vec![
                Document {
                    path: "docs/overview/a.md".to_string(),
                    content: "Alpha\n".to_string(),
                },
                Document {
                    path: "docs/overview/b.md".to_string(),
                    content: "Beta".to_string(),
                },
            ],
            suggestions: None,
        }
    }

    #[test]
    fn test_legacy_sections() {
        let out = render_legacy(&[file("index.md", "Welcome"), not_found("x.md", None)]);
        check!(
            out == "## index.md\n\nWelcome\n\n---\n\n## x.md\n\nPath \"x.md\" not found.\n\n---\n"
        );
    }

    #[test]
    fn test_legacy_error_appends_suggestions() {
        let out = render_legacy(&[not_found("x.md", Some("Here:\n- a.md\n"))]);
        check!(out == "## x.md\n\nPath \"x.md\" not found.\n\nHere:\n- a.md\n\n---\n");
    }

    #[test]
    fn test_legacy_directory_concatenates_documents() {
        let out = render_legacy(&[directory()]);
        check!(out.contains("Subdirectories:\n- docs/overview/deep/"));
        check!(out.contains("Files:\n- docs/overview/a.md\n- docs/overview/b.md"));
        check!(out.contains("### docs/overview/a.md\n\nAlpha\n\n### docs/overview/b.md\n\nBeta"));
    }

    #[test]
    fn test_empty_directory_body() {
        let empty = DocResult::Directory {
            path: "empty".to_string(),
            subdirectories: vec![],
            files: vec![],
            documents: vec![],
            suggestions: None,
        };
        check!(render_legacy(&[empty]).contains("Directory contains no Markdown files."));
    }

    #[test]
    fn test_structured_frontmatter() {
        let out = render_structured(&[
            file("index.md", "Welcome"),
            not_found("x.md", Some("- a.md\n")),
        ]);
        check!(
            out == "---\ntype: file\npath: \"index.md\"\n---\nWelcome\n\n\
                    ---\ntype: error\npath: \"x.md\"\nerror: \"Path \\\"x.md\\\" not found.\"\nsuggestions: \"- a.md\"\n---\n"
        );
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let results = [file("index.md", "Welcome")];
        check!(render(&results, ResponseFormat::Legacy) == render_legacy(&results));
        check!(render(&results, ResponseFormat::Structured) == render_structured(&results));
    }
}
