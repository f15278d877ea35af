//! JSON and static HTML export.

use crate::element::Element;
use crate::storage::StorageError;
use kurbo::Size;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

pub const JSON_FILE_NAME: &str = "design.json";
pub const HTML_FILE_NAME: &str = "design.html";

/// Export errors. Their messages are shown to the user as-is.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: the design has not been saved yet")]
    NothingSaved,
    #[error("Nothing to export: the canvas is empty")]
    NoElements,
    #[error("Could not read saved design: {0}")]
    Storage(#[from] StorageError),
}

/// A file handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: String,
}

impl Download {
    /// Write the contents to a path.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, &self.contents)
    }
}

/// Re-emit the persisted state text unchanged.
pub fn export_json(persisted: Option<String>) -> Result<Download, ExportError> {
    let contents = persisted.ok_or(ExportError::NothingSaved)?;
    Ok(Download {
        file_name: JSON_FILE_NAME.to_string(),
        mime: "application/json",
        contents,
    })
}

/// Render a standalone page with one absolutely positioned block per element.
pub fn export_html(
    elements: &[Element],
    canvas_color: Option<&str>,
    canvas: Size,
) -> Result<Download, ExportError> {
    if elements.is_empty() {
        return Err(ExportError::NoElements);
    }
    Ok(Download {
        file_name: HTML_FILE_NAME.to_string(),
        mime: "text/html",
        contents: render_html(elements, canvas_color, canvas),
    })
}

fn render_html(elements: &[Element], canvas_color: Option<&str>, canvas: Size) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str("<title>Exported Design</title>\n</head>\n<body>\n");
    let _ = writeln!(
        html,
        "<div style=\"position:relative;width:{}px;height:{}px;background:{};overflow:hidden;\">",
        canvas.width,
        canvas.height,
        escape_html(canvas_color.unwrap_or("#ffffff")),
    );
    for el in elements {
        let _ = write!(
            html,
            "<div style=\"position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;background:{};z-index:{};transform:rotate({}deg);\">",
            el.x,
            el.y,
            el.width,
            el.height,
            escape_html(&el.color),
            el.z_index,
            el.rotation,
        );
        if el.kind.is_text_bearing() {
            html.push_str(&escape_html(&el.text));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
