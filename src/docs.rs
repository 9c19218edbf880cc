use crate::field::FieldDescriptor;
use std::{fs, path::Path};

/// Render a Markdown table of the variables a field set reads
///
/// `prefix` is prepended to every key, matching what a prefixed load looks up.
pub fn render_markdown(fields: &[FieldDescriptor], prefix: Option<&str>) -> String {
    let prefix = prefix.unwrap_or("");
    let mut md = String::new();

    md.push_str("## Environment Variables Summary\n\n");
    md.push_str("| Variable | Type | Example |\n");
    md.push_str("|----------|------|---------|\n");
    for field in fields {
        md.push_str(&format!(
            "| {}{} | {} | {} |\n",
            prefix,
            field.key(),
            field.kind(),
            field.example().unwrap_or("-")
        ));
    }

    md
}

/// Write the Markdown table from [`render_markdown`] to `path`
pub fn write_docs(
    fields: &[FieldDescriptor],
    prefix: Option<&str>,
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    fs::write(path, render_markdown(fields, prefix))
}
