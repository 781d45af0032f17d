//! Markdown and template formatting for skill output.
//!
//! Pure text transforms; nothing here touches the executor.

/// Substitutes `{{key}}` placeholders in `template`.
///
/// Substitution is linear: values are inserted as-is and never re-scanned
/// for placeholders. Unknown placeholders are left untouched.
///
/// # Examples
///
/// ```
/// use kumiko::format::render;
///
/// let text = render(
///     "Hello {{name}}, you have {{count}} tasks",
///     &[("name", "Ada"), ("count", "3")],
/// );
/// assert_eq!(text, "Hello Ada, you have 3 tasks");
/// ```
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{key}}}}}"), value);
    }
    result
}

/// Formats headers and rows as a markdown table.
pub fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("| {} |", headers.join(" | ")));
    lines.push(format!(
        "| {} |",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join(" | ")
    ));
    for row in rows {
        lines.push(format!("| {} |", row.join(" | ")));
    }
    lines.join("\n")
}

/// Formats items as a markdown bullet list at the given indent level.
pub fn bullet_list(items: &[&str], indent: usize) -> String {
    let prefix = format!("{}- ", "  ".repeat(indent));
    items
        .iter()
        .map(|item| format!("{prefix}{item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats items as a markdown numbered list.
pub fn numbered_list(items: &[&str]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wraps code in a fenced block with an optional language tag.
pub fn code_block(code: &str, language: &str) -> String {
    format!("```{language}\n{code}\n```")
}
