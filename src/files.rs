//! File-extension categorization for uploaded inputs.

/// Coarse category of an uploaded file, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    /// Prose documents (pdf, docx, txt, md, ...)
    Document,
    /// Tabular data (xlsx, csv, ...)
    Spreadsheet,
    /// Images (png, jpg, svg, ...)
    Image,
    /// Source code
    Code,
    /// Structured data (json, xml, yaml)
    Data,
    /// Archives (zip, tar, ...)
    Archive,
    /// Anything unrecognized
    Other,
}

impl FileCategory {
    /// Categorizes a file extension, with or without the leading dot.
    ///
    /// # Examples
    ///
    /// ```
    /// use kumiko::files::FileCategory;
    ///
    /// assert_eq!(FileCategory::from_extension(".pdf"), FileCategory::Document);
    /// assert_eq!(FileCategory::from_extension("RS"), FileCategory::Code);
    /// assert_eq!(FileCategory::from_extension("bin"), FileCategory::Other);
    /// ```
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "pdf" | "docx" | "doc" | "txt" | "md" | "rtf" | "odt" => FileCategory::Document,
            "xlsx" | "xls" | "csv" | "tsv" => FileCategory::Spreadsheet,
            "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" => FileCategory::Image,
            "rb" | "py" | "js" | "ts" | "java" | "go" | "rs" | "c" | "cpp" => FileCategory::Code,
            "json" | "xml" | "yaml" | "yml" => FileCategory::Data,
            "zip" | "tar" | "gz" | "rar" => FileCategory::Archive,
            _ => FileCategory::Other,
        }
    }
}

/// Returns `true` if the extension appears in `supported`.
///
/// Comparison ignores case and leading dots on both sides.
pub fn is_supported(extension: &str, supported: &[&str]) -> bool {
    let ext = extension.trim_start_matches('.').to_ascii_lowercase();
    supported
        .iter()
        .any(|s| s.trim_start_matches('.').eq_ignore_ascii_case(&ext))
}
