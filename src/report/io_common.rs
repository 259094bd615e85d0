use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Infers the input type from the file extension, when possible.
pub fn infer_input_type(path: &str) -> Option<String> {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("xlsx") => Some("xlsx".to_string()),
        Some("csv") => Some("csv".to_string()),
        _ => None,
    }
}
