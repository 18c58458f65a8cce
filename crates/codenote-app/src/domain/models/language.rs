#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

use std::path::Path;

use codenote_types::Language;

/// Extensions accepted for local uploads, lowercase, without the dot.
pub const ACCEPTED_UPLOAD_EXTENSIONS: [&str; 14] = [
    "py", "js", "java", "cpp", "c", "html", "css", "php", "rb", "go", "rs", "ts", "tsx", "jsx",
];

fn extension(filename: &str) -> Option<String> {
    return Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
}

/// Maps a file name to the language the annotation service should assume.
///
/// Returns `None` for extensions outside the table. Callers keep their current
/// selection in that case.
pub fn infer_language(filename: &str) -> Option<Language> {
    let language = match extension(filename)?.as_str() {
        "py" => Language::Python,
        "js" | "jsx" => Language::Javascript,
        "ts" | "tsx" => Language::Typescript,
        "java" => Language::Java,
        "cpp" => Language::Cpp,
        "c" => Language::C,
        "go" => Language::Go,
        "rs" => Language::Rust,
        _ => return None,
    };

    return Some(language);
}

pub fn is_accepted_upload(filename: &str) -> bool {
    return extension(filename)
        .map(|ext| ACCEPTED_UPLOAD_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);
}
