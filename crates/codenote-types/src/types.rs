//! Core domain types for the codenote API.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, EnumVariantNames, IntoStaticStr};

/// Language tag understood by the annotation service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    EnumVariantNames,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    Python,
    Javascript,
    Typescript,
    Java,
    Cpp,
    C,
    Go,
    Rust,
}

/// How much annotation the remote service should produce.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    EnumVariantNames,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CommentLevel {
    /// Essential comments only.
    Minimal,
    #[default]
    Standard,
    /// Comprehensive documentation.
    Detailed,
}

/// Authenticated GitHub identity as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<u32>,
}

/// Snapshot of one repository the user can browse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// `owner/name`.
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language as reported by GitHub, free-form.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

impl Repository {
    pub fn owner(&self) -> &str {
        self.full_name
            .split_once('/')
            .map(|(owner, _)| owner)
            .unwrap_or(&self.full_name)
    }

    pub fn name(&self) -> &str {
        self.full_name
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.full_name)
    }
}

/// Kind of a directory listing entry. The wire value is GitHub's `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "dir", alias = "directory")]
    Directory,
    #[serde(rename = "file")]
    File,
}

/// One child of a repository directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Sorts a listing directories first, then by case-insensitive name.
pub fn sort_entries(entries: &mut [ContentEntry]) {
    entries.sort_by(|a, b| {
        a.is_file()
            .cmp(&b.is_file())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse_is_case_insensitive() {
        assert_eq!("Python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("GO".parse::<Language>().unwrap(), Language::Go);
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn test_tags_match_the_wire_names() {
        use strum::{IntoEnumIterator, VariantNames};

        for language in Language::iter() {
            let wire = serde_json::to_value(language).unwrap();
            assert_eq!(wire, language.to_string());
            assert_eq!(<&'static str>::from(language), language.to_string());
        }
        assert_eq!(Language::VARIANTS.len(), 8);
        assert!(Language::VARIANTS.contains(&"cpp"));
        assert_eq!(
            CommentLevel::VARIANTS,
            &["minimal", "standard", "detailed"]
        );
    }

    #[test]
    fn test_comment_level_serialization() {
        let json = serde_json::to_string(&CommentLevel::Detailed).unwrap();
        assert_eq!(json, "\"detailed\"");
        assert_eq!(CommentLevel::default(), CommentLevel::Standard);
    }

    #[test]
    fn test_repository_owner_and_name() {
        let repo: Repository = serde_json::from_value(serde_json::json!({
            "full_name": "octocat/hello-world",
            "description": null,
            "language": "Go",
            "updated_at": "2024-05-01T10:00:00"
        }))
        .unwrap();

        assert_eq!(repo.owner(), "octocat");
        assert_eq!(repo.name(), "hello-world");
        assert!(!repo.private);
    }

    #[test]
    fn test_content_entry_kind_from_wire() {
        let entries: Vec<ContentEntry> = serde_json::from_value(serde_json::json!([
            {"name": "src", "path": "src", "type": "dir", "size": 0},
            {"name": "main.go", "path": "main.go", "type": "file", "size": 42,
             "download_url": "https://raw.example/main.go"},
            {"name": "docs", "path": "docs", "type": "directory"}
        ]))
        .unwrap();

        assert!(entries[0].is_dir());
        assert!(entries[1].is_file());
        assert_eq!(entries[1].size, Some(42));
        assert!(entries[2].is_dir());
        assert_eq!(entries[2].size, None);
    }

    #[test]
    fn test_sort_entries_directories_first() {
        let entry = |name: &str, kind| ContentEntry {
            name: name.to_string(),
            path: name.to_string(),
            kind,
            size: None,
            download_url: None,
        };
        let mut entries = vec![
            entry("b.py", EntryKind::File),
            entry("zeta", EntryKind::Directory),
            entry("A.py", EntryKind::File),
            entry("alpha", EntryKind::Directory),
        ];

        sort_entries(&mut entries);

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta", "A.py", "b.py"]);
    }
}
