use codenote_types::Language;

use super::*;

#[test]
fn it_infers_known_extensions() {
    let cases = [
        ("main.py", Language::Python),
        ("app.js", Language::Javascript),
        ("View.jsx", Language::Javascript),
        ("index.ts", Language::Typescript),
        ("Page.tsx", Language::Typescript),
        ("Main.java", Language::Java),
        ("engine.cpp", Language::Cpp),
        ("util.c", Language::C),
        ("src/main.go", Language::Go),
        ("lib.rs", Language::Rust),
    ];

    for (name, expected) in cases {
        assert_eq!(infer_language(name), Some(expected), "{name}");
    }
}

#[test]
fn it_ignores_case() {
    assert_eq!(infer_language("report.PY"), Some(Language::Python));
    assert_eq!(infer_language("MAIN.Go"), Some(Language::Go));
}

#[test]
fn it_returns_none_for_unknown_names() {
    assert_eq!(infer_language("README"), None);
    assert_eq!(infer_language("styles.css"), None);
    assert_eq!(infer_language(".py"), None);
    assert_eq!(infer_language(""), None);
}

#[test]
fn it_accepts_upload_extensions() {
    assert!(is_accepted_upload("index.html"));
    assert!(is_accepted_upload("legacy.PHP"));
    assert!(is_accepted_upload("a/b/c.rb"));
    assert!(!is_accepted_upload("notes.txt"));
    assert!(!is_accepted_upload("Makefile"));
}
