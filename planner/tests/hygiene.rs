//! Source hygiene for the planner library.
//!
//! The library runs inside an interactive host, so a panic loses the user's
//! plan and stray console output corrupts the host's own rendering. Every
//! construct below is forbidden in library code; sibling `*_test.rs` files and
//! inline `mod tests` blocks are not scanned.

use std::fs;
use std::path::Path;

/// Pattern and the reason it is not allowed.
const FORBIDDEN: &[(&str, &str)] = &[
    (".unwrap()", "propagate the error or pick a fallback"),
    (".expect(", "propagate the error or pick a fallback"),
    ("panic!(", "return an error instead"),
    ("unreachable!(", "return an error instead"),
    ("todo!(", "unfinished code"),
    ("unimplemented!(", "unfinished code"),
    ("let _ =", "inspect or log the discarded value"),
    ("println!(", "log through tracing"),
    ("eprintln!(", "log through tracing"),
    ("dbg!(", "log through tracing"),
];

const INLINE_TESTS: &str = "#[cfg(test)]\nmod tests {";

/// The production part of a source file: everything before an inline
/// `mod tests` block.
fn production_part(content: &str) -> &str {
    content.find(INLINE_TESTS).map_or(content, |at| &content[..at])
}

fn library_sources() -> Vec<(String, String)> {
    let mut files = Vec::new();
    let Ok(entries) = fs::read_dir(Path::new("src")) else {
        return files;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let name = path.to_string_lossy().to_string();
        if path.extension().is_none_or(|e| e != "rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            files.push((name, content));
        }
    }
    files
}

fn violations(files: &[(String, String)]) -> Vec<String> {
    let mut found = Vec::new();
    for (path, content) in files {
        for (number, line) in production_part(content).lines().enumerate() {
            for (pattern, reason) in FORBIDDEN {
                if line.contains(pattern) {
                    found.push(format!("  {path}:{}: `{pattern}` ({reason})", number + 1));
                }
            }
        }
    }
    found
}

#[test]
fn library_sources_are_found() {
    let names: Vec<String> = library_sources().into_iter().map(|(name, _)| name).collect();
    for module in ["lib.rs", "doc.rs", "engine.rs", "codec.rs", "config.rs"] {
        assert!(names.iter().any(|n| n.ends_with(module)), "{module} not scanned: {names:?}");
    }
    assert!(names.iter().all(|n| !n.ends_with("_test.rs")));
}

#[test]
fn library_code_has_no_forbidden_constructs() {
    let found = violations(&library_sources());
    assert!(found.is_empty(), "forbidden constructs in library code:\n{}", found.join("\n"));
}

#[test]
fn inline_test_modules_are_not_scanned() {
    let content = "fn f() -> u8 { 1 }\n\n#[cfg(test)]\nmod tests {\n    fn g() { x.unwrap(); }\n}\n";
    assert!(violations(&[("inline.rs".into(), content.into())]).is_empty());
}

#[test]
fn test_module_declarations_do_not_hide_code() {
    let content = "#[cfg(test)]\n#[path = \"x_test.rs\"]\nmod x_test;\n\nfn f() { y.unwrap(); }\n";
    let found = violations(&[("declared.rs".into(), content.into())]);
    assert_eq!(found.len(), 1);
    assert!(found[0].contains("declared.rs:5"));
}
