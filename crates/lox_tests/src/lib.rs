//! Shared harness for cross-crate scanner tests.
//!
//! Fixtures live in `fixtures/` as `<name>.lox` sources paired with a
//! `<name>.expected` token dump. Set `LOX_BLESS=1` to rewrite the expected
//! files from the current scanner output.

use lox_scanner::ScanOutput;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory holding the fixture corpus.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// A source fixture and its expected dump.
#[derive(Debug)]
pub struct Fixture {
    pub name: String,
    pub source: String,
    pub expected: String,
    pub expected_path: PathBuf,
}

/// Load every `*.lox` fixture, sorted by name.
pub fn load_fixtures() -> io::Result<Vec<Fixture>> {
    let mut fixtures = Vec::new();
    for entry in fs::read_dir(fixtures_dir())? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("lox") {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let expected_path = path.with_extension("expected");
        let expected = match fs::read_to_string(&expected_path) {
            Ok(text) => normalize_newlines(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err),
        };
        fixtures.push(Fixture {
            name,
            source: normalize_newlines(&fs::read_to_string(&path)?),
            expected,
            expected_path,
        });
    }
    fixtures.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(fixtures)
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Render a scan as one `<line> <token>` row per token, followed by the
/// diagnostics when there are any. Embedded newlines are escaped.
pub fn render(output: &ScanOutput) -> String {
    let mut out = String::new();
    for token in &output.tokens {
        let row = format!("{} {}", token.line, token).replace('\n', "\\n");
        out.push_str(&row);
        out.push('\n');
    }
    if !output.diagnostics.is_empty() {
        out.push_str("-- diagnostics\n");
        for diagnostic in &output.diagnostics {
            out.push_str(&diagnostic.to_string());
            out.push('\n');
        }
    }
    out
}

/// Whether expected files should be rewritten instead of compared.
pub fn bless_enabled() -> bool {
    std::env::var("LOX_BLESS").map_or(false, |v| v == "1")
}

/// Fragments that random sources are assembled from. Includes partial and
/// malformed pieces so generated inputs hit every scanner path.
const FRAGMENTS: &[&str] = &[
    "(", ")", "{", "}", ",", ".", "-", "+", ";", "*", "/", "!", "=", "<", ">", "!=", "==", "<=",
    ">=", " ", "\t", "\r", "\n", "\"", "\"text\"", "\"multi\nline\"", "0", "42", "3.25", "1.",
    ".5", "and", "class", "classy", "fun", "nil", "orchid", "while", "_x", "foo1", "//", "// note\n",
    "/*", "*/", "/* c\n */", "@", "#", "$", "é", "→",
];

/// Build a random source of `pieces` fragments.
pub fn random_source<R: Rng>(rng: &mut R, pieces: usize) -> String {
    let mut source = String::new();
    for _ in 0..pieces {
        if let Some(fragment) = FRAGMENTS.choose(rng) {
            source.push_str(fragment);
        }
    }
    source
}
