//! Key-value property sources such as `local.properties`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use trestle_util::errors::TrestleError;

/// A read-only source of configuration values looked up by key.
pub trait PropertySource {
    /// Look up the value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Human-readable name of the source, used in error messages.
    fn describe(&self) -> String;
}

/// Properties parsed from a Java-style `.properties` file.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl Properties {
    /// Load a `.properties` file.
    ///
    /// A missing file yields an empty set of properties: lookups then fail
    /// with a message naming both the key and the file.
    pub fn load(path: &Path) -> miette::Result<Self> {
        let values = if path.is_file() {
            let content = std::fs::read_to_string(path).map_err(TrestleError::Io)?;
            parse(&content)
        } else {
            tracing::debug!("{} not found, using empty properties", path.display());
            BTreeMap::new()
        };
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// Parse properties from a string with no backing file.
    pub fn parse(content: &str) -> Self {
        Self {
            path: None,
            values: parse(content),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for Properties {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(p) => p.display().to_string(),
            None => "properties".to_string(),
        }
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }

    fn describe(&self) -> String {
        "property map".to_string()
    }
}

/// Parse the `.properties` format written by IDEs and SDK tools: `key=value`,
/// `key:value` or `key value` pairs, `#`/`!` comments, backslash and
/// `\uXXXX` escapes, and trailing-backslash line continuations.
fn parse(content: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    let mut lines = content.lines();
    while let Some(line) = lines.next() {
        let mut logical = line.trim_start_matches(is_blank).to_string();
        if logical.is_empty() || logical.starts_with('#') || logical.starts_with('!') {
            continue;
        }
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_pair(&logical);
        map.insert(unescape(key), unescape(value));
    }
    map
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}

/// The key ends at the first unescaped `=`, `:` or whitespace. Whitespace
/// around the separator is skipped, and a single `=` or `:` may follow
/// whitespace.
fn split_pair(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let rest = line[key_end..].trim_start_matches(is_blank);
    let rest = rest
        .strip_prefix(['=', ':'])
        .map(|r| r.trim_start_matches(is_blank))
        .unwrap_or(rest);
    (&line[..key_end], rest)
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'u') {
            let hex: String = chars.clone().skip(1).take(4).collect();
            if hex.len() == 4 && hex.chars().all(|h| h.is_ascii_hexdigit()) {
                if let Ok(unit) = u16::from_str_radix(&hex, 16) {
                    units.push(unit);
                    chars.nth(4);
                    continue;
                }
            }
        }
        flush_utf16(&mut units, &mut out);
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    flush_utf16(&mut units, &mut out);
    out
}

/// `\uXXXX` escapes are UTF-16 code units; surrogate pairs span two escapes.
fn flush_utf16(units: &mut Vec<u16>, out: &mut String) {
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}
