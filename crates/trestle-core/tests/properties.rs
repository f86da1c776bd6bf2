use std::collections::BTreeMap;
use std::io::Write;

use tempfile::NamedTempFile;
use trestle_core::properties::{Properties, PropertySource};

#[test]
fn load_properties_with_comments_and_blank_lines() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(
        tmp,
        "# comment line\n\
         sdk.dir=/opt/android\n\
         \n\
         ! bang comment\n\
         flutter.sdk = /opt/flutter\n\
         flutter.versionCode:3\n"
    )
    .unwrap();
    tmp.flush().unwrap();

    let props = Properties::load(tmp.path()).unwrap();
    assert_eq!(props.get("sdk.dir"), Some("/opt/android".to_string()));
    assert_eq!(props.get("flutter.sdk"), Some("/opt/flutter".to_string()));
    assert_eq!(props.get("flutter.versionCode"), Some("3".to_string()));
    assert_eq!(props.len(), 3);
}

#[test]
fn load_nonexistent_file_is_empty_and_names_path() {
    let path = std::path::Path::new("/nonexistent/path/local.properties");
    let props = Properties::load(path).unwrap();
    assert!(props.is_empty());
    assert!(props.describe().contains("local.properties"));
}

#[test]
fn parse_unescapes_windows_paths() {
    let props = Properties::parse("flutter.sdk=C\\:\\\\tools\\\\flutter\n");
    assert_eq!(props.get("flutter.sdk"), Some("C:\\tools\\flutter".to_string()));
}

#[test]
fn parse_joins_continuation_lines() {
    let props = Properties::parse("key=first \\\n    second\n");
    assert_eq!(props.get("key"), Some("first second".to_string()));
}

#[test]
fn parse_key_without_value() {
    let props = Properties::parse("flag\n");
    assert_eq!(props.get("flag"), Some(String::new()));
}

#[test]
fn parse_value_keeps_later_separators() {
    let props = Properties::parse("url=https://example.org/a=b\n");
    assert_eq!(props.get("url"), Some("https://example.org/a=b".to_string()));
}

#[test]
fn parse_whitespace_separates_key_and_value() {
    let props = Properties::parse("flutter.sdk /opt/flutter\nsdk.dir\t\t/opt/android\n");
    assert_eq!(props.get("flutter.sdk"), Some("/opt/flutter".to_string()));
    assert_eq!(props.get("sdk.dir"), Some("/opt/android".to_string()));
}

#[test]
fn parse_whitespace_around_separator() {
    let props = Properties::parse("a = 1\nb : 2\nc = = 3\n");
    assert_eq!(props.get("a"), Some("1".to_string()));
    assert_eq!(props.get("b"), Some("2".to_string()));
    assert_eq!(props.get("c"), Some("= 3".to_string()));
}

#[test]
fn parse_escaped_space_stays_in_key() {
    let props = Properties::parse("my\\ key=value\n");
    assert_eq!(props.get("my key"), Some("value".to_string()));
}

#[test]
fn parse_decodes_unicode_escapes() {
    let props = Properties::parse("flutter.sdk=/opt/fl\\u00fctter\nemoji=\\uD83D\\uDE00\n");
    assert_eq!(props.get("flutter.sdk"), Some("/opt/fl\u{fc}tter".to_string()));
    assert_eq!(props.get("emoji"), Some("\u{1F600}".to_string()));
}

#[test]
fn btree_map_is_a_property_source() {
    let mut map = BTreeMap::new();
    map.insert("flutter.sdk".to_string(), "/sdk".to_string());
    let source: &dyn PropertySource = &map;
    assert_eq!(source.get("flutter.sdk"), Some("/sdk".to_string()));
    assert_eq!(source.get("missing"), None);
}
