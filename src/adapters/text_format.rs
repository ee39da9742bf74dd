// SPDX-License-Identifier: MIT OR Apache-2.0

//! The canonical text format.
//!
//! ```text
//! # comment lines and blank lines are ignored
//! [Chelsea]
//! nickName=s:Cutiemoo
//! cutenessFactor=i:9001
//! position=v3:34.0,1.0,700.0
//! ```
//!
//! Each entry is `name=tag:value`. Names and string values escape the structural
//! characters (see [`escape`](crate::adapters::escape)), so an entry is split at
//! the first unescaped `=` and its right-hand side at the first `:`. Whitespace
//! around names, around `=` and around the tag is ignored; the value itself is
//! handed to its codec verbatim.

use crate::adapters::escape::{escape, find_unescaped, unescape_name};
use crate::domain::section::validate_name;
use crate::domain::{
    ConfigError, ConfigFile, ConfigSection, DecodeError, DecodeFailure, LoadReport, NameKind,
    Result,
};
use crate::ports::ConfigFormat;
use crate::service::CodecRegistry;
use std::collections::HashSet;

/// Marks a comment line.
pub const COMMENT: char = '#';
/// Separates an entry's name from its tagged value.
pub const KEY_VALUE_SEPARATOR: char = '=';
/// Separates a type tag from the encoded value.
pub const TAG_SEPARATOR: char = ':';

/// The `[Section]` / `name=tag:value` text format.
///
/// # Examples
///
/// ```rust
/// use tagcfg::adapters::TextFormat;
/// use tagcfg::domain::{ConfigFile, ConfigSection};
/// use tagcfg::ports::ConfigFormat;
/// use tagcfg::service::CodecRegistry;
///
/// let mut file = ConfigFile::new();
/// file.add_section(ConfigSection::new("Chelsea").with("cutenessFactor", 9001_i32).unwrap())
///     .unwrap();
///
/// let text = TextFormat::new().render(&file);
/// assert_eq!(text, "[Chelsea]\ncutenessFactor=i:9001\n");
///
/// let (parsed, report) = TextFormat::new()
///     .parse(&text, &CodecRegistry::with_builtins())
///     .unwrap();
/// assert_eq!(parsed, file);
/// assert!(report.is_clean());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormat;

impl TextFormat {
    /// Creates the text format.
    pub fn new() -> Self {
        TextFormat
    }
}

/// A classified, non-blank line.
enum Line<'a> {
    Comment,
    Header(&'a str),
    Entry { key: &'a str, value: &'a str },
}

fn classify(line_no: usize, line: &str) -> Result<Option<Line<'_>>> {
    let line = line.trim_start();
    if line.trim_end().is_empty() {
        return Ok(None);
    }
    if line.starts_with(COMMENT) {
        return Ok(Some(Line::Comment));
    }
    if line.starts_with('[') {
        return Ok(Some(Line::Header(line.trim_end())));
    }

    let separator = find_unescaped(line, KEY_VALUE_SEPARATOR).ok_or_else(|| {
        ConfigError::malformed(line_no, "expected a [section] header or `name=tag:value`")
    })?;
    Ok(Some(Line::Entry {
        key: line[..separator].trim(),
        value: &line[separator + KEY_VALUE_SEPARATOR.len_utf8()..],
    }))
}

fn parse_header(line_no: usize, line: &str) -> Result<String> {
    let body = &line[1..];
    let inner = match find_unescaped(body, ']') {
        Some(end) if end + 1 == body.len() => &body[..end],
        Some(_) => {
            return Err(ConfigError::malformed(
                line_no,
                "unexpected text after section header",
            ))
        }
        None => return Err(ConfigError::malformed(line_no, "unterminated section header")),
    };

    let name = unescape_name(inner.trim())
        .map_err(|e| ConfigError::malformed(line_no, format!("invalid section name: {e}")))?;
    if name.is_empty() {
        return Err(ConfigError::malformed(line_no, "section header has no name"));
    }
    validate_name(NameKind::Section, &name).map_err(|_| {
        ConfigError::malformed(line_no, "section name starts or ends with whitespace")
    })?;
    Ok(name)
}

/// Parser state for one pass over a document.
struct Parser<'r> {
    registry: &'r CodecRegistry,
    file: ConfigFile,
    report: LoadReport,
    current: Option<ConfigSection>,
    seen: HashSet<String>,
}

impl<'r> Parser<'r> {
    fn new(registry: &'r CodecRegistry) -> Self {
        Self {
            registry,
            file: ConfigFile::new(),
            report: LoadReport::new(),
            current: None,
            seen: HashSet::new(),
        }
    }

    fn close_section(&mut self) -> Result<()> {
        if let Some(section) = self.current.take() {
            self.file.add_section(section)?;
        }
        self.seen.clear();
        Ok(())
    }

    fn start_section(&mut self, line_no: usize, name: String) -> Result<()> {
        self.close_section()?;
        if self.file.contains(&name) {
            tracing::debug!("Section '{}' repeated at line {}", name, line_no);
            return Err(ConfigError::DuplicateName {
                kind: NameKind::Section,
                name,
            });
        }
        self.current = Some(ConfigSection::new(name));
        Ok(())
    }

    fn entry(&mut self, line_no: usize, key: &str, value: &str) -> Result<()> {
        let section = self.current.as_mut().ok_or_else(|| {
            ConfigError::malformed(line_no, "entry appears before any [section] header")
        })?;

        let name = unescape_name(key)
            .map_err(|e| ConfigError::malformed(line_no, format!("invalid variable name: {e}")))?;
        if name.is_empty() {
            return Err(ConfigError::malformed(line_no, "entry has no name"));
        }
        validate_name(NameKind::Variable, &name).map_err(|_| {
            ConfigError::malformed(line_no, "variable name starts or ends with whitespace")
        })?;
        if !self.seen.insert(name.clone()) {
            tracing::debug!("Variable '{}' repeated at line {}", name, line_no);
            return Err(ConfigError::DuplicateName {
                kind: NameKind::Variable,
                name,
            });
        }

        let decoded = match value.trim_start().split_once(TAG_SEPARATOR) {
            Some((tag, text)) => self.registry.decode(tag.trim(), name.clone(), text),
            None => Err(DecodeError::MissingTypeTag),
        };

        match decoded {
            Ok(variable) => section.add_boxed(variable),
            Err(error) => {
                tracing::warn!(
                    "Skipping '{}' in section '{}' at line {}: {}",
                    name,
                    section.name(),
                    line_no,
                    error
                );
                self.report.push(DecodeFailure {
                    line: line_no,
                    section: section.name().to_string(),
                    name,
                    error,
                });
                Ok(())
            }
        }
    }

    fn finish(mut self) -> Result<(ConfigFile, LoadReport)> {
        self.close_section()?;
        Ok((self.file, self.report))
    }
}

impl ConfigFormat for TextFormat {
    fn parse(&self, content: &str, registry: &CodecRegistry) -> Result<(ConfigFile, LoadReport)> {
        let mut parser = Parser::new(registry);

        for (index, raw) in content.split('\n').enumerate() {
            let line_no = index + 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);

            match classify(line_no, line)? {
                None | Some(Line::Comment) => {}
                Some(Line::Header(header)) => {
                    let name = parse_header(line_no, header)?;
                    parser.start_section(line_no, name)?;
                }
                Some(Line::Entry { key, value }) => parser.entry(line_no, key, value)?,
            }
        }

        parser.finish()
    }

    fn render(&self, file: &ConfigFile) -> String {
        let mut out = String::new();
        for (index, section) in file.sections().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push('[');
            out.push_str(&escape(section.name()));
            out.push_str("]\n");

            for variable in section.variables() {
                out.push_str(&escape(variable.name()));
                out.push(KEY_VALUE_SEPARATOR);
                out.push_str(variable.type_tag().as_str());
                out.push(TAG_SEPARATOR);
                out.push_str(&variable.serialize());
                out.push('\n');
            }
        }
        out
    }

    fn supported_extensions(&self) -> &[&str] {
        &["cfg", "ini"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Vec3;

    fn parse(content: &str) -> Result<(ConfigFile, LoadReport)> {
        TextFormat::new().parse(content, &CodecRegistry::with_builtins())
    }

    fn chelsea() -> ConfigFile {
        let mut file = ConfigFile::new();
        file.add_section(
            ConfigSection::new("Chelsea")
                .with("nickName", "Cutiemoo".to_string())
                .unwrap()
                .with("cutenessFactor", 9001_i32)
                .unwrap()
                .with("position", Vec3::new(34.0, 1.0, 700.0))
                .unwrap(),
        )
        .unwrap();
        file.add_section(ConfigSection::new("Empty")).unwrap();
        file
    }

    #[test]
    fn test_render() {
        assert_eq!(
            TextFormat::new().render(&chelsea()),
            "[Chelsea]\n\
             nickName=s:Cutiemoo\n\
             cutenessFactor=i:9001\n\
             position=v3:34.0,1.0,700.0\n\
             \n\
             [Empty]\n"
        );
    }

    #[test]
    fn test_render_empty_file() {
        assert_eq!(TextFormat::new().render(&ConfigFile::new()), "");
    }

    #[test]
    fn test_round_trip() {
        let file = chelsea();
        let (parsed, report) = parse(&TextFormat::new().render(&file)).unwrap();
        assert_eq!(parsed, file);
        assert!(report.is_clean());
    }

    #[test]
    fn test_round_trip_escaped_names_and_values() {
        let mut file = ConfigFile::new();
        file.add_section(
            ConfigSection::new("odd [name]=#1")
                .with("key=with:all,#the[chars]\\", "value=with:all,#\nthe\r[chars]\\".to_string())
                .unwrap(),
        )
        .unwrap();

        let text = TextFormat::new().render(&file);
        assert_eq!(text.lines().count(), 2);
        let (parsed, report) = parse(&text).unwrap();
        assert_eq!(parsed, file);
        assert!(report.is_clean());
    }

    #[test]
    fn test_comments_blank_lines_and_whitespace() {
        let content = "# leading comment\n\
                       \n\
                       \t[ Player ]  \n\
                       \x20 # indented comment\n\
                       name = s:Ada\n\
                       level= i : 12 \n\
                       \n\
                       spawn =v3: 1.0 , 2.0 , 3.0\r\n";
        let (file, report) = parse(content).unwrap();
        assert!(report.is_clean());

        let player = file.get_section("Player").unwrap();
        assert_eq!(player.value::<String>("name"), Some("Ada".to_string()));
        assert_eq!(player.value::<i32>("level"), Some(12));
        assert_eq!(player.value::<Vec3>("spawn"), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_crlf_line_endings() {
        let (file, _) = parse("[A]\r\nx=i:1\r\ny=s:two\r\n").unwrap();
        let section = file.get_section("A").unwrap();
        assert_eq!(section.value::<i32>("x"), Some(1));
        assert_eq!(section.value::<String>("y"), Some("two".to_string()));
    }

    #[test]
    fn test_entry_before_header_is_malformed() {
        let err = parse("x=i:1\n[A]\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedFile { line: 1, .. }));
    }

    #[test]
    fn test_line_without_separator_is_malformed() {
        let err = parse("[A]\njust some words\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedFile { line: 2, .. }));
    }

    #[test]
    fn test_bad_headers() {
        for content in ["[]\n", "[   ]\n", "[A\n", "[A] trailing\n", "[A\\]\n"] {
            let err = parse(content).unwrap_err();
            assert!(
                matches!(err, ConfigError::MalformedFile { line: 1, .. }),
                "{content:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_escaped_whitespace_names_are_malformed() {
        for (content, line) in [
            ("[A]\n\\n=i:1\n", 2),
            ("[A]\nx\\r=i:1\n", 2),
            ("[\\n]\n", 1),
            ("[\\n B]\nx=i:1\n", 1),
        ] {
            match parse(content) {
                Err(ConfigError::MalformedFile { line: found, .. }) => assert_eq!(found, line),
                other => panic!("{content:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_entry_without_name_is_malformed() {
        let err = parse("[A]\n=i:1\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedFile { line: 2, .. }));
    }

    #[test]
    fn test_duplicate_section_aborts() {
        let err = parse("[A]\nx=i:1\n[B]\n[A]\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateName {
                kind: NameKind::Section,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_variable_aborts() {
        let err = parse("[A]\nx=i:1\nx=i:2\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateName {
                kind: NameKind::Variable,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_of_skipped_variable_aborts() {
        let err = parse("[A]\nx=zz:1\nx=i:2\n").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { .. }));
    }

    #[test]
    fn test_same_variable_name_in_different_sections() {
        let (file, _) = parse("[A]\nx=i:1\n[B]\nx=i:2\n").unwrap();
        assert_eq!(file.get_section("A").unwrap().value::<i32>("x"), Some(1));
        assert_eq!(file.get_section("B").unwrap().value::<i32>("x"), Some(2));
    }

    #[test]
    fn test_unknown_tag_is_skipped_and_reported() {
        let (file, report) = parse("[A]\nx=i:1\nmood=q:happy\ny=i:2\n").unwrap();
        let section = file.get_section("A").unwrap();
        assert_eq!(section.len(), 2);
        assert!(section.get_variable("mood").is_none());

        assert_eq!(report.len(), 1);
        let failure = &report.failures()[0];
        assert_eq!(failure.line, 3);
        assert_eq!(failure.section, "A");
        assert_eq!(failure.name, "mood");
        assert_eq!(
            failure.error,
            DecodeError::UnknownTypeTag {
                tag: "q".to_string()
            }
        );
    }

    #[test]
    fn test_bad_values_are_skipped_and_reported() {
        let content = "[A]\n\
                       notag=42\n\
                       count=i:many\n\
                       pos=v3:1,2\n\
                       raw=s:a,b\n\
                       ok=b:true\n";
        let (file, report) = parse(content).unwrap();
        assert_eq!(file.get_section("A").unwrap().len(), 1);

        let errors: Vec<&DecodeError> = report.failures().iter().map(|f| &f.error).collect();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], &DecodeError::MissingTypeTag);
        assert!(matches!(errors[1], DecodeError::InvalidInteger { .. }));
        assert!(matches!(errors[2], DecodeError::ComponentCount { .. }));
        assert!(matches!(errors[3], DecodeError::UnescapedCharacter { .. }));
    }

    #[test]
    fn test_string_value_is_verbatim() {
        let (file, _) = parse("[A]\nmotd=s: hello  \n").unwrap();
        assert_eq!(
            file.get_section("A").unwrap().value::<String>("motd"),
            Some(" hello  ".to_string())
        );
    }

    #[test]
    fn test_empty_sections_preserved() {
        let (file, _) = parse("[A]\n[B]\n").unwrap();
        let names: Vec<&str> = file.sections().map(|s| s.name()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(TextFormat::new().supported_extensions().contains(&"cfg"));
    }
}
