// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escaping of the text format's structural characters.
//!
//! Strings and names are written with a backslash in front of every character the
//! format gives meaning to, so content can never be mistaken for structure:
//!
//! | Character | Escape |
//! |-----------|--------|
//! | `\`       | `\\`   |
//! | newline   | `\n`   |
//! | CR        | `\r`   |
//! | `=` `:` `,` `#` `[` `]` | `\=` `\:` `\,` `\#` `\[` `\]` |

use crate::domain::DecodeError;
use std::borrow::Cow;

/// Characters that must not appear unescaped inside a string payload.
const STRUCTURAL: &[char] = &['=', ':', ',', '#', '\n', '\r'];

fn needs_escape(c: char) -> bool {
    matches!(c, '\\' | '=' | ':' | ',' | '#' | '[' | ']' | '\n' | '\r')
}

/// Escapes structural characters, borrowing the input when nothing needs escaping.
///
/// # Examples
///
/// ```rust
/// use tagcfg::adapters::escape::{escape, unescape};
///
/// let escaped = escape("a=b, c\nd");
/// assert_eq!(escaped, "a\\=b\\, c\\nd");
/// assert_eq!(unescape(&escaped).unwrap(), "a=b, c\nd");
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if needs_escape(c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverses [`escape`], rejecting structural characters that were not escaped.
pub fn unescape(text: &str) -> Result<String, DecodeError> {
    unescape_with(text, STRUCTURAL)
}

/// Reverses [`escape`] for a section or variable name.
///
/// Hand-edited files often contain names like `audio:master`; only the escapes
/// themselves are checked here, since the surrounding grammar has already
/// located the name.
pub fn unescape_name(text: &str) -> Result<String, DecodeError> {
    unescape_with(text, &[])
}

fn unescape_with(text: &str, reject: &[char]) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices();

    while let Some((position, c)) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, next)) if needs_escape(next) => out.push(next),
                Some((_, next)) => {
                    return Err(DecodeError::InvalidEscape {
                        sequence: format!("\\{next}"),
                    })
                }
                None => {
                    return Err(DecodeError::InvalidEscape {
                        sequence: "\\".to_string(),
                    })
                }
            }
        } else if reject.contains(&c) {
            return Err(DecodeError::UnescapedCharacter { ch: c, position });
        } else {
            out.push(c);
        }
    }

    Ok(out)
}

/// Returns the byte offset of the first occurrence of `target` that is not
/// preceded by an escaping backslash.
pub(crate) fn find_unescaped(text: &str, target: char) -> Option<usize> {
    let mut escaped = false;
    for (position, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == target {
            return Some(position);
        }
    }
    None
}
