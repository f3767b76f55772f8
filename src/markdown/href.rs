//! Lexical decomposition of href and src attribute values.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::borrow::Cow;

/// Bytes left unescaped when a rewritten path is written back.
const PATH_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'+')
    .remove(b',')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

/// URL reference split into its path and the verbatim query/fragment tail.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Href<'a> {
    external: bool,
    path: Cow<'a, str>,
    suffix: &'a str,
}

impl<'a> Href<'a> {
    /// Splits a raw attribute value.
    ///
    /// Returns `None` for values a browser would not treat as a usable URL
    /// reference: control characters, a colon before any scheme character,
    /// a colon in the first segment of a relative path, or broken percent
    /// escapes in the path.
    pub(crate) fn parse(raw: &'a str) -> Option<Self> {
        if raw.bytes().any(|b| b < 0x20 || b == 0x7f) {
            return None;
        }

        let tail_start = raw.find(['?', '#']).unwrap_or(raw.len());
        let (raw_path, suffix) = raw.split_at(tail_start);

        if scheme_end(raw)?.is_some() || raw_path.starts_with("//") {
            return Some(Self {
                external: true,
                path: Cow::Borrowed(raw_path),
                suffix,
            });
        }

        let first_segment = raw_path.split('/').next().unwrap_or("");
        if first_segment.contains(':') {
            return None;
        }

        Some(Self {
            external: false,
            path: decode_path(raw_path)?,
            suffix,
        })
    }

    /// Whether the value carries a scheme or an authority.
    pub(crate) fn is_external(&self) -> bool {
        self.external
    }

    /// Percent decoded path component.
    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    /// Rebuilds the reference with a new path and the original tail.
    pub(crate) fn with_path(&self, path: &str) -> String {
        format!("{}{}", utf8_percent_encode(path, PATH_SAFE), self.suffix)
    }
}

/// Locates the `:` ending a URL scheme.
///
/// `Some(None)` means no scheme, `None` means the value is malformed
/// because it starts with a colon.
fn scheme_end(raw: &str) -> Option<Option<usize>> {
    for (idx, c) in raw.char_indices() {
        match c {
            'a'..='z' | 'A'..='Z' => {}
            '0'..='9' | '+' | '-' | '.' if idx > 0 => {}
            ':' if idx == 0 => return None,
            ':' => return Some(Some(idx)),
            _ => return Some(None),
        }
    }
    Some(None)
}

fn decode_path(raw_path: &str) -> Option<Cow<'_, str>> {
    let bytes = raw_path.as_bytes();
    for (idx, _) in raw_path.match_indices('%') {
        let escape = bytes.get(idx + 1..idx + 3)?;
        if !escape.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
    }
    percent_decode_str(raw_path).decode_utf8().ok()
}
