//! Small string helpers and encoding-aware decoding.

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::FsError;

/// Remove one trailing newline (`\n` or `\r\n`), if present.
///
/// ```rust
/// use fluentfs::chomp;
///
/// assert_eq!(chomp("line\r\n"), "line");
/// assert_eq!(chomp("line\n\n"), "line\n");
/// ```
pub fn chomp(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

/// Returns `true` if `s` is empty or contains only whitespace.
pub fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

/// A text encoding used to read file content.
///
/// ASCII and ISO-8859-1 are handled directly because WHATWG labels map both
/// to windows-1252, which accepts bytes ASCII rejects and decodes
/// `0x80..=0x9F` differently from ISO-8859-1. Every other label goes through
/// [`encoding_rs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// 7-bit ASCII; any byte `>= 0x80` is a decode error.
    Ascii,
    /// ISO-8859-1, where every byte is the code point of the same value.
    Latin1,
    /// Any encoding known to `encoding_rs`.
    Whatwg(&'static Encoding),
}

impl TextEncoding {
    /// UTF-8, the default encoding for text files.
    pub const UTF_8: TextEncoding = TextEncoding::Whatwg(encoding_rs::UTF_8);

    /// Canonical name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Ascii => "ASCII",
            TextEncoding::Latin1 => "ISO-8859-1",
            TextEncoding::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Decode `bytes` without replacement; `None` on any malformed input.
    fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            TextEncoding::Ascii if bytes.is_ascii() => {
                std::str::from_utf8(bytes).ok().map(Cow::Borrowed)
            }
            TextEncoding::Ascii => None,
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Whatwg(encoding) => {
                encoding.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::UTF_8
    }
}

/// Look up an encoding by label (`"utf-8"`, `"ascii"`, `"latin1"`, ...).
///
/// ASCII and ISO-8859-1 labels resolve to [`TextEncoding::Ascii`] and
/// [`TextEncoding::Latin1`]; everything else is a WHATWG label.
///
/// # Errors
///
/// - [`FsError::UnknownEncoding`] if the label is not recognised
pub fn encoding_for_label(label: &str) -> Result<TextEncoding, FsError> {
    let normalized = label.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "ascii" | "us-ascii" | "us_ascii" | "ansi_x3.4-1968" | "646" => Ok(TextEncoding::Ascii),
        "latin1" | "latin-1" | "latin_1" | "l1" | "iso-8859-1" | "iso8859-1" | "iso_8859-1"
        | "iso_8859_1" | "iso8859_1" | "8859" | "cp819" => Ok(TextEncoding::Latin1),
        _ => Encoding::for_label(normalized.as_bytes())
            .map(TextEncoding::Whatwg)
            .ok_or_else(|| FsError::UnknownEncoding {
                label: label.to_owned(),
            }),
    }
}

/// Decode `bytes` strictly, translating `\r\n` and lone `\r` into `\n`.
///
/// Returns `None` on any malformed sequence. A byte order mark is kept as
/// content, it is not sniffed.
pub(crate) fn decode_text(bytes: &[u8], encoding: TextEncoding) -> Option<String> {
    let decoded = encoding.decode(bytes)?;
    if decoded.contains('\r') {
        Some(decoded.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Some(decoded.into_owned())
    }
}

/// Split text into lines without their terminators.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n')
        .map(|line| chomp(line).to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chomp_variants() {
        assert_eq!(chomp("test\n"), "test");
        assert_eq!(chomp("test\r\n"), "test");
        assert_eq!(chomp("test"), "test");
        assert_eq!(chomp("test\n\n"), "test\n");
    }

    #[test]
    fn blank_lines() {
        assert!(is_blank(""));
        assert!(is_blank(" \n \t  \n "));
        assert!(!is_blank(" test "));
    }

    #[test]
    fn labels_resolve() {
        assert_eq!(encoding_for_label("utf-8").unwrap(), TextEncoding::UTF_8);
        assert_eq!(
            encoding_for_label(" Shift_JIS ").unwrap(),
            TextEncoding::Whatwg(encoding_rs::SHIFT_JIS)
        );
        assert_eq!(encoding_for_label("US-ASCII").unwrap(), TextEncoding::Ascii);
        assert_eq!(encoding_for_label("latin1").unwrap(), TextEncoding::Latin1);
        assert_eq!(encoding_for_label("iso-8859-1").unwrap(), TextEncoding::Latin1);
        assert_eq!(
            encoding_for_label("windows-1252").unwrap(),
            TextEncoding::Whatwg(encoding_rs::WINDOWS_1252)
        );
        assert!(matches!(
            encoding_for_label("klingon"),
            Err(FsError::UnknownEncoding { .. })
        ));
    }

    #[test]
    fn decode_translates_newlines() {
        let text = decode_text(b"a\r\nb\rc\n", TextEncoding::UTF_8).unwrap();
        assert_eq!(text, "a\nb\nc\n");
    }

    #[test]
    fn decode_rejects_malformed_input() {
        assert!(decode_text(&[0x66, 0xff, 0xfe], TextEncoding::UTF_8).is_none());
        assert_eq!(
            decode_text(&[0x63, 0x61, 0x66, 0xe9], TextEncoding::Latin1).unwrap(),
            "café"
        );
    }

    #[test]
    fn ascii_rejects_high_bytes() {
        assert_eq!(decode_text(b"plain\n", TextEncoding::Ascii).unwrap(), "plain\n");
        assert!(decode_text("café\n".as_bytes(), TextEncoding::Ascii).is_none());
        assert_eq!(TextEncoding::Ascii.name(), "ASCII");
    }

    #[test]
    fn latin1_keeps_c1_controls() {
        let text = decode_text(&[0x80, 0x9f, 0xff], TextEncoding::Latin1).unwrap();
        assert_eq!(text, "\u{80}\u{9f}\u{ff}");
        let cp1252 = decode_text(&[0x80], TextEncoding::Whatwg(encoding_rs::WINDOWS_1252)).unwrap();
        assert_eq!(cp1252, "\u{20ac}");
    }

    #[test]
    fn split_lines_drops_terminators() {
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("x\n"), vec!["x"]);
        assert!(split_lines("").is_empty());
    }
}
