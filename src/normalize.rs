//! Stage 1: string normalization.
//!
//! Canonical composition plus removal of invisible characters that OCR and
//! mail clients leave behind. Symbols that carry meaning (currency, accents,
//! trademark marks, smart quotes, dashes, non-Latin scripts) pass through.

use unicode_normalization::UnicodeNormalization;

/// Normalize raw extracted text.
///
/// - Unicode NFC normalization
/// - CRLF / CR line endings folded to LF
/// - C0/C1 control characters removed (tab and newline kept)
/// - zero-width characters, soft hyphen and BOM removed
/// - non-breaking space / hyphen rewritten to ASCII
/// - line and paragraph separators rewritten to newline
/// - fullwidth ASCII forms mapped to ASCII
///
/// Total: empty input yields empty output.
pub fn normalize_text(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.nfc().peekable();

    while let Some(c) = chars.next() {
        if c == '\r' {
            // CRLF collapses into the LF that follows
            if chars.peek() != Some(&'\n') {
                result.push('\n');
            }
            continue;
        }

        if is_removable_char(c) {
            continue;
        }

        if let Some(replacement) = ascii_replacement(c) {
            result.push(replacement);
            continue;
        }

        if let Some(normalized) = normalize_fullwidth(c) {
            result.push(normalized);
            continue;
        }

        result.push(c);
    }

    result
}

/// Check if character should be dropped outright
fn is_removable_char(c: char) -> bool {
    match c {
        '\t' | '\n' => false,
        '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}' => true,
        '\u{200B}'   // Zero-width space
        | '\u{200C}' // Zero-width non-joiner
        | '\u{200D}' // Zero-width joiner
        | '\u{2060}' // Word joiner
        | '\u{FEFF}' // BOM
        | '\u{FFFD}' // Replacement character
        | '\u{00AD}' // Soft hyphen
        => true,
        _ => false,
    }
}

/// Characters rewritten to a plain ASCII (or newline) equivalent
fn ascii_replacement(c: char) -> Option<char> {
    match c {
        '\u{00A0}' | '\u{202F}' => Some(' '),
        '\u{2011}' => Some('-'),
        '\u{2028}' | '\u{2029}' => Some('\n'),
        _ => None,
    }
}

/// Normalize fullwidth characters to ASCII equivalents
fn normalize_fullwidth(c: char) -> Option<char> {
    match c {
        '\u{3000}' => Some(' '), // Ideographic space -> regular space
        '\u{FF01}'..='\u{FF5E}' => {
            // Fullwidth ASCII variants (！to ～)
            let offset = c as u32 - 0xFF01;
            char::from_u32(0x21 + offset)
        }
        _ => None,
    }
}
