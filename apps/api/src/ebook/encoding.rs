//! WinAnsi (Windows-1252) encoding for the standard Times-Roman font.
//!
//! The standard 14 fonts carry no glyphs outside this table, so anything else is a
//! render failure rather than a silent substitution.

use encoding_rs::{EncoderResult, WINDOWS_1252};

use super::render::RenderError;

/// Encodes one line of text for a `Tj` operand.
///
/// Tabs become spaces. Control characters are rejected up front: the WHATWG
/// windows-1252 encoder maps U+0081, U+008D, U+008F, U+0090 and U+009D onto the five
/// byte slots that PDF's WinAnsiEncoding leaves undefined.
pub fn encode_win_ansi(text: &str) -> Result<Vec<u8>, RenderError> {
    let unencodable = |ch| RenderError::Unencodable {
        ch,
        text: text.to_string(),
    };

    let line = text.replace('\t', " ");
    if let Some(ch) = line.chars().find(|c| c.is_control()) {
        return Err(unencodable(ch));
    }

    // Single-byte target: never more output bytes than UTF-8 input bytes.
    let mut output = vec![0; line.len()];
    let mut encoder = WINDOWS_1252.new_encoder();
    let (result, _, written) =
        encoder.encode_from_utf8_without_replacement(&line, &mut output, true);
    match result {
        EncoderResult::InputEmpty => {
            output.truncate(written);
            Ok(output)
        }
        EncoderResult::Unmappable(ch) => Err(unencodable(ch)),
        EncoderResult::OutputFull => Err(RenderError::Serialize(format!(
            "WinAnsi output buffer too small for {text:?}"
        ))),
    }
}
