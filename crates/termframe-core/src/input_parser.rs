#![forbid(unsafe_code)]

//! A minimal byte-stream decoder.
//!
//! The full input parser — the component that turns arbitrary terminal
//! byte sequences into [`InputEvent`]s — is an external collaborator (spec
//! §1) and out of scope here. This module is a thin, spec-literal decoder
//! for the handful of byte sequences spec §6 names, bundled so the
//! workspace can be driven end to end without a general VT100 parser.
//! It is not a complete terminal input parser: unrecognized escape
//! sequences are dropped rather than decoded.

use crate::event::InputEvent;

/// Decode a chunk of raw terminal input into zero or more [`InputEvent`]s.
#[must_use]
pub fn decode(input: &[u8]) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut i = 0;
    while i < input.len() {
        let b = input[i];
        match b {
            0x7f => {
                events.push(InputEvent::Delete);
                i += 1;
            }
            b'\n' | b'\r' => {
                events.push(InputEvent::Linefeed);
                i += 1;
            }
            b'\t' => {
                events.push(InputEvent::Tab);
                i += 1;
            }
            0x1b => {
                let (event, consumed) = decode_escape(&input[i..]);
                if let Some(event) = event {
                    events.push(event);
                }
                i += consumed.max(1);
            }
            _ => {
                let s = &input[i..];
                match std::str::from_utf8(s) {
                    Ok(valid) => {
                        if let Some(c) = valid.chars().next() {
                            if !c.is_control() {
                                events.push(InputEvent::Draw(c));
                            }
                            i += c.len_utf8();
                        } else {
                            i += 1;
                        }
                    }
                    Err(e) => {
                        let valid_len = e.valid_up_to();
                        if valid_len == 0 {
                            i += 1;
                        } else {
                            let valid = std::str::from_utf8(&s[..valid_len]).unwrap();
                            if let Some(c) = valid.chars().next() {
                                if !c.is_control() {
                                    events.push(InputEvent::Draw(c));
                                }
                            }
                            i += valid_len.max(1);
                        }
                    }
                }
            }
        }
    }
    events
}

/// Decode a sequence starting with `ESC` (`input[0] == 0x1b`). Returns the
/// decoded event (if any) and the number of bytes consumed.
fn decode_escape(input: &[u8]) -> (Option<InputEvent>, usize) {
    if input.len() < 2 {
        return (None, input.len());
    }
    match input[1] {
        b'[' if input.len() >= 3 => match input[2] {
            b'A' => (Some(InputEvent::CursorUp), 3),
            b'B' => (Some(InputEvent::CursorDown), 3),
            b'C' => (Some(InputEvent::CursorRight), 3),
            b'D' => (Some(InputEvent::CursorLeft), 3),
            d if d.is_ascii_digit() => decode_csi_function_key(input),
            _ => (None, 3),
        },
        b'O' if input.len() >= 3 => {
            let key = match input[2] {
                b'P' => Some(1),
                b'Q' => Some(2),
                b'R' => Some(3),
                b'S' => Some(4),
                _ => None,
            };
            (key.map(InputEvent::FunctionKey), 3)
        }
        _ => (None, 2),
    }
}

/// Decode `CSI <digits> ~`, mapping the xterm function-key numbering to a
/// 1-indexed function key.
fn decode_csi_function_key(input: &[u8]) -> (Option<InputEvent>, usize) {
    let digits_start = 2;
    let mut end = digits_start;
    while end < input.len() && input[end].is_ascii_digit() {
        end += 1;
    }
    if end >= input.len() || input[end] != b'~' {
        return (None, end.max(3));
    }
    let code: u32 = std::str::from_utf8(&input[digits_start..end])
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let function_key = match code {
        15 => Some(5),
        17 => Some(6),
        18 => Some(7),
        19 => Some(8),
        20 => Some(9),
        21 => Some(10),
        23 => Some(11),
        24 => Some(12),
        _ => None,
    };
    (function_key.map(InputEvent::FunctionKey), end + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_printable_ascii_as_draw() {
        assert_eq!(decode(b"hi"), vec![InputEvent::Draw('h'), InputEvent::Draw('i')]);
    }

    #[test]
    fn decodes_control_characters() {
        assert_eq!(decode(b"\n"), vec![InputEvent::Linefeed]);
        assert_eq!(decode(b"\r"), vec![InputEvent::Linefeed]);
        assert_eq!(decode(b"\t"), vec![InputEvent::Tab]);
        assert_eq!(decode(&[0x7f]), vec![InputEvent::Delete]);
    }

    #[test]
    fn decodes_arrow_keys() {
        assert_eq!(decode(b"\x1b[A"), vec![InputEvent::CursorUp]);
        assert_eq!(decode(b"\x1b[B"), vec![InputEvent::CursorDown]);
        assert_eq!(decode(b"\x1b[C"), vec![InputEvent::CursorRight]);
        assert_eq!(decode(b"\x1b[D"), vec![InputEvent::CursorLeft]);
    }

    #[test]
    fn decodes_function_key_fifteen_as_f5() {
        assert_eq!(decode(b"\x1b[15~"), vec![InputEvent::FunctionKey(5)]);
    }

    #[test]
    fn decodes_utf8_multibyte_character() {
        let s = "é";
        assert_eq!(decode(s.as_bytes()), vec![InputEvent::Draw('é')]);
    }
}
