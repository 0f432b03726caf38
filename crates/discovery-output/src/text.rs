//! Terminal-safe text.

use std::borrow::Cow;

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// Returns true for bytes that must not reach the terminal.
///
/// Tab, line feed and carriage return are allowed through.
const fn is_unsafe(b: u8) -> bool {
    b == ESC || b == 0x7f || (b < 0x20 && b != b'\t' && b != b'\n' && b != b'\r')
}

/// Removes control characters and ANSI escape sequences from provider text.
///
/// Strips CSI sequences (`ESC [` up to a final byte in `0x40..=0x7e`), OSC
/// sequences (`ESC ]` up to BEL or `ESC \`), bare ESC, DEL and the C0
/// controls other than tab, line feed and carriage return.
///
/// Clean input is returned borrowed.
pub(crate) fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    if !bytes.iter().any(|&b| is_unsafe(b)) {
        return Cow::Borrowed(s);
    }

    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut i = 0;
    while i < len {
        match bytes[i] {
            ESC if bytes.get(i + 1) == Some(&b'[') => {
                i += 2;
                while i < len {
                    let c = bytes[i];
                    i += 1;
                    if (0x40..=0x7e).contains(&c) {
                        break;
                    }
                }
            }
            ESC if bytes.get(i + 1) == Some(&b']') => {
                i += 2;
                while i < len {
                    if bytes[i] == BEL {
                        i += 1;
                        break;
                    }
                    if bytes[i] == ESC && bytes.get(i + 1) == Some(&b'\\') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            b if is_unsafe(b) => i += 1,
            _ => {
                let start = i;
                while i < len && !is_unsafe(bytes[i]) {
                    i += 1;
                }
                // Only ASCII bytes stop the run, so both ends are char boundaries.
                out.push_str(&s[start..i]);
            }
        }
    }
    Cow::Owned(out)
}
