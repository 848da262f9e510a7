/// Owned, fixed-length byte buffer holding a lexeme.
pub type FixedBuf = Box<[u8]>;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

const CONTROL_MNEMONICS: [&str; 32] = [
    "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", "BS", "HT", "LF", "VT", "FF", "CR",
    "SO", "SI", "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB", "CAN", "EM", "SUB", "ESC",
    "FS", "GS", "RS", "US",
];

fn push_hex(out: &mut String, byte: u8) {
    out.push_str("\\x");
    out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
    out.push(HEX_DIGITS[(byte & 0x0F) as usize] as char);
}

/// Escapes `bytes` into a printable string.
///
/// Printable ASCII is kept as is (with `\` and `"` backslash-escaped), tab,
/// line feed and carriage return become `\t`, `\n`, `\r`, and every other byte
/// becomes `\xHH`.
pub fn escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());

    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            0x20..=0x7E => out.push(byte as char),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            _ => push_hex(&mut out, byte),
        }
    }

    out
}

/// Renders a single byte for a diagnostic.
///
/// * printable ASCII: `'c'`
/// * tab, line feed, carriage return: `'\t'`, `'\n'`, `'\r'`
/// * other control bytes: their ASCII mnemonic (`NUL`, `ESC`, `DEL`, ...)
/// * anything above 0x7F: `\xHH`
pub fn render_byte(byte: u8) -> String {
    match byte {
        b'\t' => String::from("'\\t'"),
        b'\n' => String::from("'\\n'"),
        b'\r' => String::from("'\\r'"),
        0x00..=0x1F => String::from(CONTROL_MNEMONICS[byte as usize]),
        0x7F => String::from("DEL"),
        0x20..=0x7E => format!("'{}'", byte as char),
        _ => {
            let mut out = String::with_capacity(4);
            push_hex(&mut out, byte);
            out
        }
    }
}

/// Copies the bytes into a `String`, replacing invalid UTF-8.
pub fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
