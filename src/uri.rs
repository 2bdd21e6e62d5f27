/// Whole-URI percent encoding with browser `encodeURI` / `decodeURI` semantics
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except alphanumerics and `;,/?:@&=+$-_.!~*'()#` gets escaped
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Escapes of these stay escaped when decoding a whole URI
const URI_RESERVED: &[u8] = b";/?:@&=+$,#";

/// Escape a full URI, leaving its structure characters intact.
/// `%` is not structural, so existing escapes get escaped again.
pub fn encode_uri(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}

/// Undo `encode_uri`.
///
/// Escapes that decode to a reserved character are left as written (including
/// their hex case). Malformed escapes pass through untouched and invalid
/// UTF-8 is replaced rather than rejected.
pub fn decode_uri(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let Some(decoded) = bytes.get(i + 1..i + 3).and_then(hex_byte) {
                if URI_RESERVED.contains(&decoded) {
                    out.extend_from_slice(&bytes[i..i + 3]);
                } else {
                    out.push(decoded);
                }
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_byte(pair: &[u8]) -> Option<u8> {
    let high = (pair[0] as char).to_digit(16)?;
    let low = (pair[1] as char).to_digit(16)?;
    Some((high * 16 + low) as u8)
}
