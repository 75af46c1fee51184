//! C array literal text for exported icons.

/// Formats packed icon bytes as the C declaration consumed by KOS homebrew,
/// six `0xHH` values per line:
///
/// ```text
/// unsigned char icon[] = {
///     0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
///     ...
///     0x00,
/// };
/// ```
pub fn format_c_array(bytes: &[u8]) -> String {
    let mut out = String::from("unsigned char icon[] = {");
    for (i, byte) in bytes.iter().enumerate() {
        if i % 6 == 0 {
            out.push_str("\n    ");
        }
        out.push_str(&format!("0x{:02X}, ", byte));
    }
    let trimmed = out.trim_end_matches([',', ' ']).len();
    out.truncate(trimmed);
    out.push_str(",\n};");
    out
}

/// Pulls the `0xHH` values back out of an exported header so a saved icon
/// can be reopened. Anything that is not a hex byte token is ignored.
pub fn parse_c_array(text: &str) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    for token in text.split(|c: char| !c.is_ascii_alphanumeric()) {
        let hex = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
            Some(hex) => hex,
            None => continue,
        };
        let byte = u8::from_str_radix(hex, 16)
            .map_err(|_| format!("invalid byte value '{}'", token))?;
        bytes.push(byte);
    }
    if bytes.is_empty() {
        return Err("no 0xHH byte values found".into());
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::{format_c_array, parse_c_array};
    use crate::icon::Icon;

    #[test]
    fn format_matches_exported_layout() {
        let text = format_c_array(&Icon::new().encode());
        assert!(text.starts_with("unsigned char icon[] = {\n    0x00, "));
        assert!(text.ends_with("0x00,\n};"));
        // 192 bytes wrap to 32 lines of 6 values.
        assert_eq!(text.lines().count(), 1 + 32 + 1);
        assert_eq!(text.matches("0x00").count(), Icon::ENCODED_LEN);
    }

    #[test]
    fn format_wraps_six_values_per_line() {
        let bytes: Vec<u8> = (0..12).collect();
        let text = format_c_array(&bytes);
        assert_eq!(
            text,
            "unsigned char icon[] = {\n    \
             0x00, 0x01, 0x02, 0x03, 0x04, 0x05, \n    \
             0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,\n};"
        );
    }

    #[test]
    fn parse_inverts_format() {
        let mut icon = Icon::new();
        icon.paint(0, 0);
        icon.paint(47, 31);
        let bytes = icon.encode();
        let parsed = parse_c_array(&format_c_array(&bytes)).unwrap();
        assert_eq!(parsed, bytes);
    }

    #[test]
    fn parse_rejects_bad_hex() {
        assert!(parse_c_array("0xGG,").is_err());
        assert!(parse_c_array("0x100,").is_err());
        assert!(parse_c_array("no bytes here").is_err());
    }
}
