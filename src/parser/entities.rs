//! Entity reference decoding

/// Decode the body of an entity reference (the part between `&` and `;`).
///
/// The five predefined entities and numeric character references are
/// replaced; anything else, including numeric references that name no
/// character, is returned verbatim as `&name;`.
pub fn decode_entity(name: &str) -> String {
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => decode_char_ref(name),
    };

    match decoded {
        Some(c) => c.to_string(),
        None => format!("&{};", name),
    }
}

fn decode_char_ref(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_entities() {
        let decoded: String = ["amp", "lt", "gt", "quot", "apos"]
            .iter()
            .map(|n| decode_entity(n))
            .collect();
        assert_eq!(decoded, "&<>\"'");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode_entity("#65"), "A");
        assert_eq!(decode_entity("#x41"), "A");
        assert_eq!(decode_entity("#X263A"), "\u{263A}");
    }

    #[test]
    fn test_unknown_entities_stay_literal() {
        assert_eq!(decode_entity("nbsp"), "&nbsp;");
        assert_eq!(decode_entity("#xZZ"), "&#xZZ;");
        assert_eq!(decode_entity("#xD800"), "&#xD800;");
    }
}
