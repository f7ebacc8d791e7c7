//! XML name character classes and utilities
//!
//! The parser accepts a practical subset of the XML Name production:
//! a start character is an ASCII letter, `_`, or anything in the
//! `U+00C0..=U+FFFD` block; continuation characters also allow ASCII
//! digits, `:`, `.` and `-`.

/// Sentinel name given to synthetic text-only children
pub const TEXT_NODE_NAME: &str = "#text";

/// Check if a character may start a Name
pub fn is_name_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || ('\u{C0}'..='\u{FFFD}').contains(&c)
}

/// Check if a character may continue a Name
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c.is_ascii_digit() || matches!(c, ':' | '.' | '-')
}

/// Check if a string is a valid Name
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => is_name_start_char(first) && chars.all(is_name_char),
        None => false,
    }
}

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

/// Strip a namespace prefix, keeping the local part
pub fn local_name(qname: &str) -> &str {
    split_qname(qname).1
}

/// Check whether an attribute name is a namespace declaration
pub fn is_xmlns_attribute(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}
