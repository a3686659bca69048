//! Escaping for search filters (RFC 4515) and DN attribute values (RFC 4514).
//!
//! Filter escaping and DN escaping are different: filter values hex-escape
//! the filter metacharacters, DN values backslash-escape the separators.

/// Escape special characters in a filter assertion value.
///
/// `\`, `*`, `(`, `)` and NUL are replaced by their `\hh` forms.
pub fn escape_filter_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => result.push_str("\\5c"),
            '*' => result.push_str("\\2a"),
            '(' => result.push_str("\\28"),
            ')' => result.push_str("\\29"),
            '\0' => result.push_str("\\00"),
            _ => result.push(ch),
        }
    }
    result
}

/// Characters that are escaped with a backslash prefix inside a DN value.
const DN_SPECIALS: &[char] = &[',', '+', '"', '\\', '<', '>', ';'];

/// Characters that may legally follow a backslash in an escaped DN value.
fn is_escapable(ch: char) -> bool {
    DN_SPECIALS.contains(&ch) || matches!(ch, ' ' | '#' | '=')
}

/// Escape a raw DN attribute value.
///
/// Escapes `,` `+` `"` `\` `<` `>` `;`, NUL, leading and trailing spaces and a
/// leading `#`. Escape sequences already present (`\,` or `\2c`) are kept as
/// they are, so `escape_dn_value(&escape_dn_value(x)) == escape_dn_value(x)`.
pub fn escape_dn_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut result = String::with_capacity(value.len() + 4);
    let last = chars.len().saturating_sub(1);
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch == '\\' {
            // Keep an existing pair escape as is
            if let Some(&next) = chars.get(i + 1) {
                if is_escapable(next) {
                    result.push('\\');
                    result.push(next);
                    i += 2;
                    continue;
                }
                // Keep an existing hex escape as is
                if let Some(&after) = chars.get(i + 2) {
                    if next.is_ascii_hexdigit() && after.is_ascii_hexdigit() {
                        result.push('\\');
                        result.push(next);
                        result.push(after);
                        i += 3;
                        continue;
                    }
                }
            }
            result.push_str("\\\\");
            i += 1;
            continue;
        }

        match ch {
            c if DN_SPECIALS.contains(&c) => {
                result.push('\\');
                result.push(c);
            }
            '\0' => result.push_str("\\00"),
            ' ' if i == 0 || i == last => result.push_str("\\ "),
            '#' if i == 0 => result.push_str("\\#"),
            c => result.push(c),
        }
        i += 1;
    }

    result
}
