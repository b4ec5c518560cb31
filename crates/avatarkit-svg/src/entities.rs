//! XML entity decoding.
//!
//! Only the five predefined XML entities and numeric character references
//! are recognized. Anything else is passed through untouched.

/// Longest entity body looked at before giving up.
const MAX_ENTITY_LEN: usize = 32;

/// Decode entity and character references in `input`.
pub fn decode(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '&' {
            result.push(ch);
            continue;
        }

        let mut entity = String::new();
        let mut found_end = false;

        while let Some(&next) = chars.peek() {
            if next == ';' {
                chars.next();
                found_end = true;
                break;
            } else if next.is_ascii_alphanumeric() || next == '#' {
                entity.push(next);
                chars.next();
            } else {
                break;
            }

            if entity.len() > MAX_ENTITY_LEN {
                break;
            }
        }

        if found_end {
            if let Some(decoded) = decode_entity(&entity) {
                result.push(decoded);
                continue;
            }
        }

        // Not a reference we know; keep the original text.
        result.push('&');
        result.push_str(&entity);
        if found_end {
            result.push(';');
        }
    }

    result
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        _ => decode_numeric(entity.strip_prefix('#')?),
    }
}

fn decode_numeric(digits: &str) -> Option<char> {
    let (radix, digits) = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => (16, hex),
        None => (10, digits),
    };

    let code_point = u32::from_str_radix(digits, radix).ok()?;
    char::from_u32(code_point)
}
