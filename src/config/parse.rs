use std::collections::BTreeMap;

/// Parses `java.util.Properties`-style text.
///
/// Lines whose first non-blank character is `#` or `!` are comments. A line
/// ending in an odd number of backslashes continues on the next line. The key
/// ends at the first unescaped `=`, `:` or whitespace; one `=`/`:` separator
/// and the blanks around it are skipped. Escapes (`\:`, `\=`, `\\`, `\t`,
/// `\n`, `\r`, `\f`, `\uXXXX`) are decoded in keys and values. Trailing
/// whitespace on values is dropped. Later duplicates win.
pub(crate) fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    for line in logical_lines(content) {
        let (key, value) = split_entry(&line);
        if key.is_empty() {
            continue;
        }
        properties.insert(key, value);
    }
    properties
}

fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;
    for raw in content.lines() {
        let line = raw.trim_start();
        if !continuing && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }
        let (body, continues) = strip_continuation(line);
        current.push_str(body);
        continuing = continues;
        if !continues {
            lines.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn strip_continuation(line: &str) -> (&str, bool) {
    let trailing = line.chars().rev().take_while(|ch| *ch == '\\').count();
    if trailing & 1 == 1 {
        (line.strip_suffix('\\').unwrap_or(line), true)
    } else {
        (line, false)
    }
}

fn split_entry(line: &str) -> (String, String) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (index, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
        } else if ch == '=' || ch == ':' || ch.is_whitespace() {
            key_end = index;
            break;
        }
    }

    let (key, rest) = line.split_at(key_end);
    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (unescape(key), unescape(rest.trim()))
}

fn unescape(raw: &str) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => decoded.push('\t'),
            Some('n') => decoded.push('\n'),
            Some('r') => decoded.push('\r'),
            Some('f') => decoded.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(unicode) => decoded.push(unicode),
                    None => {
                        decoded.push_str("\\u");
                        decoded.push_str(&hex);
                    }
                }
            }
            Some(other) => decoded.push(other),
            None => {}
        }
    }
    decoded
}

pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
