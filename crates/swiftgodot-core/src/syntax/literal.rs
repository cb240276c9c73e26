//! Decoding of string literal tokens.

/// The value of a Swift string literal token, as written in source.
///
/// Handles raw (`#"..."#`) and multi-line (`"""`) forms. Returns `None` for
/// literals containing interpolation, since their value is not static, and
/// for malformed escapes.
pub fn decode_string_literal(text: &str) -> Option<String> {
    let hashes = text.bytes().take_while(|b| *b == b'#').count();
    let pad = &text[..hashes];
    let inner = text.get(hashes..)?.strip_suffix(pad)?;

    if let Some(body) = inner
        .strip_prefix("\"\"\"")
        .and_then(|rest| rest.strip_suffix("\"\"\""))
    {
        let body = dedent(body)?;
        return unescape(&body, pad, true);
    }
    let body = inner.strip_prefix('"')?.strip_suffix('"')?;
    unescape(body, pad, false)
}

/// Strip the indentation of the closing delimiter from every line of a
/// multi-line literal body, along with the first and last line breaks.
fn dedent(body: &str) -> Option<String> {
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))?;
    let (content, indent) = match body.rfind('\n') {
        Some(nl) => (&body[..nl], &body[nl + 1..]),
        None => ("", body),
    };
    if !indent.chars().all(|c| c == ' ' || c == '\t') {
        return None;
    }
    if content.is_empty() && body.find('\n').is_none() {
        return Some(String::new());
    }
    let content = content.strip_suffix('\r').unwrap_or(content);
    let lines: Vec<&str> = content
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            line.strip_prefix(indent).unwrap_or_else(|| {
                if line.trim().is_empty() { "" } else { line }
            })
        })
        .collect();
    Some(lines.join("\n"))
}

fn unescape(body: &str, pad: &str, multiline: bool) -> Option<String> {
    let escape = format!("\\{pad}");
    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    while let Some(pos) = rest.find(&escape) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + escape.len()..];
        let mut chars = rest.chars();
        let c = chars.next()?;
        let mut after = chars.as_str();
        match c {
            '0' => out.push('\0'),
            '\\' => out.push('\\'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            'u' => {
                let hex = after.strip_prefix('{')?;
                let end = hex.find('}')?;
                let code = u32::from_str_radix(&hex[..end], 16).ok()?;
                out.push(char::from_u32(code)?);
                after = &hex[end + 1..];
            }
            '\n' if multiline => {}
            // Interpolation: the value is only known at run time.
            '(' => return None,
            _ => return None,
        }
        rest = after;
    }
    out.push_str(rest);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_literal() {
        assert_eq!(decode_string_literal(r#""Demo""#).as_deref(), Some("Demo"));
        assert_eq!(decode_string_literal(r#""""#).as_deref(), Some(""));
    }

    #[test]
    fn escapes() {
        assert_eq!(
            decode_string_literal(r#""a\"b\\c\td\u{1F600}""#).as_deref(),
            Some("a\"b\\c\td\u{1F600}")
        );
        assert_eq!(decode_string_literal(r#""bad \q""#), None);
    }

    #[test]
    fn interpolation_has_no_static_value() {
        assert_eq!(decode_string_literal(r#""Demo\(suffix)""#), None);
    }

    #[test]
    fn raw_literal_keeps_backslashes() {
        assert_eq!(
            decode_string_literal(r##"#"C:\path\n"#"##).as_deref(),
            Some(r"C:\path\n")
        );
        assert_eq!(decode_string_literal(r##"#"bad\#q"#"##), None);
        assert_eq!(
            decode_string_literal(r##"#"tab\#tthere"#"##).as_deref(),
            Some("tab\tthere")
        );
    }

    #[test]
    fn multiline_literal_is_dedented() {
        let text = "\"\"\"\n    first\n      second\n\n    third \\\n    joined\n    \"\"\"";
        assert_eq!(
            decode_string_literal(text).as_deref(),
            Some("first\n  second\n\nthird joined")
        );
    }

    #[test]
    fn rejects_non_literals() {
        assert_eq!(decode_string_literal("Demo"), None);
        assert_eq!(decode_string_literal("\""), None);
    }
}
