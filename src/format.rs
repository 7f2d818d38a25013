//! Placeholder substitution that never fails
//!
//! `{name}` is replaced when `name` is one of the supplied parameters.
//! Unknown placeholders and stray braces are copied through unchanged.

/// Substitute `{name}` placeholders in `template`
pub fn safe_format(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let Some(close) = tail[1..].find(|c: char| c == '{' || c == '}') else {
            out.push_str(tail);
            return out;
        };
        let close = close + 1;

        // "{a{b}" - the first brace is stray, retry from the inner one
        if tail.as_bytes()[close] == b'{' {
            out.push_str(&tail[..close]);
            rest = &tail[close..];
            continue;
        }

        let name = &tail[1..close];
        match params.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    out
}
