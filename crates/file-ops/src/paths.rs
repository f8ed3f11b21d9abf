//! User path expansion.

use std::path::PathBuf;

/// Expands a leading `~`, `$VAR`/`${VAR}` and `%VAR%` references.
///
/// Unknown variables are left untouched.
pub fn expand_path(path: &str) -> PathBuf {
    let expanded = expand_vars(path);
    if let Some(rest) = expanded.strip_prefix("~/") {
        crate::home_dir().join(rest)
    } else if expanded == "~" {
        crate::home_dir()
    } else {
        PathBuf::from(expanded)
    }
}

fn expand_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(['$', '%']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let (name, consumed) = if let Some(body) = tail.strip_prefix("${") {
            match body.find('}') {
                Some(end) => (&body[..end], end + 3),
                None => ("", 0),
            }
        } else if let Some(body) = tail.strip_prefix('$') {
            let end = body
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(body.len());
            (&body[..end], end + 1)
        } else {
            let body = &tail[1..];
            match body.find('%') {
                Some(end) => (&body[..end], end + 2),
                None => ("", 0),
            }
        };

        match (name.is_empty(), std::env::var(name)) {
            (false, Ok(value)) => {
                out.push_str(&value);
                rest = &tail[consumed..];
            }
            _ => {
                out.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
