// src/core/sanitize.rs

/// Make a config value safe to embed in a file name.
/// Path separators and other reserved characters become `_`; whitespace runs
/// collapse to a single `_`. Plain codes like `040` or `Spending_OGE` pass through.
pub fn sanitize_file_part(s: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_us = false;
    for ch in s.trim().chars() {
        if ch.is_alphanumeric() || ch == '-' || ch == '.' {
            out.push(ch);
            last_us = false;
        } else if !last_us {
            out.push('_');
            last_us = true;
        }
    }
    let out = out.trim_matches(|c| c == '_' || c == '.').to_string();
    if out.is_empty() { fallback.to_string() } else { out }
}
