/// Escape text for use inside a double-quoted bash string
///
/// Only `\`, `"`, `$` and backtick keep a special meaning between double quotes,
/// so those are the only characters that get a backslash.
pub fn escape_double_quoted(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Reference to a shell variable, braced so trailing text can't extend the name
pub fn var_ref(name: &str) -> String {
    format!("${{{name}}}")
}
