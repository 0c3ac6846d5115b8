/// Escapes characters that are special in LaTeX text mode.
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\textasciicircum{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes the URL argument of `\href`. `%` and `#` are escaped for
/// hyperref; backslashes and braces are percent-encoded so the argument
/// stays balanced.
pub fn escape_url(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '%' | '#' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\\' => escaped.push_str(r"\%5C"),
            '{' => escaped.push_str(r"\%7B"),
            '}' => escaped.push_str(r"\%7D"),
            _ => escaped.push(c),
        }
    }
    escaped
}
