//! Shared utility functions for rendering.

/// Escape the five HTML-significant characters.
///
/// # Examples
///
/// ```
/// use mdmin_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &#34;c&#34;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(&mut out, s);
    out
}

/// Append `s` to `out` with HTML escaping applied.
pub(crate) fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Like [`push_escaped`], but also writes line breaks and tabs as character
/// references so the text stays on one line.
pub(crate) fn push_escaped_inline(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            '\t' => out.push_str("&#x9;"),
            _ => push_escaped(out, c.encode_utf8(&mut [0; 4])),
        }
    }
}

/// Strip the whitespace that surrounds heading text in rendered HTML.
pub(crate) fn trim_title(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
}
