// Field sanitization: cleanup of raw model text before it reaches the page.
//
// The model wraps values in leftover markdown emphasis and assorted quote
// styles; everything that survives here is injected into the DOM by the
// frontend via innerHTML, so the output must be markup-safe.

/// Escape the characters HTML reserves (`& < > " '`) and encode newlines
/// as an explicit `<br>` break token.
///
/// Contract: the returned string is safe to place inside an HTML element
/// body or a double-quoted attribute; the only markup it contains is the
/// `<br>` produced from literal newlines. Independent of any live
/// rendering context.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(ch),
        }
    }
    out
}

/// Clean one extracted field: drop plain and curly double quotes, trim,
/// strip a leading `**`/`***` emphasis run, then make the result
/// markup-safe via [`escape_html`].
///
/// Quote removal is global, not just at the edges: the model quotes
/// fragments mid-caption too, and stray quotes read as typos in the
/// rendered post.
pub fn sanitize_field(raw: &str) -> String {
    let without_quotes: String = raw
        .chars()
        .filter(|c| !matches!(c, '"' | '“' | '”'))
        .collect();
    let cleaned = strip_leading_emphasis(without_quotes.trim()).trim();
    escape_html(cleaned)
}

/// Remove a run of two or more `*` at the start of the text. A single
/// leading `*` is left alone; it is more likely a stray bullet than an
/// emphasis marker, and the prompt format never uses single-star
/// emphasis.
fn strip_leading_emphasis(text: &str) -> &str {
    let rest = text.trim_start_matches('*');
    let stars = text.len() - rest.len();
    if stars >= 2 {
        rest
    } else {
        text
    }
}
