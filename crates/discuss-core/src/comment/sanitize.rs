//! Markup sanitization for freeform comment text

/// Cleans user-supplied text before it is stored
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, input: &str) -> String;
}

/// Drops well-formed HTML tags and comments, escapes every other angle bracket.
///
/// A run only counts as a tag when it names a known HTML element, its
/// attributes parse, and it closes with `>`. Anything else is kept as text.
/// `"<b>hi</b> & 1 < 2"` becomes `"hi & 1 &lt; 2"`, and `"a<b to see"`
/// stays `"a&lt;b to see"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripTags;

impl Sanitizer for StripTags {
    fn sanitize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(pos) = rest.find(&['<', '>'][..]) {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if tail.starts_with('>') {
                out.push_str("&gt;");
                rest = &tail[1..];
                continue;
            }

            match markup_len(tail) {
                Some(len) => rest = &tail[len..],
                None => {
                    out.push_str("&lt;");
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);

        out.trim().to_string()
    }
}

const ELEMENTS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "center", "cite", "code", "col",
    "colgroup", "data", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt", "em",
    "embed", "fieldset", "figcaption", "figure", "font", "footer", "form", "frame", "frameset",
    "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hr", "html", "i", "iframe", "img",
    "input", "ins", "kbd", "label", "legend", "li", "link", "main", "map", "mark", "marquee",
    "meta", "meter", "nav", "noscript", "object", "ol", "optgroup", "option", "output", "p",
    "param", "picture", "pre", "progress", "q", "s", "samp", "script", "section", "select",
    "small", "source", "span", "strike", "strong", "style", "sub", "summary", "sup", "svg",
    "table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time", "title",
    "tr", "track", "tt", "u", "ul", "var", "video", "wbr",
];

fn is_element(name: &str) -> bool {
    ELEMENTS.iter().any(|e| e.eq_ignore_ascii_case(name))
}

fn is_attr_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

/// Byte length of the tag or comment starting at `s[0] == '<'`, if it is one
fn markup_len(s: &str) -> Option<usize> {
    if let Some(body) = s.strip_prefix("<!--") {
        return body.find("-->").map(|end| 4 + end + 3);
    }

    let bytes = s.as_bytes();
    let mut i = 1;
    if bytes.get(i) == Some(&b'/') {
        i += 1;
    }
    let name_start = i;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if !is_element(&s[name_start..i]) {
        return None;
    }

    loop {
        let gap_start = i;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i) {
            None => return None,
            Some(b'>') => return Some(i + 1),
            Some(b'/') if bytes.get(i + 1) == Some(&b'>') => return Some(i + 2),
            // Attributes must be separated from what precedes them
            Some(_) if i == gap_start => return None,
            Some(_) => {}
        }

        let attr_start = i;
        while i < bytes.len() && is_attr_name_byte(bytes[i]) {
            i += 1;
        }
        if i == attr_start {
            return None;
        }

        if bytes.get(i) != Some(&b'=') {
            continue;
        }
        i += 1;
        match bytes.get(i) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let close = s[i + 1..].find(quote as char)?;
                if s[i + 1..i + 1 + close].contains('<') {
                    return None;
                }
                i += close + 2;
            }
            _ => {
                let value_start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'<' | b'>' | b'"' | b'\'' | b'=' | b'`')
                {
                    i += 1;
                }
                if i == value_start {
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_tags() {
        assert_eq!(StripTags.sanitize("<b>hi</b> there"), "hi there");
        assert_eq!(
            StripTags.sanitize("<script>alert(1)</script>ok"),
            "alert(1)ok"
        );
        assert_eq!(StripTags.sanitize("<!-- note -->text"), "text");
        assert_eq!(
            StripTags.sanitize("<a href=\"/x\" target='_blank'>link</a><br/>"),
            "link"
        );
        assert_eq!(StripTags.sanitize("<IMG SRC=x onerror=y>pic"), "pic");
    }

    #[test]
    fn test_escapes_stray_brackets() {
        assert_eq!(StripTags.sanitize("1 < 2 > 0"), "1 &lt; 2 &gt; 0");
        assert_eq!(StripTags.sanitize("a & b"), "a & b");
    }

    #[test]
    fn test_keeps_comparisons_as_text() {
        assert_eq!(StripTags.sanitize("a<b"), "a&lt;b");
        assert_eq!(StripTags.sanitize("x<y and y>z"), "x&lt;y and y&gt;z");
        assert_eq!(
            StripTags.sanitize("use a<b to compare, then b>c holds"),
            "use a&lt;b to compare, then b&gt;c holds"
        );
        assert_eq!(StripTags.sanitize("Vec<String>"), "Vec&lt;String&gt;");
    }

    #[test]
    fn test_unterminated_markup_is_escaped() {
        assert_eq!(
            StripTags.sanitize("<img src=x onerror=y"),
            "&lt;img src=x onerror=y"
        );
        assert_eq!(StripTags.sanitize("<!-- open"), "&lt;!-- open");
        assert_eq!(
            StripTags.sanitize("<a title=\"<b>\">x"),
            "&lt;a title=\"&gt;x"
        );
    }

    #[test]
    fn test_trims_and_can_empty() {
        assert_eq!(StripTags.sanitize("  plain  "), "plain");
        assert_eq!(StripTags.sanitize("<p></p>"), "");
    }
}
