//! Character reference decoding for text content.
//!
//! Only the references that commonly appear in hand-written markup are
//! recognised. Anything else is passed through verbatim, which matches how
//! browsers treat an ambiguous ampersand.

/// Named references and their replacement characters.
const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("copy", '\u{a9}'),
    ("reg", '\u{ae}'),
    ("hellip", '\u{2026}'),
    ("mdash", '\u{2014}'),
    ("ndash", '\u{2013}'),
];

/// Decode `&name;`, `&#NN;` and `&#xHH;` references in `text`.
///
/// ```
/// use wisp_dom::decode_entities;
///
/// assert_eq!(decode_entities("a &amp; b &#65;&#x42;"), "a & b AB");
/// assert_eq!(decode_entities("AT&T"), "AT&T");
/// ```
#[must_use]
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        match tail.find(';').and_then(|end| {
            decode_reference(&tail[..end]).map(|ch| (ch, end))
        }) {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    NAMED
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|&(_, ch)| ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_references() {
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode_entities("&#72;&#x69;"), "Hi");
    }

    #[test]
    fn test_unknown_reference_passes_through() {
        assert_eq!(decode_entities("&bogus; &"), "&bogus; &");
    }

    #[test]
    fn test_invalid_code_point_passes_through() {
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
    }
}
