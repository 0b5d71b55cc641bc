//! Entity reference resolution for the HTML tokenizer.

use std::borrow::Cow;

use crate::error::RewriteError;

/// Resolve the body of an entity reference (the part between `&` and `;`).
///
/// XML entities, common HTML named entities and numeric references are
/// resolved. Unknown named entities are kept literally.
pub(crate) fn resolve_entity(name: &str) -> Result<Cow<'static, str>, RewriteError> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => code.parse::<u32>(),
        };
        return value
            .ok()
            .and_then(char::from_u32)
            .map(|c| Cow::Owned(c.to_string()))
            .ok_or_else(|| RewriteError::CharRef(name.to_owned()));
    }

    Ok(entity_to_unicode(name).map_or_else(|| Cow::Owned(format!("&{name};")), Cow::Borrowed))
}

/// Map a named entity to its Unicode text.
fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        // XML
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",

        // Punctuation
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "middot" => "\u{00b7}",

        // Arrows
        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "harr" => "\u{2194}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",

        // Math
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "deg" => "\u{00b0}",

        // Legal and currency
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "yen" => "\u{00a5}",
        "cent" => "\u{00a2}",

        // Misc
        "para" => "\u{00b6}",
        "sect" => "\u{00a7}",
        "dagger" => "\u{2020}",
        "Dagger" => "\u{2021}",
        "frac12" => "\u{00bd}",
        "frac14" => "\u{00bc}",
        "frac34" => "\u{00be}",

        _ => return None,
    })
}
