//! The single splitting primitive used at every boundary of a line

/// Cut `text` around the first occurrence of `separator`.
///
/// Returns the text before the separator and, if the separator was found,
/// the text after it. When the separator is absent the whole input comes
/// back as the first part and the second part is `None`.
pub fn cut(text: &str, separator: char) -> (&str, Option<&str>) {
    match text.split_once(separator) {
        Some((before, after)) => (before, Some(after)),
        None => (text, None),
    }
}

/// Like [`cut`], but an absent separator yields an empty second part.
pub fn cut_or_empty(text: &str, separator: char) -> (&str, &str) {
    let (before, after) = cut(text, separator);
    (before, after.unwrap_or(""))
}
