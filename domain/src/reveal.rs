/// Every non-empty prefix of `text`, shortest first, cut on `char` boundaries.
///
/// The last item is always the full text. Empty input yields nothing.
pub fn prefixes(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .map(move |end| &text[..end])
}
