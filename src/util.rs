/// Splits a key into its first unit (one `char`) and the remainder.
///
/// Returns `None` for the empty key.
pub fn split_first_unit(key: &str) -> Option<(&str, &str)> {
    let first = key.chars().next()?;
    Some(key.split_at(first.len_utf8()))
}

/// Strips `label` from the front of `key` when it is a strict prefix of it.
///
/// Returns the non-empty remainder, or `None` if `label` is not a prefix or equals `key`.
pub fn strip_proper_prefix<'a>(key: &'a str, label: &str) -> Option<&'a str> {
    key.strip_prefix(label).filter(|rest| !rest.is_empty())
}
