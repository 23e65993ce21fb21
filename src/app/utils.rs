// src/app/utils.rs

/// Year from the first four bytes of a release date (`"1999-03-30"` -> 1999).
/// Short or non-numeric prefixes yield `None`.
pub(crate) fn leading_year(release_date: &str) -> Option<i32> {
    let head = release_date.get(..4)?;
    head.trim().parse::<i32>().ok()
}
