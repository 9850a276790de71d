/// Strips the feed text down to data-bearing lines.
///
/// The export wraps its data in `#`-prefixed comment banners and may carry a
/// UTF-8 BOM depending on which mirror served it. Blank lines are dropped
/// after trimming. This stage never fails; an all-comment feed yields an
/// empty vec.
pub fn sanitize_feed(raw: &str) -> Vec<String> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    text.lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}
