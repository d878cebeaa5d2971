/// Locate the text of zero-based `column` in one delimited line.
///
/// The field starts right after the `column`-th delimiter and runs up to the
/// next delimiter, a control character (the line terminator included) or the
/// end of the line. Returns `None` when the line has too few delimiters or the
/// field starts with a control character, i.e. an empty trailing field.
pub fn extract_field(line: &[u8], column: usize, delimiter: u8) -> Option<&[u8]> {
    let mut start = 0;
    for _ in 0..column {
        let offset = line[start..].iter().position(|&b| b == delimiter)?;
        start += offset + 1;
    }

    let rest = &line[start..];
    match rest.first() {
        None => return None,
        Some(&b) if b == delimiter => return Some(&rest[..0]),
        Some(b) if b.is_ascii_control() => return None,
        Some(_) => {}
    }

    let end = rest
        .iter()
        .position(|&b| b == delimiter || b.is_ascii_control())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}
