//! Price context around a matched row.
//!
//! Tender tables often print the unit price on a neighbouring line, so the
//! money parser looks at a small window around the row. Quantities are read
//! from the row alone.

/// Join `lines[index - before ..= index + after]`, clipped to the slice, in
/// document order.
pub fn context_window<S: AsRef<str>>(lines: &[S], index: usize, before: usize, after: usize) -> String {
    if index >= lines.len() {
        return String::new();
    }

    let start = index.saturating_sub(before);
    let end = index.saturating_add(after).min(lines.len() - 1);

    lines[start..=end]
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
