//! Stable labels for the three nesting levels of a rendered paper:
//! Arabic numerals for questions, lowercase letters for sub-questions,
//! lowercase Roman numerals for sub-sub-questions. Composite labels
//! ("2ci") are concatenated by the document generator.

const ROMAN_PAIRS: &[(u32, &str)] =
    &[(50, "l"), (40, "xl"), (10, "x"), (9, "ix"), (5, "v"), (4, "iv"), (1, "i")];

/// Label for a zero-based `index` at nesting `depth` 0, 1, or 2. Depths
/// beyond 2 never occur (the tree caps at three levels) and fall back to the
/// deepest rule.
pub fn label(index: usize, depth: u8) -> String {
    match depth {
        0 => (index + 1).to_string(),
        1 => letter_label(index),
        _ => roman_lower(index as u32 + 1),
    }
}

// Spreadsheet-style continuation past "z": index 26 -> "aa", 27 -> "ab".
fn letter_label(index: usize) -> String {
    let mut remaining = index + 1;
    let mut out = Vec::new();
    while remaining > 0 {
        remaining -= 1;
        out.push(b'a' + (remaining % 26) as u8);
        remaining /= 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn roman_lower(mut value: u32) -> String {
    let mut out = String::new();
    for &(weight, symbol) in ROMAN_PAIRS {
        while value >= weight {
            out.push_str(symbol);
            value -= weight;
        }
    }
    out
}
