const ELLIPSIS: char = '\u{2026}';

pub(super) fn char_width_factor(ch: char) -> f64 {
    // Approximate advance widths for a proportional sans-serif face, as a
    // fraction of the font size.
    match ch {
        ' ' => 0.28,
        '.' | ',' | ':' | ';' | '|' | '!' | '\'' | '(' | ')' | '[' | ']' => 0.3,
        'i' | 'j' | 'l' | 'I' => 0.26,
        'f' | 't' | 'r' => 0.36,
        'm' | 'w' => 0.84,
        'M' | 'W' => 0.92,
        '0'..='9' => 0.56,
        'A'..='Z' => 0.68,
        '$' | '%' | '#' | '&' => 0.62,
        _ if ch.is_ascii() => 0.55,
        // CJK and other wide glyphs
        _ => 1.0,
    }
}

pub(super) fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().map(char_width_factor).sum::<f64>() * font_size
}

/// Shortens `text` with a trailing ellipsis until it fits in `max_width`.
pub(super) fn fit_label(text: &str, max_width: f64, font_size: f64) -> String {
    if text_width(text, font_size) <= max_width {
        return text.to_string();
    }
    let budget = max_width - char_width_factor(ELLIPSIS) * font_size;
    let mut out = String::new();
    let mut used = 0.0;
    for ch in text.chars() {
        let w = char_width_factor(ch) * font_size;
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    let trimmed = out.trim_end();
    if trimmed.is_empty() {
        return ELLIPSIS.to_string();
    }
    format!("{trimmed}{ELLIPSIS}")
}
