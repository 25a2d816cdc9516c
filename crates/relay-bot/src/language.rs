//! Best-effort language detection
//!
//! Script-based heuristic used for logging only. Detection can never
//! fail past this module: anything unrecognized falls back to `"en"`.

/// Fallback when nothing can be detected
pub const FALLBACK_LANGUAGE: &str = "en";

/// Classify text into a language code by its dominant Unicode script.
///
/// Deterministic for a fixed input. Latin-script text maps to `"en"`;
/// distinguishing Latin-script languages is out of scope for a
/// logging-only signal.
pub fn detect(text: &str) -> &'static str {
    let mut cyrillic = 0usize;
    let mut han = 0usize;
    let mut kana = 0usize;
    let mut hangul = 0usize;
    let mut arabic = 0usize;
    let mut hebrew = 0usize;
    let mut greek = 0usize;
    let mut devanagari = 0usize;
    let mut latin = 0usize;

    for c in text.chars() {
        match c {
            '\u{0400}'..='\u{04FF}' => cyrillic += 1,
            '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' => han += 1,
            '\u{3040}'..='\u{30FF}' => kana += 1,
            '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' => hangul += 1,
            '\u{0600}'..='\u{06FF}' => arabic += 1,
            '\u{0590}'..='\u{05FF}' => hebrew += 1,
            '\u{0370}'..='\u{03FF}' => greek += 1,
            '\u{0900}'..='\u{097F}' => devanagari += 1,
            'a'..='z' | 'A'..='Z' | '\u{00C0}'..='\u{024F}' => latin += 1,
            _ => {}
        }
    }

    // Kana outranks Han so Japanese text with kanji still reads as ja
    let candidates = [
        ("ja", kana),
        ("ko", hangul),
        ("zh", han),
        ("ru", cyrillic),
        ("ar", arabic),
        ("he", hebrew),
        ("el", greek),
        ("hi", devanagari),
        ("en", latin),
    ];

    candidates
        .iter()
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(code, _)| *code)
        .unwrap_or(FALLBACK_LANGUAGE)
}
