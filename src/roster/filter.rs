const ARABIC_BLOCK: std::ops::RangeInclusive<char> = '\u{0600}'..='\u{06FF}';

pub fn is_roster_line(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && contains_arabic(trimmed)
}

pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(|character| ARABIC_BLOCK.contains(&character))
}
