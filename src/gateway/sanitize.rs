/// Removes markdown emphasis and list markers (`**`, `*`, `-`) and trims.
///
/// Every `*` and `-` goes, including hyphens inside words. Spacing between
/// the remaining text is kept as is.
pub fn strip_markdown(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !matches!(c, '*' | '-')).collect();
    stripped.trim().to_string()
}
