/// Normalize program text for the controller.
///
/// Trailing whitespace is stripped from every line, lines are joined with
/// `\n` and the result ends with exactly one newline. Empty input stays
/// empty.
pub fn clean_script(text: &str) -> String {
    let mut cleaned = text
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed_len = cleaned.trim_end_matches('\n').len();
    cleaned.truncate(trimmed_len);

    if !cleaned.is_empty() {
        cleaned.push('\n');
    }
    cleaned
}
