/// Indent a rendered block by one tab for console display.
///
/// The tab is prepended to the block and after every newline, so the
/// serializer's own nesting is left untouched.
pub fn render(block: &str) -> String {
    format!("\t{}", block.replace('\n', "\n\t"))
}
