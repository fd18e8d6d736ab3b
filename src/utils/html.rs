use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Whitelist-based: safe tags (like <b>, <p>) survive, while dangerous tags
/// (like <script>, <iframe>) and event-handler attributes are stripped.
/// The output is HTML, so `&` and `<` in plain text come back escaped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

/// True when the input has content but nothing visible survives sanitizing,
/// e.g. a lone `<script>` block. Blank input is not markup-only.
pub fn is_markup_only(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && clean_html(trimmed).trim().is_empty()
}
