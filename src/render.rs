//! HTML presentation of generation results
//!
//! Every piece of user- or server-supplied text goes through [`escape_html`]
//! before any markup is added, so the only tags in the output are the ones
//! produced here and in the templates.

use crate::models::GenerateResponse;
use crate::templates;
use once_cell::sync::Lazy;
use regex::Regex;

pub const EXAMPLE_DELIMITER: &str = "### Example";
pub const NO_EXAMPLES_HTML: &str = "<p>No context examples available.</p>";

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());
static SECTION_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Verse [0-9]+|Chorus|Bridge|Outro").unwrap());

pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn line_breaks(escaped: &str) -> String {
    escaped
        .replace("\r\n", "\n")
        .replace("\n\n", "<br><br>")
        .replace('\n', "<br>")
}

/// Escape a reasoning trace and apply `**bold**` / `*italic*` markup.
pub fn format_reasoning(reasoning: &str) -> String {
    let html = line_breaks(&escape_html(reasoning));
    let html = BOLD.replace_all(&html, "<strong>${1}</strong>");
    ITALIC.replace_all(&html, "<em>${1}</em>").into_owned()
}

/// Escape lyrics, italicise `[annotations]` and bold section labels.
pub fn format_lyrics(lyrics: &str) -> String {
    let html = line_breaks(&escape_html(lyrics));
    let html = BRACKETED.replace_all(&html, "<em>${0}</em>");
    SECTION_LABEL
        .replace_all(&html, "<strong>${0}</strong>")
        .into_owned()
}

pub fn count_examples(context: &str) -> usize {
    context.matches(EXAMPLE_DELIMITER).count()
}

/// Render each `### Example` section of the retrieval context.
///
/// Text before the first delimiter is discarded, as are sections whose body
/// is blank.
pub fn format_context(context: &str) -> String {
    let mut html = String::new();

    for (index, example) in context.split(EXAMPLE_DELIMITER).enumerate().skip(1) {
        let (first_line, body) = example.split_once('\n').unwrap_or((example, ""));

        let header = match first_line.trim() {
            "" => format!("Example {}", index),
            trimmed => trimmed.to_string(),
        };
        let content = body.trim();

        if content.is_empty() {
            continue;
        }

        html.push_str(&templates::render(
            templates::CONTEXT_ITEM,
            &[
                ("header", &escape_html(&header)),
                ("content", &escape_html(content)),
            ],
        ));
    }

    if html.is_empty() {
        NO_EXAMPLES_HTML.to_string()
    } else {
        html
    }
}

/// Full results region: reasoning (when present), lyrics, then context.
pub fn results_html(response: &GenerateResponse) -> String {
    let mut html = String::new();

    if let Some(reasoning) = response.reasoning() {
        html.push_str(&templates::render(
            templates::REASONING,
            &[("reasoning", &format_reasoning(reasoning))],
        ));
    }

    html.push_str(&templates::render(
        templates::LYRICS,
        &[("lyrics", &format_lyrics(&response.lyrics))],
    ));

    html.push_str(&templates::render(
        templates::CONTEXT,
        &[
            ("count", &count_examples(&response.context).to_string()),
            ("examples", &format_context(&response.context)),
        ],
    ));

    html
}

pub fn error_html(message: &str) -> String {
    templates::render(templates::ERROR, &[("message", &escape_html(message))])
}

pub fn loading_html() -> String {
    templates::LOADING.to_string()
}

pub fn welcome_html() -> String {
    templates::WELCOME.to_string()
}
