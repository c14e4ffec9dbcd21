pub const REASONING: &str = include_str!("../data/templates/reasoning.html");
pub const LYRICS: &str = include_str!("../data/templates/lyrics.html");
pub const CONTEXT: &str = include_str!("../data/templates/context.html");
pub const CONTEXT_ITEM: &str = include_str!("../data/templates/context_item.html");
pub const ERROR: &str = include_str!("../data/templates/error.html");
pub const LOADING: &str = include_str!("../data/templates/loading.html");
pub const WELCOME: &str = include_str!("../data/templates/welcome.html");
pub const PAGE: &str = include_str!("../data/templates/page.html");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is a single pass over the template, so placeholder-like text
/// inside a value is left as-is. Unknown keys are kept verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(key);
                        result.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        assert_eq!(
            render("{{a}}|{{b}}", &[("a", "{{b}}"), ("b", "x")]),
            "{{b}}|x"
        );
    }

    #[test]
    fn test_render_keeps_unknown_and_unterminated() {
        assert_eq!(render("{{missing}} {{open", &[]), "{{missing}} {{open");
    }

    #[test]
    fn test_templates_have_placeholders() {
        assert!(REASONING.contains("{{reasoning}}"));
        assert!(LYRICS.contains("{{lyrics}}"));
        assert!(CONTEXT.contains("{{count}}"));
        assert!(CONTEXT.contains("{{examples}}"));
        assert!(CONTEXT_ITEM.contains("{{header}}"));
        assert!(CONTEXT_ITEM.contains("{{content}}"));
        assert!(ERROR.contains("{{message}}"));
        assert!(PAGE.contains("{{results}}"));
        assert!(!LOADING.is_empty());
        assert!(!WELCOME.is_empty());
    }
}
