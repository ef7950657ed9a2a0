pub const CHAT_SYSTEM: &str = include_str!("../data/prompts/chat_system.txt");
pub const CHAT_USER: &str = include_str!("../data/prompts/chat_user.txt");
pub const PIXEL_ART_STYLE: &str = include_str!("../data/prompts/pixel_art_style.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
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
    fn test_prompts_are_non_empty() {
        assert!(!CHAT_SYSTEM.is_empty());
        assert!(!CHAT_USER.is_empty());
        assert!(!PIXEL_ART_STYLE.is_empty());
    }

    #[test]
    fn test_chat_user_has_placeholders() {
        assert!(CHAT_USER.contains("{{pixel_art_style}}"));
        assert!(CHAT_USER.contains("{{person_description}}"));
    }

    #[test]
    fn test_style_is_single_line() {
        assert!(!PIXEL_ART_STYLE.trim().contains('\n'));
    }
}
