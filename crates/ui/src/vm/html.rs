use std::collections::HashSet;

/// Question and choice text may carry light inline markup. Anything beyond
/// simple formatting is stripped before it reaches `dangerous_inner_html`.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "b", "i", "em", "strong", "code", "sub", "sup", "br", "span", "u",
    ]
    .into_iter()
    .collect();

    ammonia::Builder::new()
        .tags(tags)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_inline_formatting() {
        assert_eq!(sanitize_html("H<sub>2</sub>O"), "H<sub>2</sub>O");
        assert_eq!(sanitize_html("<em>x</em>"), "<em>x</em>");
    }

    #[test]
    fn strips_scripts_and_handlers() {
        let cleaned = sanitize_html(r#"<img src=x onerror="alert(1)"><script>alert(2)</script>ok"#);
        assert_eq!(cleaned, "ok");
    }

    #[test]
    fn escapes_bare_angle_brackets() {
        assert_eq!(sanitize_html("1 < 2"), "1 &lt; 2");
    }
}
