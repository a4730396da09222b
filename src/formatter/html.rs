//! HTML preview rendering for WhatsApp markdown

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"_(.*?)_").unwrap();
    static ref STRIKETHROUGH: Regex = Regex::new(r"~(.*?)~").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`([^`\n]+)`").unwrap();
    static ref CODE_BLOCK: Regex = Regex::new(r"```([\s\S]*?)```").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"\n").unwrap();
    pub(super) static ref MENTION: Regex = Regex::new(r"@([0-9]+)").unwrap();
}

/// Render WhatsApp markdown as HTML.
///
/// Rules run in a fixed order, each as one non-overlapping pass over the
/// output of the previous rule: bold, italic, strikethrough, inline code,
/// code block, line breaks, mentions. Text is not HTML-escaped.
pub fn to_html(text: &str) -> String {
    let html = BOLD.replace_all(text, "<strong>$1</strong>");
    let html = ITALIC.replace_all(&html, "<em>$1</em>");
    let html = STRIKETHROUGH.replace_all(&html, "<del>$1</del>");
    let html = INLINE_CODE.replace_all(&html, r#"<code class="inline-code">$1</code>"#);
    let html = CODE_BLOCK.replace_all(&html, r#"<pre><code class="code-block">$1</code></pre>"#);
    let html = LINE_BREAK.replace_all(&html, "<br>");
    let html = MENTION.replace_all(&html, r#"<span class="mention">@$1</span>"#);

    html.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_markers() {
        let html = to_html("*x* _y_ ~z~ `w`");
        assert_eq!(
            html,
            r#"<strong>x</strong> <em>y</em> <del>z</del> <code class="inline-code">w</code>"#
        );
        for marker in ['*', '_', '~', '`'] {
            assert!(!html.contains(marker));
        }
    }

    #[test]
    fn test_multiline_code_block() {
        let html = to_html("```a\nb```");
        assert_eq!(html, r#"<pre><code class="code-block">a<br>b</code></pre>"#);
    }

    #[test]
    fn test_line_breaks_and_mentions() {
        assert_eq!(
            to_html("hi @123\nbye"),
            r#"hi <span class="mention">@123</span><br>bye"#
        );
    }

    #[test]
    fn test_non_ascii_digits_are_not_mentions() {
        assert_eq!(to_html("hi @١٢٣"), "hi @١٢٣");
    }

    #[test]
    fn test_markers_do_not_span_lines() {
        assert_eq!(to_html("*a\nb*"), "*a<br>b*");
    }

    #[test]
    fn test_unmatched_marker_left_alone() {
        assert_eq!(to_html("2 * 3"), "2 * 3");
    }

    #[test]
    fn test_lazy_matching() {
        assert_eq!(
            to_html("*a* and *b*"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }
}
