//! Utilities to render Markdown consistently across the changelog.

/// Format a Markdown list item for a changelog entry.
///
/// - Ensures multi-line messages are indented so that subsequent lines are
///   rendered as part of the same list item.
/// - If the message itself contains list items (e.g. lines starting with "- "),
///   they become properly nested under the entry.
/// - Always ends with a trailing newline.
pub fn format_markdown_list_item(message: &str) -> String {
    let mut out = String::new();
    let mut lines = message.lines();
    if let Some(first) = lines.next() {
        out.push_str("- ");
        out.push_str(first);
        out.push('\n');
    } else {
        out.push_str("- \n");
        return out;
    }

    for line in lines {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }

    out
}

/// Surround a message with a prefix and suffix without breaking code fences.
///
/// When the message ends with a closing ```` ``` ```` fence, the suffix goes on
/// its own line so the fence stays intact.
pub fn compose_markdown_with_affixes(message: &str, prefix: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return format!("{prefix}{message}");
    }
    if message.trim_end().ends_with("```") {
        format!("{prefix}{message}\n{suffix}")
    } else {
        format!("{prefix}{message}{suffix}")
    }
}

/// Turn `#123` into issue links and `@login` into user links.
///
/// A marker only counts at the start of the text or after whitespace or an
/// opening parenthesis, so e-mail addresses and anchors inside words are left
/// alone. Callbacks return `None` to leave a reference as plain text.
pub fn linkify_references<I, U>(text: &str, issue_url: I, user_url: U) -> String
where
    I: Fn(&str) -> Option<String>,
    U: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    let mut prev: Option<char> = None;

    while let Some((i, c)) = chars.next() {
        let at_boundary = prev.is_none_or(|p| p.is_whitespace() || p == '(');
        if at_boundary && (c == '#' || c == '@') {
            let start = i + c.len_utf8();
            let mut end = start;
            while let Some(&(j, next)) = chars.peek() {
                let valid = if c == '#' {
                    next.is_ascii_digit()
                } else {
                    next.is_ascii_alphanumeric() || next == '-'
                };
                if !valid {
                    break;
                }
                end = j + next.len_utf8();
                chars.next();
            }

            let reference = &text[start..end];
            let url = if reference.is_empty() {
                None
            } else if c == '#' {
                issue_url(reference)
            } else {
                user_url(reference)
            };
            match url {
                Some(url) => out.push_str(&format!("[{c}{reference}]({url})")),
                None => out.push_str(&text[i..end]),
            }
            prev = text[..end].chars().next_back();
            continue;
        }
        out.push(c);
        prev = Some(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: &str) -> Option<String> {
        Some(format!("https://example.com/issues/{id}"))
    }

    fn user(login: &str) -> Option<String> {
        Some(format!("https://example.com/{login}"))
    }

    fn none(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn list_item_single_line() {
        let out = format_markdown_list_item("Add new feature");
        assert_eq!(out, "- Add new feature\n");
    }

    #[test]
    fn list_item_multiline_with_nested_list() {
        let msg = "Big change\n- add A\n- add B";
        let out = format_markdown_list_item(msg);
        let expected = "- Big change\n  - add A\n  - add B\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn list_item_with_empty_message() {
        let out = format_markdown_list_item("");
        assert_eq!(out, "- \n");
    }

    #[test]
    fn affixes_wrap_plain_message() {
        let out = compose_markdown_with_affixes("Add widget", "**api:** ", " (1234567)");
        assert_eq!(out, "**api:** Add widget (1234567)");
    }

    #[test]
    fn affixes_keep_closing_fence_on_its_own_line() {
        let message = "Change\n```rust\nlet x = 1;\n```";
        let out = compose_markdown_with_affixes(message, "", " (abcdef1)");
        assert_eq!(out, "Change\n```rust\nlet x = 1;\n```\n (abcdef1)");
        assert_eq!(compose_markdown_with_affixes(message, "> ", ""), format!("> {message}"));
    }

    #[test]
    fn links_issues_and_users() {
        let out = linkify_references("Fix crash (#12) reported by @jane-doe", issue, user);
        assert_eq!(
            out,
            "Fix crash ([#12](https://example.com/issues/12)) reported by [@jane-doe](https://example.com/jane-doe)"
        );
    }

    #[test]
    fn leaves_emails_and_inner_markers_alone() {
        let text = "Mail me@example.com about item#4";
        assert_eq!(linkify_references(text, issue, user), text);
    }

    #[test]
    fn bare_markers_are_kept() {
        assert_eq!(linkify_references("# heading @ x", issue, user), "# heading @ x");
        assert_eq!(linkify_references("#abc", issue, user), "#abc");
    }

    #[test]
    fn unresolved_references_stay_plain() {
        assert_eq!(linkify_references("See #7 by @bob", none, none), "See #7 by @bob");
    }

    #[test]
    fn adjacent_references() {
        let out = linkify_references("#1 #2", issue, none);
        assert_eq!(
            out,
            "[#1](https://example.com/issues/1) [#2](https://example.com/issues/2)"
        );
    }
}
