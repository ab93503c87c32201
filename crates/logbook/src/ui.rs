use dialoguer::console::{Style, style};

pub const SUCCESS_PREFIX: &str = "✔";
pub const WARNING_PREFIX: &str = "⚠";
pub const HINT_PREFIX: &str = "💡";
const EMPTY_SELECTION_PLACEHOLDER: &str = "(none)";

pub fn log_success_value(label: &str, value: &str) {
    let prefix = style(SUCCESS_PREFIX.to_string()).for_stderr().green();
    let label_style = Style::new().for_stderr().bold();
    eprintln!("{} {}: {}", prefix, label_style.apply_to(label), value);
}

pub fn log_success_list(label: &str, items: &[String]) {
    log_success_value(label, &display_list(items));
}

pub fn log_warning(message: &str) {
    let prefix = style(WARNING_PREFIX.to_string()).for_stderr().yellow();
    let message_style = Style::new().for_stderr().yellow();
    eprintln!("{} {}", prefix, message_style.apply_to(message));
}

/// Prints a hint message to stderr with a distinct visual style.
///
/// Used for non-critical suggestions.
pub fn log_hint(message: &str) {
    let prefix = style(HINT_PREFIX.to_string()).for_stderr().cyan();
    let message_style = Style::new().for_stderr().cyan();
    eprintln!("{} {}", prefix, message_style.apply_to(message));
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        EMPTY_SELECTION_PLACEHOLDER.to_string()
    } else {
        items.join(", ")
    }
}

/// Normalize an optional string input by trimming whitespace.
/// Returns None if the input is None or if the trimmed value is empty.
pub fn normalize_nonempty_string(input: Option<&str>) -> Option<String> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
