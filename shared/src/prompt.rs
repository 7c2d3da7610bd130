use crate::types::Result;
use dialoguer::{theme::ColorfulTheme, Input};

/// Marker that keeps a message open for another line, the terminal stand-in
/// for Shift+Enter.
pub const CONTINUATION: char = '\\';

/// Ask for one chat message.
///
/// Plain Enter submits. A line ending in `\` asks for another line and the
/// pieces are joined with a literal newline.
pub fn ask_chat_turn(prompt: &str) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut lines = Vec::new();
    let mut label = prompt.to_string();

    loop {
        let line: String = Input::with_theme(&theme)
            .with_prompt(&label)
            .allow_empty(true)
            .interact_text()?;

        match strip_continuation(&line) {
            Some(head) => {
                lines.push(head.to_string());
                label = "...".to_string();
            }
            None => {
                lines.push(line);
                break;
            }
        }
    }

    Ok(lines.join("\n"))
}

/// Returns the line without its trailing continuation marker, or `None` when
/// the line ends the message.
pub fn strip_continuation(line: &str) -> Option<&str> {
    line.strip_suffix(CONTINUATION)
}

/// `exit` and `quit` leave the chat loop.
pub fn is_exit_command(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit")
}
