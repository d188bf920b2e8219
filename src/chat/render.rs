//! Output rendering for the chat application.
//!
//! The session controller never prints anything itself.  It drives a
//! [`Renderer`], which owns the conversation view, the list of selected
//! files, the mode-selection control, and the busy indicator.

use std::io::{self, Write};
#[cfg(test)]
use std::sync::{Arc, Mutex};

use crate::types::{Message, Mode, Position};

/// ANSI escape code for dim text (used for system notices).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text (used for persona labels).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - In-memory recording, for tests and embedding
pub trait Renderer: Send {
    /// Append a system notice to the conversation.
    fn print_notice(&mut self, text: &str);

    /// Append a persona message to the conversation.
    fn print_message(&mut self, message: &Message);

    /// Show the control offering the given modes.
    fn show_mode_selection(&mut self, modes: &[Mode]);

    /// Remove the mode-selection control, if it is showing.
    fn hide_mode_selection(&mut self);

    /// Append one entry to the visible list of selected files.
    fn append_file(&mut self, name: &str, size: &str);

    /// Empty the visible list of selected files.
    fn clear_files(&mut self);

    /// Switch between the busy indicator (inputs disabled) and the idle one.
    fn set_busy(&mut self, busy: bool);

    /// Empty the text input.
    fn clear_input(&mut self) {}

    /// Print an error that is not part of the conversation.
    fn print_error(&mut self, error: &str);

    /// Print an informational line that is not part of the conversation.
    fn print_info(&mut self, info: &str);
}

/// Notice shown on its own line while an exchange is outstanding.
const BUSY_NOTICE: &str = "Processing your request, please wait...";

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    out: Box<dyn Write + Send>,
    use_color: bool,
    busy: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(Box::new(io::stdout()), use_color)
    }

    /// Creates a renderer that writes the conversation to `out`.
    ///
    /// Out-of-band errors still go to stderr.
    pub fn with_writer(out: Box<dyn Write + Send>, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            busy: false,
        }
    }

    /// Write one line.  A broken terminal is not worth failing the session.
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    /// Flushes output so it appears before the next prompt.
    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_notice(&mut self, text: &str) {
        for line in text.lines() {
            if self.use_color {
                self.line(&format!("{ANSI_DIM}  {line}{ANSI_RESET}"));
            } else {
                self.line(&format!("  {line}"));
            }
        }
        self.flush();
    }

    fn print_message(&mut self, message: &Message) {
        let style = message.role.style();
        let indent = match message.position {
            Position::Left => "",
            Position::Right => "        ",
        };
        if self.use_color {
            self.line(&format!(
                "{indent}{}{ANSI_BOLD}{}:{ANSI_RESET}",
                style.ansi, style.label
            ));
        } else {
            self.line(&format!("{indent}{}:", style.label));
        }
        for line in message.content.lines() {
            self.line(&format!("{indent}{line}"));
        }
        self.line("");
        self.flush();
    }

    fn show_mode_selection(&mut self, modes: &[Mode]) {
        let choices: Vec<String> = modes
            .iter()
            .map(|mode| format!("/mode {} ({})", mode, mode.label()))
            .collect();
        self.print_info(&format!("Choose with: {}", choices.join(" | ")));
    }

    fn hide_mode_selection(&mut self) {}

    fn append_file(&mut self, name: &str, size: &str) {
        self.line(&format!("  [file] {name} ({size})"));
        self.flush();
    }

    fn clear_files(&mut self) {}

    fn set_busy(&mut self, busy: bool) {
        if busy && !self.busy {
            self.print_notice(BUSY_NOTICE);
        }
        self.busy = busy;
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("{ANSI_RED}Error: {error}{ANSI_RESET}");
        } else {
            eprintln!("Error: {error}");
        }
    }

    fn print_info(&mut self, info: &str) {
        self.line(info);
        self.flush();
    }
}

/// One item in the conversation view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEntry {
    /// A system notice.
    Notice(String),
    /// A persona message.
    Message(Message),
}

/// A renderer that keeps everything in memory.
///
/// Useful for tests and for hosts that draw the conversation themselves.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    /// Conversation entries, oldest first.
    pub entries: Vec<OutputEntry>,
    /// Currently listed files as `(name, size)`.
    pub files: Vec<(String, String)>,
    /// Modes offered by the mode-selection control, when it is showing.
    pub mode_selection: Option<Vec<Mode>>,
    /// Whether the busy indicator is showing.
    pub busy: bool,
    /// Every busy-indicator transition, in order.
    pub busy_history: Vec<bool>,
    /// Out-of-band errors.
    pub errors: Vec<String>,
    /// Out-of-band info lines.
    pub info: Vec<String>,
}

impl RecordingRenderer {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// All system notices, oldest first.
    pub fn notices(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                OutputEntry::Notice(text) => Some(text.as_str()),
                OutputEntry::Message(_) => None,
            })
            .collect()
    }

    /// All persona messages, oldest first.
    pub fn messages(&self) -> Vec<&Message> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                OutputEntry::Message(message) => Some(message),
                OutputEntry::Notice(_) => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn print_notice(&mut self, text: &str) {
        self.entries.push(OutputEntry::Notice(text.to_string()));
    }

    fn print_message(&mut self, message: &Message) {
        self.entries.push(OutputEntry::Message(message.clone()));
    }

    fn show_mode_selection(&mut self, modes: &[Mode]) {
        self.mode_selection = Some(modes.to_vec());
    }

    fn hide_mode_selection(&mut self) {
        self.mode_selection = None;
    }

    fn append_file(&mut self, name: &str, size: &str) {
        self.files.push((name.to_string(), size.to_string()));
    }

    fn clear_files(&mut self) {
        self.files.clear();
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.busy_history.push(busy);
    }

    fn print_error(&mut self, error: &str) {
        self.errors.push(error.to_string());
    }

    fn print_info(&mut self, info: &str) {
        self.info.push(info.to_string());
    }
}

/// A writer whose contents outlive the renderer that owns it.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
    }

    #[test]
    fn recording_separates_notices_and_messages() {
        let mut renderer = RecordingRenderer::new();
        renderer.print_notice("ready");
        renderer.print_message(&Message::reply("hello", Role::Professor));
        renderer.print_notice("bye");
        assert_eq!(renderer.notices(), vec!["ready", "bye"]);
        assert_eq!(renderer.messages().len(), 1);
        assert_eq!(renderer.messages()[0].role, Role::Professor);
    }

    #[test]
    fn recording_tracks_controls() {
        let mut renderer = RecordingRenderer::new();
        renderer.show_mode_selection(&Mode::ALL);
        assert_eq!(renderer.mode_selection, Some(Mode::ALL.to_vec()));
        renderer.hide_mode_selection();
        assert!(renderer.mode_selection.is_none());

        renderer.append_file("a.pdf", "1 KB");
        renderer.clear_files();
        assert!(renderer.files.is_empty());

        renderer.set_busy(true);
        renderer.set_busy(false);
        assert_eq!(renderer.busy_history, vec![true, false]);
        assert!(!renderer.busy);
    }

    #[test]
    fn busy_notice_is_a_whole_line() {
        let buffer = SharedBuffer::default();
        let mut renderer = PlainTextRenderer::with_writer(Box::new(buffer.clone()), false);
        renderer.print_message(&Message::student("Study X"));
        renderer.set_busy(true);
        renderer.set_busy(true);
        renderer.set_busy(false);
        renderer.print_message(&Message::reply("narrow it", Role::Professor));

        assert_eq!(
            buffer.contents(),
            "        Student:\n        Study X\n\n  Processing your request, please wait...\nProfessor:\nnarrow it\n\n"
        );
    }

    #[test]
    fn colored_notice_is_dimmed() {
        let buffer = SharedBuffer::default();
        let mut renderer = PlainTextRenderer::with_writer(Box::new(buffer.clone()), true);
        renderer.print_notice("System ready.");
        assert_eq!(buffer.contents(), "\x1b[2m  System ready.\x1b[0m\n");
    }
}
