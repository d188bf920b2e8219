//! Core chat session management.
//!
//! This module provides the [`ChatSession`] controller, which owns the
//! session state and mediates between user actions, a [`Renderer`], and a
//! [`ChatTransport`].

use std::collections::BTreeMap;

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::JoinHandle;

use crate::chat::config::ChatConfig;
use crate::chat::render::Renderer;
use crate::error::{Error, Result};
use crate::observability::{SESSION_SEND_FAILURES, SESSION_SEND_REJECTIONS, SESSION_SENDS};
use crate::transport::ChatTransport;
use crate::types::{
    ChatRequest, ChatResponse, FileOutcome, Message, Mode, Role, SelectedFile,
};

const MODE_PROMPT: &str =
    "Please choose an input mode:\n1. Describe a research idea\n2. Enter related literature";
const READY_NOTICE: &str = "System ready.";
const PROBE_HTTP_FAILURE_NOTICE: &str =
    "Failed to connect to the backend server. Make sure the server has been started.";
const PROBE_UNREACHABLE_NOTICE: &str = "Cannot reach the backend server. Please check:\n1. the backend server is running\n2. the server port is not taken by another program\n3. firewall settings allow the connection";
const EMPTY_INPUT_NOTICE: &str = "Please enter a message or attach a file.";
const ANALYSIS_LABEL: &str = "Analysis:";
const TIMEOUT_NOTICE: &str = "Request timed out. Please try again.";
const UNREACHABLE_NOTICE: &str =
    "Cannot connect to the backend server. Make sure the server is running.";

/// Mutable state of one chat session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The input mode sent with every request.
    pub mode: Mode,
    /// Server-assigned conversation identifier, once known.
    pub conversation_id: Option<String>,
    /// True while an exchange is outstanding.
    pub is_loading: bool,
    /// Files to upload with the next message, keyed by file name.
    pub selected_files: BTreeMap<String, SelectedFile>,
    /// True once a mode has been chosen; the choice cannot be revisited.
    pub mode_chosen: bool,
}

/// What happened to a call to [`ChatSession::send`].
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// Another exchange was outstanding; nothing happened.
    Busy,
    /// There was no text and no file to send; the user was prompted.
    Empty,
    /// The exchange succeeded and its reply was rendered.
    Delivered,
    /// The exchange failed; the failure was rendered and files kept.
    Failed(Error),
}

impl SendOutcome {
    /// True if a request reached the transport.
    pub fn was_attempted(&self) -> bool {
        matches!(self, SendOutcome::Delivered | SendOutcome::Failed(_))
    }
}

/// A chat session controller.
///
/// The session holds its state explicitly and is handed a transport and a
/// renderer, so it can be driven entirely in memory:
///
/// ```
/// # use advisor_chat::chat::{ChatConfig, ChatSession, RecordingRenderer};
/// # use advisor_chat::{ChatRequest, ChatResponse, ChatTransport, Mode, Result};
/// struct Echo;
///
/// #[async_trait::async_trait]
/// impl ChatTransport for Echo {
///     async fn probe(&self) -> Result<()> {
///         Ok(())
///     }
///
///     async fn send(&self, request: ChatRequest) -> Result<ChatResponse> {
///         Ok(ChatResponse {
///             analysis: Some(request.message),
///             ..ChatResponse::default()
///         })
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let mut session = ChatSession::new(Echo, ChatConfig::new());
/// let mut renderer = RecordingRenderer::new();
/// session.select_mode(Mode::Idea, &mut renderer);
/// let outcome = session.send("Study X", &mut renderer).await;
/// assert!(outcome.was_attempted());
/// assert!(!session.is_loading());
/// # });
/// ```
pub struct ChatSession<T: ChatTransport> {
    transport: T,
    config: ChatConfig,
    state: SessionState,
}

impl<T: ChatTransport> ChatSession<T> {
    /// Creates a new chat session over the given transport.
    pub fn new(transport: T, config: ChatConfig) -> Self {
        Self {
            transport,
            config,
            state: SessionState::default(),
        }
    }

    /// Check that the service is reachable and report the result.
    ///
    /// The outcome is informational only; sending works either way.
    pub async fn probe(&self, renderer: &mut dyn Renderer) -> bool {
        let result = self.transport.probe().await;
        report_probe(&result, renderer)
    }

    /// Choose the input mode.
    ///
    /// Only the first call has any effect: it removes the mode-selection
    /// control and describes the expected input.  Returns whether the mode
    /// was applied.
    pub fn select_mode(&mut self, mode: Mode, renderer: &mut dyn Renderer) -> bool {
        if self.state.mode_chosen {
            return false;
        }
        self.state.mode = mode;
        self.state.mode_chosen = true;
        renderer.hide_mode_selection();
        renderer.print_notice(mode.input_guide());
        true
    }

    /// Add a file to the selection.
    ///
    /// A file whose name is already selected is ignored; the first one wins.
    /// Returns whether the file was added.
    pub fn add_file(&mut self, file: SelectedFile, renderer: &mut dyn Renderer) -> bool {
        if self.state.is_loading || self.state.selected_files.contains_key(file.name()) {
            return false;
        }
        renderer.append_file(file.name(), &file.display_size());
        self.state
            .selected_files
            .insert(file.name().to_string(), file);
        true
    }

    /// Remove a file from the selection and redraw the list.
    ///
    /// Returns whether a file by that name was selected.
    pub fn remove_file(&mut self, name: &str, renderer: &mut dyn Renderer) -> bool {
        let removed = self.state.selected_files.remove(name).is_some();
        self.render_file_list(renderer);
        removed
    }

    /// Send the user's text and the selected files to the service.
    ///
    /// Failures are rendered as system notices and returned in the outcome;
    /// they never end the session.  The busy state is always cleared before
    /// this returns.
    pub async fn send(&mut self, text: &str, renderer: &mut dyn Renderer) -> SendOutcome {
        if self.state.is_loading {
            return SendOutcome::Busy;
        }
        let message = text.trim();
        if message.is_empty() && self.state.selected_files.is_empty() {
            SESSION_SEND_REJECTIONS.click();
            renderer.print_notice(EMPTY_INPUT_NOTICE);
            return SendOutcome::Empty;
        }

        SESSION_SENDS.click();
        renderer.print_message(&Message::student(message));
        renderer.clear_input();
        self.set_loading(true, renderer);

        let request = ChatRequest::new(message, self.state.mode)
            .with_conversation_id(self.state.conversation_id.clone())
            .with_files(self.state.selected_files.values().cloned().collect());

        let outcome = match self.exchange(request).await {
            Ok(response) => {
                self.apply_response(&response, renderer);
                SendOutcome::Delivered
            }
            Err(err) => {
                SESSION_SEND_FAILURES.click();
                renderer.print_notice(&failure_notice(&err));
                SendOutcome::Failed(err)
            }
        };

        self.set_loading(false, renderer);
        outcome
    }

    /// The current input mode.
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// The conversation identifier, once the service has assigned one.
    pub fn conversation_id(&self) -> Option<&str> {
        self.state.conversation_id.as_deref()
    }

    /// True while an exchange is outstanding.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// The currently selected files, ordered by name.
    pub fn selected_files(&self) -> impl Iterator<Item = &SelectedFile> {
        self.state.selected_files.values()
    }

    /// Number of selected files.
    pub fn selected_file_count(&self) -> usize {
        self.state.selected_files.len()
    }

    /// A snapshot of the session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    async fn exchange(&self, request: ChatRequest) -> Result<ChatResponse> {
        let timeout = self.config.timeout;
        match tokio::time::timeout(timeout, self.transport.send(request)).await {
            Ok(result) => result,
            Err(_) => Err(Error::timeout(
                "request timed out",
                Some(timeout.as_secs_f64()),
            )),
        }
    }

    fn apply_response(&mut self, response: &ChatResponse, renderer: &mut dyn Renderer) {
        if let Some(conversation_id) = response.conversation_id() {
            self.state.conversation_id = Some(conversation_id.to_string());
        }

        for report in response.file_reports() {
            match report.outcome() {
                Some(FileOutcome::Analyzed(summary)) => {
                    renderer.print_notice(&format!("Analysis of file \"{}\":", report.filename));
                    renderer.print_message(&Message::reply(summary, Role::System));
                }
                Some(FileOutcome::Failed(error)) => {
                    renderer.print_notice(&format!(
                        "Failed to process file \"{}\": {}",
                        report.filename, error
                    ));
                }
                None => {}
            }
        }

        if let Some(analysis) = response.analysis() {
            renderer.print_notice(ANALYSIS_LABEL);
            renderer.print_message(&Message::reply(analysis, Role::System));
        }
        if let Some(feedback) = response.professor_feedback() {
            renderer.print_message(&Message::reply(feedback, Role::Professor));
        }
        if let Some(feedback) = response.research_feedback() {
            renderer.print_message(&Message::reply(feedback, Role::Research));
        }

        self.state.selected_files.clear();
        self.render_file_list(renderer);
    }

    fn render_file_list(&self, renderer: &mut dyn Renderer) {
        renderer.clear_files();
        for file in self.state.selected_files.values() {
            renderer.append_file(file.name(), &file.display_size());
        }
    }

    fn set_loading(&mut self, loading: bool, renderer: &mut dyn Renderer) {
        self.state.is_loading = loading;
        renderer.set_busy(loading);
    }
}

impl<T: ChatTransport + Clone + 'static> ChatSession<T> {
    /// Render the opening prompt and mode-selection control and apply any
    /// preselected mode.
    ///
    /// If configured to, the reachability check is spawned onto the runtime
    /// and handed back as a [`PendingProbe`].  It holds no borrow of the
    /// session, so the caller can keep sending while it is outstanding and
    /// report it whenever it settles.
    pub fn start(&mut self, renderer: &mut dyn Renderer) -> Option<PendingProbe> {
        renderer.print_notice(MODE_PROMPT);
        renderer.show_mode_selection(&Mode::ALL);
        if let Some(mode) = self.config.mode {
            self.select_mode(mode, renderer);
        }
        if !self.config.probe_on_start {
            return None;
        }
        let transport = self.transport.clone();
        let (sender, receiver) = oneshot::channel();
        let task = tokio::spawn(async move {
            let _ = sender.send(transport.probe().await);
        });
        Some(PendingProbe { receiver, task })
    }
}

/// A reachability check running in the background.
///
/// Dropping it cancels the check without reporting anything.
#[derive(Debug)]
pub struct PendingProbe {
    receiver: oneshot::Receiver<Result<()>>,
    task: JoinHandle<()>,
}

impl PendingProbe {
    /// Report the result if the check has finished.
    ///
    /// Returns `None` while it is still running.  Once this returns `Some`
    /// the result has been rendered and the handle should be dropped.
    pub fn try_report(&mut self, renderer: &mut dyn Renderer) -> Option<bool> {
        match self.receiver.try_recv() {
            Ok(result) => Some(report_probe(&result, renderer)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(report_probe(&Err(unfinished()), renderer)),
        }
    }

    /// Wait for the check to finish and report it.
    pub async fn report(mut self, renderer: &mut dyn Renderer) -> bool {
        let result = (&mut self.receiver).await.unwrap_or_else(|_| Err(unfinished()));
        report_probe(&result, renderer)
    }
}

impl Drop for PendingProbe {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn unfinished() -> Error {
    Error::connection("reachability check did not finish", None)
}

fn report_probe(result: &Result<()>, renderer: &mut dyn Renderer) -> bool {
    match result {
        Ok(()) => {
            renderer.print_notice(READY_NOTICE);
            true
        }
        Err(Error::Api { .. }) => {
            renderer.print_notice(PROBE_HTTP_FAILURE_NOTICE);
            false
        }
        Err(_) => {
            renderer.print_notice(PROBE_UNREACHABLE_NOTICE);
            false
        }
    }
}

/// The system notice shown for a failed exchange.
pub fn failure_notice(err: &Error) -> String {
    match err {
        Error::Timeout { .. } => TIMEOUT_NOTICE.to_string(),
        Error::Connection { .. } => UNREACHABLE_NOTICE.to_string(),
        _ => format!("An error occurred: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::render::{PlainTextRenderer, RecordingRenderer, SharedBuffer};

    #[derive(Clone)]
    struct Unreachable;

    #[async_trait::async_trait]
    impl ChatTransport for Unreachable {
        async fn probe(&self) -> Result<()> {
            Err(Error::connection("refused", None))
        }

        async fn send(&self, _: ChatRequest) -> Result<ChatResponse> {
            Err(Error::connection("refused", None))
        }
    }

    fn session() -> ChatSession<Unreachable> {
        ChatSession::new(Unreachable, ChatConfig::new())
    }

    #[test]
    fn new_session_defaults() {
        let session = session();
        assert_eq!(session.mode(), Mode::Idea);
        assert!(session.conversation_id().is_none());
        assert!(!session.is_loading());
        assert_eq!(session.selected_file_count(), 0);
    }

    #[test]
    fn select_mode_only_once() {
        let mut session = session();
        let mut renderer = RecordingRenderer::new();
        renderer.show_mode_selection(&Mode::ALL);

        assert!(session.select_mode(Mode::References, &mut renderer));
        assert!(renderer.mode_selection.is_none());
        assert_eq!(session.mode(), Mode::References);
        assert_eq!(renderer.notices(), vec![Mode::References.input_guide()]);

        assert!(!session.select_mode(Mode::Idea, &mut renderer));
        assert_eq!(session.mode(), Mode::References);
        assert_eq!(renderer.notices().len(), 1);
    }

    #[test]
    fn duplicate_file_names_keep_the_first() {
        let mut session = session();
        let mut renderer = RecordingRenderer::new();
        assert!(session.add_file(SelectedFile::new("a.pdf", vec![0u8; 1024]), &mut renderer));
        assert!(!session.add_file(SelectedFile::new("a.pdf", vec![0u8; 10]), &mut renderer));
        assert_eq!(session.selected_file_count(), 1);
        assert_eq!(session.selected_files().next().unwrap().size(), 1024);
        assert_eq!(
            renderer.files,
            vec![("a.pdf".to_string(), "1 KB".to_string())]
        );
    }

    #[test]
    fn remove_file_redraws_list() {
        let mut session = session();
        let mut renderer = RecordingRenderer::new();
        session.add_file(SelectedFile::new("a.pdf", vec![0u8; 0]), &mut renderer);
        session.add_file(SelectedFile::new("b.pdf", vec![0u8; 2048]), &mut renderer);

        assert!(session.remove_file("a.pdf", &mut renderer));
        assert!(!session.remove_file("a.pdf", &mut renderer));
        assert_eq!(
            renderer.files,
            vec![("b.pdf".to_string(), "2 KB".to_string())]
        );
    }

    #[tokio::test]
    async fn empty_send_is_rejected_locally() {
        let mut session = session();
        let mut renderer = RecordingRenderer::new();
        let outcome = session.send("   \n", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Empty));
        assert_eq!(renderer.entries.len(), 1);
        assert_eq!(renderer.notices(), vec![EMPTY_INPUT_NOTICE]);
        assert!(renderer.busy_history.is_empty());
    }

    #[tokio::test]
    async fn connection_failure_keeps_files() {
        let mut session = session();
        let mut renderer = RecordingRenderer::new();
        session.add_file(SelectedFile::new("a.pdf", vec![1u8; 3]), &mut renderer);

        let outcome = session.send("hello", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Failed(ref err) if err.is_connection()));
        assert_eq!(renderer.notices(), vec![UNREACHABLE_NOTICE]);
        assert_eq!(session.selected_file_count(), 1);
        assert!(!session.is_loading());
        assert_eq!(renderer.busy_history, vec![true, false]);
    }

    #[tokio::test]
    async fn probe_reports_unreachable() {
        let session = session();
        let mut renderer = RecordingRenderer::new();
        assert!(!session.probe(&mut renderer).await);
        assert_eq!(renderer.notices(), vec![PROBE_UNREACHABLE_NOTICE]);
    }

    #[tokio::test]
    async fn start_reports_background_check() {
        let mut session = session();
        let mut renderer = RecordingRenderer::new();
        let pending = session.start(&mut renderer).unwrap();
        assert_eq!(renderer.notices(), vec![MODE_PROMPT]);
        assert!(!pending.report(&mut renderer).await);
        assert_eq!(renderer.notices(), vec![MODE_PROMPT, PROBE_UNREACHABLE_NOTICE]);
    }

    #[tokio::test]
    async fn start_without_check() {
        let mut session = ChatSession::new(Unreachable, ChatConfig::new().without_probe());
        let mut renderer = RecordingRenderer::new();
        assert!(session.start(&mut renderer).is_none());
        assert_eq!(renderer.notices(), vec![MODE_PROMPT]);
    }

    #[tokio::test]
    async fn busy_notice_gets_its_own_line() {
        let buffer = SharedBuffer::default();
        let mut renderer = PlainTextRenderer::with_writer(Box::new(buffer.clone()), false);
        let mut session = session();

        session.send("hello", &mut renderer).await;
        let output = buffer.contents();
        let lines: Vec<&str> = output.lines().collect();
        let label = lines.iter().position(|l| l.trim() == "Student:").unwrap();
        assert_eq!(lines[label + 1].trim(), "hello");
        assert!(lines.contains(&"  Processing your request, please wait..."));
        assert!(
            lines
                .iter()
                .all(|l| !(l.contains("Student") && l.contains("Processing")))
        );
    }

    #[test]
    fn failure_notices() {
        assert_eq!(failure_notice(&Error::timeout("t", None)), TIMEOUT_NOTICE);
        assert_eq!(
            failure_notice(&Error::http_client("Request failed: reset", None)),
            "An error occurred: HTTP client error: Request failed: reset"
        );
        assert_eq!(
            failure_notice(&Error::connection("c", None)),
            UNREACHABLE_NOTICE
        );
        assert_eq!(
            failure_notice(&Error::api(500, None)),
            "An error occurred: HTTP error! status: 500"
        );
    }
}
