use crate::types::{Mode, SelectedFile};

/// One exchange's worth of input, as posted to the chat endpoint.
///
/// On the wire this is a multipart form with the fields `message`, `mode`,
/// an optional `conversationId`, and one `files` part per selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's text (possibly empty when only files are sent).
    pub message: String,
    /// The session's input mode.
    pub mode: Mode,
    /// Server-assigned conversation identifier, once one is known.
    pub conversation_id: Option<String>,
    /// Files to upload with the message.
    pub files: Vec<SelectedFile>,
}

impl ChatRequest {
    /// Create a request with no conversation and no files.
    pub fn new(message: impl Into<String>, mode: Mode) -> Self {
        Self {
            message: message.into(),
            mode,
            conversation_id: None,
            files: Vec::new(),
        }
    }

    /// Set the conversation identifier.
    pub fn with_conversation_id(mut self, conversation_id: Option<String>) -> Self {
        self.conversation_id = conversation_id;
        self
    }

    /// Set the files to upload.
    pub fn with_files(mut self, files: Vec<SelectedFile>) -> Self {
        self.files = files;
        self
    }

    /// The form fields in the order they are appended to the multipart body.
    ///
    /// Files are not included; see [`ChatRequest::files`].
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("message", self.message.clone()),
            ("mode", self.mode.as_str().to_string()),
        ];
        if let Some(conversation_id) = &self.conversation_id {
            fields.push(("conversationId", conversation_id.clone()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_without_conversation() {
        let request = ChatRequest::new("Study X", Mode::Idea);
        assert_eq!(
            request.text_fields(),
            vec![
                ("message", "Study X".to_string()),
                ("mode", "idea".to_string()),
            ]
        );
    }

    #[test]
    fn fields_with_conversation() {
        let request = ChatRequest::new("more", Mode::References)
            .with_conversation_id(Some("abc123".to_string()));
        assert_eq!(
            request.text_fields(),
            vec![
                ("message", "more".to_string()),
                ("mode", "references".to_string()),
                ("conversationId", "abc123".to_string()),
            ]
        );
    }
}
