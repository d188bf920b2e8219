use serde::{Deserialize, Serialize};

/// The JSON body of a successful chat exchange.
///
/// Every field is optional; the service fills in whatever it produced.
/// Empty strings are treated the same as absent fields by the accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Identifier correlating follow-up requests with this conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,

    /// Per-file analysis of the uploaded files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_analysis: Option<FileAnalysis>,

    /// General analysis of the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,

    /// Feedback from the professor advisor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_feedback: Option<String>,

    /// Feedback from the research advisor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_feedback: Option<String>,
}

impl ChatResponse {
    /// The conversation identifier, if the service sent a non-empty one.
    pub fn conversation_id(&self) -> Option<&str> {
        non_empty(&self.conversation_id)
    }

    /// The per-file reports in the order the service listed them.
    pub fn file_reports(&self) -> &[FileReport] {
        self.file_analysis
            .as_ref()
            .map(|analysis| analysis.files.as_slice())
            .unwrap_or(&[])
    }

    /// The general analysis text, if non-empty.
    pub fn analysis(&self) -> Option<&str> {
        non_empty(&self.analysis)
    }

    /// The professor's feedback, if non-empty.
    pub fn professor_feedback(&self) -> Option<&str> {
        non_empty(&self.professor_feedback)
    }

    /// The research advisor's feedback, if non-empty.
    pub fn research_feedback(&self) -> Option<&str> {
        non_empty(&self.research_feedback)
    }
}

/// Container for per-file reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// One entry per uploaded file.
    #[serde(default)]
    pub files: Vec<FileReport>,
}

/// The service's verdict on one uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    /// Name of the file as the service saw it.
    pub filename: String,

    /// Analysis of the file, when processing got that far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisField>,

    /// Why processing failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    /// Classify the report.  Returns `None` when there is nothing to show:
    /// the analysis did not succeed and no error text was given.
    pub fn outcome(&self) -> Option<FileOutcome<'_>> {
        if let Some(summary) = self.analysis.as_ref().and_then(AnalysisField::summary) {
            return Some(FileOutcome::Analyzed(summary));
        }
        non_empty(&self.error).map(FileOutcome::Failed)
    }
}

/// What to show for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome<'a> {
    /// The file was analyzed; carries the summary.
    Analyzed(&'a str),
    /// The file could not be processed; carries the error text.
    Failed(&'a str),
}

/// A per-file analysis, either structured or a bare string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisField {
    /// `{"status": ..., "summary": ...}`
    Detail(AnalysisDetail),
    /// A plain summary string.  The reference server sends this form
    /// (`"analysis": "<summary>"`) for every file it managed to read, so it
    /// carries no status and is treated as a success.
    Text(String),
}

impl AnalysisField {
    /// The summary, if the analysis succeeded.
    pub fn summary(&self) -> Option<&str> {
        match self {
            AnalysisField::Detail(detail) if detail.status == AnalysisDetail::SUCCESS => {
                Some(detail.summary.as_deref().unwrap_or(""))
            }
            AnalysisField::Detail(_) => None,
            // No status to check; the server only sends text on success.
            AnalysisField::Text(text) => Some(text.as_str()),
        }
    }
}

/// Structured per-file analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetail {
    /// "success" when the file was analyzed.
    pub status: String,
    /// Summary of the file's contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AnalysisDetail {
    /// The status value that marks a successful analysis.
    pub const SUCCESS: &'static str = "success";
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
