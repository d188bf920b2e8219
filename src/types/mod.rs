// Public modules
pub mod chat_request;
pub mod chat_response;
pub mod message;
pub mod mode;
pub mod selected_file;

// Re-exports
pub use chat_request::ChatRequest;
pub use chat_response::{
    AnalysisDetail, AnalysisField, ChatResponse, FileAnalysis, FileOutcome, FileReport,
};
pub use message::{Message, Position, Role, RoleStyle};
pub use mode::Mode;
pub use selected_file::SelectedFile;
