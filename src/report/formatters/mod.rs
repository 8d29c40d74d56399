pub mod docx;
pub mod markdown;
pub mod json;
pub mod html;

pub use docx::DocxFormatter;
pub use markdown::MarkdownFormatter;
pub use json::JsonFormatter;
pub use html::HtmlFormatter;
