// Document rendering: ResumeData → fixed-order block layout → DOCX bytes.
// Layout is a pure function of the resume; packing is CPU-bound and runs
// inside tokio::task::spawn_blocking at the call site.

pub mod docx;
pub mod handlers;
pub mod layout;

pub use docx::RenderError;
