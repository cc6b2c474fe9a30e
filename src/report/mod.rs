mod markdown;
mod writer;

pub use markdown::{render, render_event};
pub use writer::ReportWriter;
