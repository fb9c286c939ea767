pub mod export;
pub mod html;

pub use export::ReportWriter;
pub use html::{escape_html, render_html};
