pub mod post;
pub mod summarize;

pub use summarize::{handle_summarize, prepare_reports, Report, SummaryOptions};
