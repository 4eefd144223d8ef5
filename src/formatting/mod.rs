pub mod report;
pub mod utils;

pub use report::{print_report, render};
pub use utils::{format_date, indent, normalize_description, pluralize};
