pub mod recency;
pub mod since;

pub use recency::{has_self_activity, retain_recent};
pub use since::{parse_since, parse_since_at};
