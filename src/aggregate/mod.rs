pub mod assembler;
pub mod builder;

pub use assembler::{assemble, group, GroupingMode};
pub use builder::{latest_transition, IssueBuilder};
