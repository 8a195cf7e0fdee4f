pub mod normalizer;
pub mod payload;

pub use normalizer::{branch_from_ref, normalize, BranchTarget};
pub use payload::{parse_webhook, EVENT_HEADER};
