pub mod event;
pub mod incident;
pub mod pipeline;
pub mod snapshot;

pub use event::*;
pub use incident::*;
pub use pipeline::*;
pub use snapshot::*;
