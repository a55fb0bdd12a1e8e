pub mod envelope;
pub mod plan;
pub mod snapshot;
