//! Service layer - filesystem orchestration
//!
//! Services read the migrations directory and apply the plans built by the
//! domain layer.

mod normalize;

pub use normalize::{CheckReport, NormalizeEvent, NormalizeReport, NormalizeService};
