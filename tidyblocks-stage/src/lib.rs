//! TidyBlocks Stages
//!
//! Pipeline steps in three groups: table transforms, plots and statistical
//! tests. Encoded as `[discriminator, name, ...payload]`; `filter` and
//! `mutate` embed expressions.

mod plot;
mod registry;
mod stage;
mod stats;
mod transform;

pub use plot::Plot;
pub use registry::{registry, standard_registry};
pub use stage::Stage;
pub use stats::StatTest;
pub use transform::{Aggregation, Transform};

/// Stage discriminators
pub mod kinds {
    pub const TRANSFORM: &str = "@transform";
    pub const PLOT: &str = "@plot";
    pub const STATS: &str = "@stats";

    pub const ALL: [&str; 3] = [TRANSFORM, PLOT, STATS];
}
