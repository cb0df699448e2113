pub mod aggregate;
pub mod classify;
pub mod differential;
pub mod lineup;
pub mod metrics;

pub use aggregate::{aggregate, ClassifiedEvent, LineupAggregate, LineupTotals};
pub use classify::{classify, EventFlags, ResultCode};
pub use differential::{differentials, DifferentialRecord};
pub use lineup::{normalize, normalize_parts, LineupKey};
pub use metrics::LineupMetrics;
