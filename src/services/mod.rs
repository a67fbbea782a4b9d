//! Services for lookup resolution, aggregation and reporting

pub mod aggregator;
pub mod engine;
pub mod events;
pub mod filters;
pub mod logbook;
pub mod lookups;

pub use aggregator::Aggregator;
pub use engine::{RefreshTicket, ReportEngine};
pub use events::EventAdmin;
pub use filters::{FilterField, FilterState, Projector};
pub use logbook::LogbookService;
pub use lookups::{LookupContext, ResolvedEntry};
