/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod inspect_request;
mod inspect_response;
mod prefix_selector;
mod query;

pub use inspect_request::{InspectRequest, InspectRequestBuilder};
pub use inspect_response::InspectResponse;
pub use prefix_selector::PrefixSelector;
pub use query::{ListingMode, Query, TreeFlags};
