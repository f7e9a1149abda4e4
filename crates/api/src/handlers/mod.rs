/// Handlers for the `/availability` resource
pub mod availability;
