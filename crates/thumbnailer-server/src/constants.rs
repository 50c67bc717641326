/// Object-finalized deliveries carry metadata only, never object bytes.
pub const MAX_EVENT_BODY_BYTES: usize = 1024 * 1024;

/// Alternate event route for deployments that do not push to `/`.
pub const OBJECT_FINALIZED_PATH: &str = "/events/object-finalized";

pub const HEALTH_PATH: &str = "/health";
