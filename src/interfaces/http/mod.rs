//! Portal HTTP surface
//!
//! - `proxy`: pass-through to the backend API with key re-shaping
//! - `session`: session cookie endpoints
//! - `router`: route table, shared state and middleware stack

pub mod casing;
pub mod cookies;
pub mod proxy;
pub mod request_id;
pub mod response;
pub mod router;
pub mod session;
pub mod validated_json;

pub use response::ApiResponse;
pub use router::{create_router, PortalState};
