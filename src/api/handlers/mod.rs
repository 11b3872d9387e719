//! Handlers outside the versioned API: system, auth and the flat REST surface.

pub mod flat;
mod session;
mod system;

pub use flat::{FlatUpdateRequest, KeyQuery, ResumeCheckResponse, SuccessResponse};
pub use session::*;
pub use system::*;
