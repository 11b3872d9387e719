//! V1 API handlers.

mod records;
mod resume;

#[cfg(test)]
mod resume_test;

pub use records::*;
pub use resume::*;
