pub mod content;

#[cfg(feature = "backend")]
pub mod api;
#[cfg(feature = "backend")]
pub mod cli;
#[cfg(feature = "backend")]
pub mod store;
