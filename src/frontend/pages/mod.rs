mod admin;
mod home;

pub use admin::Admin;
pub use home::Home;
