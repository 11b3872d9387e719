pub mod blog;
pub mod login;
pub mod project;
mod records;
pub mod resume;
pub mod serve;
pub mod tech;

#[cfg(test)]
#[path = "test_support.rs"]
mod test_support;


#[cfg(test)]
#[path = "blog_test.rs"]
mod blog_test;


#[cfg(test)]
#[path = "resume_test.rs"]
mod resume_test;

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;
