pub mod link;
pub mod user;
