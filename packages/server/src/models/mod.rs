pub mod link;
pub mod shared;
pub mod user;
