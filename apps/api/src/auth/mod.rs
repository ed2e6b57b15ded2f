pub mod middleware;
pub mod password;
pub mod sessions;
