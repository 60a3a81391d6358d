pub mod ai;
pub mod azure;
pub mod execute;
pub mod health;
pub mod projects;
pub mod users;
pub mod workspace;
