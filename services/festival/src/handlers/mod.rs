pub mod admin;
pub mod auth;
pub mod discount;
pub mod event;
pub mod submission;
pub mod team;
pub mod user;
