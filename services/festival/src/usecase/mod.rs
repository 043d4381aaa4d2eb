pub mod account;
pub mod admin;
pub mod code;
pub mod discount;
pub mod event;
pub mod submission;
pub mod team;
pub mod token;
