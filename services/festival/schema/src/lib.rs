//! sea-orm entities for the festival service database.

pub mod discounts;
pub mod events;
pub mod submissions;
pub mod teams;
pub mod users;
