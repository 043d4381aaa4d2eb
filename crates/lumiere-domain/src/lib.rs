//! Domain types shared across the Lumiere festival workspace.
//!
//! This crate contains only pure types and arithmetic with no framework
//! dependencies. Import in `usecase/` and `domain/` layers; never in
//! `infra/` or `handlers/`.

pub mod codes;
pub mod fees;
pub mod pagination;
pub mod user;
