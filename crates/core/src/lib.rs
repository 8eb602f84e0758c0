//! Domain types and rules shared by the gamecat crates.
//!
//! Nothing in here touches the database or HTTP. The [`image_store`] module
//! is the one piece of I/O, behind the [`image_store::ImageStore`] trait.

pub mod catalog;
pub mod error;
pub mod image_store;
pub mod types;
