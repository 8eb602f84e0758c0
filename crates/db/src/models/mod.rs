//! Row structs and write commands.
//!
//! Each submodule contains the `FromRow` structs matching database rows and,
//! where the table is written to, the command struct consumed by the
//! repository.

pub mod game;
pub mod lookup;
