//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod game_repo;
pub mod lookup_repo;

pub use game_repo::GameRepo;
pub use lookup_repo::LookupRepo;
