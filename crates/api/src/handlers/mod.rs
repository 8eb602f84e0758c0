pub mod games;
pub mod images;
pub mod lookups;
