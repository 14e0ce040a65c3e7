pub mod cascade;
pub mod density;
pub mod filter;
pub mod summary;
