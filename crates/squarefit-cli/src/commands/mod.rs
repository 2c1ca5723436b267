pub mod bounds;
pub mod canonicalize;
pub mod corners;
pub mod dedup;
pub mod validate;
