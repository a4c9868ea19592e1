pub mod collections;
pub mod primitives;
