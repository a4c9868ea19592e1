pub mod array_static;
pub mod tuple;
