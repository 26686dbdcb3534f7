pub mod document;
pub mod table;
