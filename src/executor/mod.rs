pub mod cursor;
pub mod insert;
pub mod scan;
pub mod statement;
