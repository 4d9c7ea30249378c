pub mod art;
pub mod mock;
