pub mod drives;
pub mod listing;
pub mod operations;
pub mod search;
