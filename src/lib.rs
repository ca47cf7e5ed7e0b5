pub mod clean;
pub mod history;
pub mod table;
