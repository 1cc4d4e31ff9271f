pub mod fetch;
pub mod load;
pub mod merge;
pub mod run;
pub mod save;
pub mod summary;
pub mod validate;
