pub mod format;
pub mod list_ops;
