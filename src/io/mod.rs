pub mod clock;
pub mod config_io;
pub mod launcher;
pub mod recovery;
pub mod store;
