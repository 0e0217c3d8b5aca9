pub mod init;
pub mod names;
