pub mod init;
pub mod transform;
