pub mod announce;
pub mod init;
pub mod serve;
