//! Command handlers for the Iconsync CLI.

pub mod generate;
pub mod info;
pub mod init;
pub mod validate;
