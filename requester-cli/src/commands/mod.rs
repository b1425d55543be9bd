// requester-cli/src/commands/mod.rs
pub mod request;
pub mod upload;

pub use request::RequestArgs;
pub use upload::UploadArgs;
