//! CLI command implementations.

pub(crate) mod delete;
pub(crate) mod upload;

pub(crate) use delete::DeleteArgs;
pub(crate) use upload::UploadArgs;
