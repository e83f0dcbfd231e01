//! Confluence API types.

mod attachment;
mod input;
mod label;
mod page;
mod property;

pub use attachment::{Attachment, AttachmentsResponse};
pub use input::{PageAttachmentInput, PageContentInput, PageUpdateOptions};
pub use label::{Label, LabelsResponse};
pub use page::{Body, ConfluencePage, Links, PageChildren, PageMetadata, PageSearchResult, Storage, Version};
pub use property::{PageProperty, PagePropertyInput, PropertyVersion};
