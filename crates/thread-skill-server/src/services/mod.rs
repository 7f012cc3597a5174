pub mod catalog;
pub mod comments;
pub mod conversation;

pub use catalog::{CatalogFeed, HttpCatalogFeed, ThreadCatalog};
pub use comments::{CommentSource, HttpCommentSource};
pub use conversation::{Backends, Dispatcher, Pagination, PostCache};
