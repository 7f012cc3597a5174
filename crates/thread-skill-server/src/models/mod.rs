pub mod thread;

pub use thread::{CatalogEntry, CatalogPayload, Thread, ThreadPayload, Topic};
