pub mod article;
pub mod snapshot;
pub mod source;

pub use article::{Article, ArticleId};
pub use snapshot::{FeedSnapshot, FeedStatus};
pub use source::FeedSource;
