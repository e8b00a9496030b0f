pub mod all_docs;
pub mod record;
pub mod utils;

// Re-export handler functions for use in routing
pub use all_docs::get as all_docs_get;
pub use record::delete as record_delete;
pub use record::get as record_get;
pub use record::post as record_post;
pub use record::put as record_put;
pub use record::without_id as record_without_id;
