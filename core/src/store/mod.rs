pub mod fallback;
pub mod kv;
pub mod results;

pub use fallback::{demo_result, DEMO_VIDEO_URL};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use results::{ResultLookup, ResultNamespace, ResultStore};
