pub mod error;
pub mod preprocess;
pub mod storage;
pub mod vocabulary;

pub use error::StorageError;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use vocabulary::{AddOutcome, VocabularyStore};
