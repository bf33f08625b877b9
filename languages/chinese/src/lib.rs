pub mod filter;
pub mod format;
pub mod index;
pub mod loader;
pub mod lookup;
pub mod parser;
pub mod source;
pub mod store;

pub use format::DictionaryFormat;
pub use index::{DictionaryIndex, IndexBuilder, build_index};
pub use loader::{CedictLoader, Dictionaries};
pub use lookup::ChineseLookup;
pub use parser::RawRecord;
pub use source::{FileSource, HttpSource, StaticSource, TextSource};
pub use store::DictionaryStore;
