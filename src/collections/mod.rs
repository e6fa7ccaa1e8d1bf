pub mod field_path;
pub use field_path::*;

pub mod field;
pub use field::*;

pub mod collection_type;
pub use collection_type::*;

pub mod entry_format;
pub use entry_format::*;

pub mod collection_file;
pub use collection_file::*;

pub mod collection;
pub use collection::*;

pub mod entry;
pub use entry::*;

pub mod collections_map;
pub use collections_map::*;

pub mod collections_store;
pub use collections_store::*;
