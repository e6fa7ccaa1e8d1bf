pub mod folder_evaluator;
pub use folder_evaluator::*;

pub mod media_folders;
pub use media_folders::*;
