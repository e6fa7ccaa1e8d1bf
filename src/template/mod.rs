pub mod string_template;
pub use string_template::*;

pub mod slug;
pub use slug::*;

pub mod slug_formatter;
pub use slug_formatter::*;
