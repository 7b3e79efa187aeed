pub mod string_ext;
pub mod testing;

pub use string_ext::StringExt;
