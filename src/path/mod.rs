pub mod context;
pub mod identifier;
pub mod key_path;
pub mod type_name;
