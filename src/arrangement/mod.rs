pub mod builder;
pub mod metadata;
pub mod note_mapper;
pub mod timing;
pub mod types;
