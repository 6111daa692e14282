pub mod sync_parser;
pub mod time_table;
