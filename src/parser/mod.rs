pub mod query_parser;

pub use query_parser::QueryParser;
