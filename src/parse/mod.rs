pub mod item_parser;
pub mod item_serializer;

pub use item_parser::parse_item;
pub use item_serializer::serialize_item;
