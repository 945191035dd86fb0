mod stringify;
mod types;

pub mod interop;

pub use stringify::{escape_json_string, stringify};
pub use types::{JsonArray, JsonObject, JsonValue};
