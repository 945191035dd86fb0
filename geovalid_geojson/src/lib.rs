//! Structural and semantic validation of GeoJSON documents (RFC 7946).
//!
//! The input is a generic decoded JSON tree ([`geovalid_core::json::JsonValue`]);
//! the output is either the same document as a typed value or an ordered list
//! of diagnostics, each with a stable code and the sub-path of the failure.
//!
//! ```
//! use geovalid_core::json::JsonValue;
//! use geovalid_geojson::validate;
//!
//! let doc = JsonValue::from(serde_json::json!({
//! 	"type": "Point",
//! 	"coordinates": [102.0, 0.5],
//! 	"bbox": [102.0, 0.5, 102.0, 0.5]
//! }));
//! assert!(validate(&doc).is_ok());
//! ```

mod geo;
pub mod validate;

pub use geo::*;
pub use validate::{Issue, IssueKind, Issues, Validator, validate};
