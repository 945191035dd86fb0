mod bbox;
mod collection;
mod feature;
mod geometry;
mod position;

pub use bbox::*;
pub use collection::*;
pub use feature::*;
pub use geometry::*;
pub use position::*;
