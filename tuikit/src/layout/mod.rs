pub mod distribute;
mod pack;
mod rect;

pub use distribute::{Distribution, ExpandDistribution};
pub use pack::{pack, natural_size, PackItem, PackParams};
pub use rect::{Point, Rect, Size};
