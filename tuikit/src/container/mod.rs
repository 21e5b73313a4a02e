//! Packing containers.

mod button_box;
mod pack_box;

pub use button_box::ButtonBox;
pub use pack_box::{PackBox, PackChild};
