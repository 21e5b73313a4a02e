mod enums;

pub use enums::{ButtonBoxStyle, Orientation, PackSide, ScrollbarPolicy, TextDirection};
