#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    pub const fn flip(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Which end of a box a child is packed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum PackSide {
    #[default]
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// When a scrolled viewport shows one of its scrollbars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ScrollbarPolicy {
    Always,
    Never,
    /// Show only when there is something to scroll.
    #[default]
    Automatic,
}

/// Child placement for a [`ButtonBox`](crate::ButtonBox).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ButtonBoxStyle {
    /// Equal space before, between and after the children.
    #[default]
    Spread,
    /// First and last child flush with the edges, the rest spread between.
    Edge,
    Start,
    End,
    Center,
    /// Children share the whole extent.
    Expand,
}
