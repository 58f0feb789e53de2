/// Name of the pane holding the active left layer.
pub const LEFT_PANE: &str = "leftPane";
/// Name of the pane holding the active right layer.
pub const RIGHT_PANE: &str = "rightPane";

/// Stacking order of the left pane; the right pane sits directly above it.
pub const LEFT_PANE_Z_INDEX: i32 = 400;
pub const RIGHT_PANE_Z_INDEX: i32 = 401;

/// One half of a side-by-side comparison.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub const fn pane_name(self) -> &'static str {
        match self {
            Side::Left => LEFT_PANE,
            Side::Right => RIGHT_PANE,
        }
    }

    pub const fn z_index(self) -> i32 {
        match self {
            Side::Left => LEFT_PANE_Z_INDEX,
            Side::Right => RIGHT_PANE_Z_INDEX,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}
