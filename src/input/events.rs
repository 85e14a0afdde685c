//! Generic input event types for host-independent pointer handling.

/// Mouse button identification.
///
/// Hosts map their native button codes to these values. Only [`MouseButton::Left`]
/// (the primary button) draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (primary drawing button)
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// Any other button, by host button number
    Other(u32),
}

impl MouseButton {
    /// Maps X11/GTK-style button numbers (1 = left, 2 = middle, 3 = right).
    pub fn from_number(number: u32) -> Self {
        match number {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            other => MouseButton::Other(other),
        }
    }

    pub fn is_primary(self) -> bool {
        self == MouseButton::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_numbers_map_like_gtk() {
        assert!(MouseButton::from_number(1).is_primary());
        assert_eq!(MouseButton::from_number(3), MouseButton::Right);
        assert_eq!(MouseButton::from_number(8), MouseButton::Other(8));
    }
}
