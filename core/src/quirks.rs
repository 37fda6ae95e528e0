/// What the flag register receives from a left shift (8XYE).
///
/// Right shifts always leave the shifted-out bit as 0 or 1. Left shifts historically
/// left `Vx & 0x80` in VF, i.e. 0 or 128.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftFlag {
    /// VF is 1 if the most significant bit was set, else 0
    #[default]
    Normalized,
    /// VF is the most significant bit left in place (0x80 or 0)
    Masked,
}

/// Behaviours that differ between interpreters and can be chosen per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quirks {
    pub shift_flag: ShiftFlag,
}

impl ShiftFlag {
    /// The flag left by shifting `value` one place to the left
    pub fn shl_flag(self, value: u8) -> u8 {
        match self {
            ShiftFlag::Normalized => value >> 7,
            ShiftFlag::Masked => value & 0x80,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_is_default() {
        assert_eq!(Quirks::default().shift_flag, ShiftFlag::Normalized);
    }

    #[test]
    fn test_shl_flag() {
        assert_eq!(ShiftFlag::Normalized.shl_flag(0x81), 0x1);
        assert_eq!(ShiftFlag::Normalized.shl_flag(0x7F), 0x0);
        assert_eq!(ShiftFlag::Masked.shl_flag(0x81), 0x80);
        assert_eq!(ShiftFlag::Masked.shl_flag(0x7F), 0x0);
    }
}
