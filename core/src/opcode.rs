/// # Opcodes
///
/// Instructions are 16-bit words fetched big-endian from memory. Every word is decoded into
/// the same fixed fields, whether or not the instruction uses them:
/// - `[f___]` the family; selects a broad category of operation
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` an 8-bit immediate
/// - `[___n]` a 4-bit literal; picks the operation within the 8 family and sizes sprites
/// - `[_x__]` the register Vx, or the upper bound of the range V0..=Vx
/// - `[__y_]` the register Vy
pub trait Opcode {
    /// All four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[f___]`
    fn family(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> usize;

    /// `[__y_]`
    fn y(&self) -> usize;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x() as u8, self.y() as u8, self.n())
    }

    fn family(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> usize {
        usize::from((self >> 8) & 0xF)
    }

    fn y(&self) -> usize {
        usize::from((self >> 4) & 0xF)
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Joins the two bytes of an instruction word.
pub fn from_bytes(high: u8, low: u8) -> u16 {
    u16::from(high) << 8 | u16::from(low)
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_fields() {
        let op: u16 = 0xD12F;
        assert_eq!(op.family(), 0xD);
        assert_eq!(op.x(), 0x1);
        assert_eq!(op.y(), 0x2);
        assert_eq!(op.n(), 0xF);
        assert_eq!(op.kk(), 0x2F);
        assert_eq!(op.addr(), 0x12F);
    }

    #[test]
    fn test_nibbles() {
        let op: u16 = 0xF365;
        assert_eq!(op.nibbles(), (0xF, 0x3, 0x6, 0x5));
    }

    #[test]
    fn test_from_bytes_is_big_endian() {
        assert_eq!(from_bytes(0xAA, 0xBB), 0xAABB);
    }
}
