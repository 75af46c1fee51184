/// 48x32 monochrome icon for the VMU LCD.
///
/// `true` is a lit (black) pixel. Row 0 is the top of the display.
#[derive(Clone, PartialEq, Eq)]
pub struct Icon {
    pub pixels: [[bool; Self::WIDTH]; Self::HEIGHT],
}

impl Icon {
    pub const WIDTH: usize = 48;
    pub const HEIGHT: usize = 32;
    /// Bytes per encoded row: ceil(48 / 8).
    pub const ROW_BYTES: usize = (Self::WIDTH + 7) / 8;
    /// Total encoded size: 32 * 6 = 192 bytes.
    pub const ENCODED_LEN: usize = Self::HEIGHT * Self::ROW_BYTES;

    pub fn new() -> Self {
        Self {
            pixels: [[false; Self::WIDTH]; Self::HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        for row in self.pixels.iter_mut() {
            for pixel in row.iter_mut() {
                *pixel = false;
            }
        }
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= Self::WIDTH || y >= Self::HEIGHT {
            return false;
        }
        self.pixels[y][x]
    }

    /// Sets the pixel lit. Returns whether the grid actually changed;
    /// out-of-range coordinates are ignored.
    pub fn paint(&mut self, x: i32, y: i32) -> bool {
        self.set(x, y, true)
    }

    /// Sets the pixel unlit. Returns whether the grid actually changed.
    pub fn erase(&mut self, x: i32, y: i32) -> bool {
        self.set(x, y, false)
    }

    fn set(&mut self, x: i32, y: i32, lit: bool) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= Self::WIDTH || y >= Self::HEIGHT {
            return false;
        }
        if self.pixels[y][x] == lit {
            return false;
        }
        self.pixels[y][x] = lit;
        true
    }

    /// Packs the grid into the VMU framebuffer layout expected by
    /// `vmu_draw_lcd`: row-major, top row first. Within a row each group of
    /// 8 columns becomes one byte (leftmost column in bit 7), every byte is
    /// bit-reversed, and the row's 6 bytes are emitted in reverse order.
    /// The controller scans bits and bytes opposite to the grid indexing,
    /// hence the double reversal.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::ENCODED_LEN);
        for row in &self.pixels {
            let mut row_bytes = [0u8; Self::ROW_BYTES];
            for (group, byte) in row_bytes.iter_mut().enumerate() {
                let start = group * 8;
                for i in 0..8 {
                    let col = start + i;
                    if col < Self::WIDTH && row[col] {
                        *byte |= 1 << (7 - i);
                    }
                }
                *byte = byte.reverse_bits();
            }
            out.extend(row_bytes.iter().rev());
        }
        out
    }

    /// Inverse of [`encode`](Self::encode): rebuilds the grid from a packed
    /// 192-byte framebuffer.
    pub fn decode(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() != Self::ENCODED_LEN {
            return Err(format!(
                "expected {} bytes of icon data, got {}",
                Self::ENCODED_LEN,
                bytes.len()
            ));
        }
        let mut icon = Self::new();
        for (y, row_bytes) in bytes.chunks_exact(Self::ROW_BYTES).enumerate() {
            for (group, byte) in row_bytes.iter().rev().enumerate() {
                let unpacked = byte.reverse_bits();
                for i in 0..8 {
                    let col = group * 8 + i;
                    if col < Self::WIDTH {
                        icon.pixels[y][col] = unpacked & (1 << (7 - i)) != 0;
                    }
                }
            }
        }
        Ok(icon)
    }
}

#[cfg(test)]
mod tests {
    use super::Icon;

    #[test]
    fn blank_grid_encodes_to_zeros() {
        let icon = Icon::new();
        let bytes = icon.encode();
        assert_eq!(bytes.len(), Icon::ENCODED_LEN);
        assert!(bytes.iter().all(|&b| b == 0x00));
    }

    #[test]
    fn full_grid_encodes_to_ff() {
        let mut icon = Icon::new();
        for y in 0..Icon::HEIGHT as i32 {
            for x in 0..Icon::WIDTH as i32 {
                icon.paint(x, y);
            }
        }
        assert!(icon.encode().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn top_left_pixel_lands_in_last_byte_of_row_zero() {
        let mut icon = Icon::new();
        icon.paint(0, 0);
        let bytes = icon.encode();
        // Column 0 is bit 7 of the first group; bit reversal moves it to
        // bit 0 and the group reversal makes that byte the last of the row.
        assert_eq!(bytes[5], 0x01);
        for (i, &b) in bytes.iter().enumerate() {
            if i != 5 {
                assert_eq!(b, 0x00, "stray byte at index {}", i);
            }
        }
    }

    #[test]
    fn top_right_pixel_lands_in_first_byte_of_row_zero() {
        let mut icon = Icon::new();
        icon.paint(47, 0);
        let bytes = icon.encode();
        assert_eq!(bytes[0], 0x80);
        assert!(bytes[1..].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn rows_are_emitted_top_first() {
        let mut icon = Icon::new();
        icon.paint(0, 31);
        let bytes = icon.encode();
        assert_eq!(bytes[31 * Icon::ROW_BYTES + 5], 0x01);
        assert!(bytes[..31 * Icon::ROW_BYTES].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn decode_inverts_encode() {
        let mut icon = Icon::new();
        // An asymmetric pattern so both reversals matter.
        for y in 0..Icon::HEIGHT as i32 {
            for x in 0..Icon::WIDTH as i32 {
                if (x * 7 + y * 3) % 5 == 0 || (x == y) {
                    icon.paint(x, y);
                }
            }
        }
        let decoded = Icon::decode(&icon.encode()).unwrap();
        assert!(decoded == icon);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert!(Icon::decode(&[0u8; 191]).is_err());
        assert!(Icon::decode(&[0u8; 193]).is_err());
    }

    #[test]
    fn paint_and_erase_are_idempotent() {
        let mut icon = Icon::new();
        assert!(icon.paint(3, 4));
        assert!(!icon.paint(3, 4));
        assert!(icon.erase(3, 4));
        assert!(!icon.erase(3, 4));
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut icon = Icon::new();
        assert!(!icon.paint(-1, 0));
        assert!(!icon.paint(0, -1));
        assert!(!icon.paint(48, 0));
        assert!(!icon.paint(0, 32));
        assert!(icon.encode().iter().all(|&b| b == 0x00));
    }

    #[test]
    fn clear_resets_to_blank_encoding() {
        let mut icon = Icon::new();
        icon.paint(10, 10);
        icon.paint(47, 31);
        icon.erase(10, 10);
        icon.clear();
        assert!(icon.encode().iter().all(|&b| b == 0x00));
    }
}
