#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_string_is_lowercase_and_padded() {
        assert_eq!(Color::from_rgb8(0xd6, 0x28, 0x28).to_hex_string(), "#d62828");
        assert_eq!(Color::from_rgb8(0, 9, 255).to_hex_string(), "#0009ff");
    }
}
