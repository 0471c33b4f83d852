//! ARGB8888 colors used by the wireframe renderer.

pub const BACKGROUND: u32 = 0xFF1E1E1E;
pub const VISIBLE_EDGE: u32 = 0xFFE8E8E8;
pub const OCCLUDED_EDGE: u32 = 0xFF5A7FA8;

/// Splits an ARGB color into `[r, g, b, a]` bytes.
pub fn to_rgba(color: u32) -> [u8; 4] {
    let [a, r, g, b] = color.to_be_bytes();
    [r, g, b, a]
}
