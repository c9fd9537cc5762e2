//! Colors in ARGB8888 format and the lighting combination.

/// Constant floor added to every lit channel.
pub const AMBIENT: f32 = 5.0;

pub const BACKGROUND: u32 = 0x0000_0000;
pub const FILL: u32 = 0xFFFF_FFFF;
pub const WIREFRAME: u32 = 0xFF00_0000;

#[inline]
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Splits an ARGB8888 value into `[r, g, b, a]`.
#[inline]
pub const fn unpack_rgba(color: u32) -> [u8; 4] {
    [
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
        (color >> 24) as u8,
    ]
}

/// Applies lighting to a base color.
///
/// Each RGB channel becomes `min(255, 5 + channel * light)` where `light`
/// is `diffuse + specular_coefficient * specular`. Alpha is forced opaque.
#[inline]
pub fn shade(color: u32, light: f32) -> u32 {
    let [r, g, b, _] = unpack_rgba(color);
    let lit = |channel: u8| (AMBIENT + channel as f32 * light).min(255.0) as u8;
    pack_rgba(lit(r), lit(g), lit(b), 255)
}
