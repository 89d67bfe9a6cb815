//! 像素格式转换
//!
//! 源图：打包 ARGB8888（`0xAARRGGBB`），带 alpha
//! 输出：XRGB8888 小端（内存中为 B G R X），X 恒为 0xFF，显示端不读回 alpha

/// 纯黑、不透明（留边颜色）
pub const OPAQUE_BLACK: u32 = 0xFF00_0000;

/// 输出像素格式
///
/// 数值与 `wl_shm.format` 枚举一致
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PixelFormat {
    Argb8888 = 0,
    Xrgb8888 = 1,
}

impl PixelFormat {
    /// 合成器写出的格式
    pub const OUTPUT: PixelFormat = PixelFormat::Xrgb8888;

    /// 把 `0xXXRRGGBB` 编码成该格式在内存中的字节
    #[inline]
    pub fn encode(self, pixel: u32) -> [u8; 4] {
        pixel.to_le_bytes()
    }
}

/// 与纯黑背景合成（预乘 alpha），结果不透明
///
/// alpha 为 0xFF 时颜色原样保留；否则每个通道按 `c * a / 255` 截断
#[inline]
pub fn over_black(argb: u32) -> u32 {
    let alpha = argb >> 24;
    if alpha == 0xFF {
        return argb;
    }
    let r = ((argb >> 16) & 0xFF) * alpha / 255;
    let g = ((argb >> 8) & 0xFF) * alpha / 255;
    let b = (argb & 0xFF) * alpha / 255;
    OPAQUE_BLACK | (r << 16) | (g << 8) | b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_pixel_unchanged() {
        assert_eq!(over_black(0xFF12_3456), 0xFF12_3456);
    }

    /// 测试：alpha 0x80 的纯红 → 0x80 红（255 * 128 / 255 = 128）
    #[test]
    fn test_half_alpha_red() {
        assert_eq!(over_black(0x80FF_0000), 0xFF80_0000);
    }

    #[test]
    fn test_transparent_becomes_black() {
        assert_eq!(over_black(0x00FF_FFFF), OPAQUE_BLACK);
    }

    #[test]
    fn test_truncation() {
        // 0x7F * 0x01 / 255 = 0
        assert_eq!(over_black(0x017F_7F7F), OPAQUE_BLACK);
        // 200 * 100 / 255 = 78
        assert_eq!(over_black(0x64C8_C8C8), 0xFF4E_4E4E);
    }

    #[test]
    fn test_encode_little_endian() {
        assert_eq!(PixelFormat::OUTPUT.encode(0xFF11_2233), [0x33, 0x22, 0x11, 0xFF]);
    }
}
