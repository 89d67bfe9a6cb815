use crate::domain::{ImageSize, SurfaceSize, MAX_FRAME_PIXELS};

pub const DEFAULT_TITLE: &str = "PNG Viewer";
pub const DEFAULT_APP_ID: &str = "pngview";

/// 首次请求的窗口尺寸 = 源图尺寸 × 该倍数
pub const DEFAULT_INITIAL_SCALE: u32 = 16;

/// memfd 名称（出现在 /proc/<pid>/fd 里，便于排查）
pub const SHM_NAME: &str = "pngview-shm";

/// 查看器配置（不可变值对象）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// 窗口标题
    pub title: String,
    /// Wayland app id
    pub app_id: String,
    /// 初始放大倍数（>= 1）
    pub initial_scale: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
            initial_scale: DEFAULT_INITIAL_SCALE,
        }
    }
}

impl ViewerConfig {
    /// 第一次 configure 之前请求的窗口尺寸
    ///
    /// 倍数取 `initial_scale` 与单帧上限允许的最大倍数中较小的一个（至少 1）
    pub fn initial_size(&self, image: ImageSize) -> SurfaceSize {
        // k * k * area <= MAX_FRAME_PIXELS
        let limit = ((MAX_FRAME_PIXELS / image.area().max(1)) as f64).sqrt() as u32;
        image.scaled(self.initial_scale.clamp(1, limit.max(1)))
    }
}
