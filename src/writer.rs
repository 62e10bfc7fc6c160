//! PNG 输出模块
//!
//! 负责输出目录的创建与单尺寸 PNG 的落盘。
//! 目录不存在时自动 `create_dir_all`，避免上层判断；
//! 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::fs;
use std::path::PathBuf;

use image::ImageFormat;

use crate::error::FaviconError;
use crate::generator::FaviconGenerator;
use crate::source::ProcessedIcon;

impl FaviconGenerator {
    /// 确保输出目录存在。
    pub(crate) fn ensure_output_dir(&self) -> Result<(), FaviconError> {
        fs::create_dir_all(&self.config.output_dir)?;
        Ok(())
    }

    /// 将处理结果写为独立 PNG 文件，返回落盘路径。
    pub(crate) fn write_png(
        &self,
        icon: &ProcessedIcon,
        file_name: &str,
    ) -> Result<PathBuf, FaviconError> {
        let path = self.config.output_dir.join(file_name);

        icon.image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| {
                FaviconError::Encode(format!("写入 PNG 失败（{}）：{}", path.display(), e))
            })?;

        log::debug!("PNG 已写入: {} ({}x{})", path.display(), icon.size, icon.size);

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use image::{GenericImageView, ImageBuffer, Rgba};

    use crate::config::FaviconConfig;
    use crate::generator::FaviconGenerator;
    use crate::source::ProcessedIcon;

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        std::env::temp_dir().join(format!("favicon-gen-test-{nanos}"))
    }

    #[test]
    fn write_png_creates_dir_and_file_with_expected_dimensions() {
        let dir = unique_temp_dir();
        let mut config = FaviconConfig::default();
        config.output_dir = dir.clone();
        let generator = FaviconGenerator::new(config).expect("generator init failed");

        let icon = ProcessedIcon {
            size: 32,
            image: ImageBuffer::from_pixel(32, 32, Rgba([1, 2, 3, 255])),
        };

        generator.ensure_output_dir().expect("create output dir");
        let path = generator.write_png(&icon, "favicon-32x32.png").expect("write png");

        let reloaded = image::open(&path).expect("reopen png");
        assert_eq!(reloaded.dimensions(), (32, 32));
        assert!(reloaded.color().has_alpha());

        let _ = std::fs::remove_dir_all(dir);
    }
}
