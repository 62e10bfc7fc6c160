//! # ICO 容器打包模块
//!
//! ## 设计思路
//!
//! 尺寸选择策略与编码过程分离：选择是纯函数（可单测），
//! 编码只负责把选中的帧写入容器。
//!
//! ## 实现思路
//!
//! - 按固定优先顺序（16/32/48）取与已生成尺寸的交集。
//! - 交集为空时回退到最小可用尺寸，保证容器非空。
//! - 每个选中尺寸都以 PNG 压缩帧的形式显式嵌入，先在内存中编码完成
//!   再一次性落盘，避免半写状态依赖隐式 flush。

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use image::ExtendedColorType;
use image::codecs::ico::{IcoEncoder, IcoFrame};

use crate::config;
use crate::error::FaviconError;
use crate::generator::FaviconGenerator;
use crate::source::ProcessedIcon;

/// 按优先顺序挑选 ICO 内嵌尺寸。
///
/// 返回优先列表与可用尺寸的交集（保持优先顺序）；
/// 交集为空时回退到最小可用尺寸；可用集合为空时返回空列表。
pub(crate) fn select_ico_sizes(
    available: &BTreeMap<u32, ProcessedIcon>,
    preferred: &[u32],
) -> Vec<u32> {
    let selected: Vec<u32> = preferred
        .iter()
        .copied()
        .filter(|size| available.contains_key(size))
        .collect();

    if !selected.is_empty() {
        return selected;
    }

    available.keys().next().copied().into_iter().collect()
}

impl FaviconGenerator {
    /// 将保留的各尺寸图像打包为一个多分辨率 ICO 文件。
    ///
    /// # 返回
    /// 落盘路径与实际嵌入的尺寸列表
    pub(crate) fn write_ico(
        &self,
        retained: &BTreeMap<u32, ProcessedIcon>,
    ) -> Result<(PathBuf, Vec<u32>), FaviconError> {
        let selected = select_ico_sizes(retained, &config::ICO_SIZES);
        if selected.is_empty() {
            return Err(FaviconError::Encode(
                "没有可用于打包的尺寸".to_string(),
            ));
        }

        let mut frames = Vec::with_capacity(selected.len());
        for size in &selected {
            let icon = &retained[size];
            let frame = IcoFrame::as_png(
                icon.image.as_raw(),
                icon.size,
                icon.size,
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| FaviconError::Encode(format!("构建 {size}x{size} ICO 帧失败：{e}")))?;
            frames.push(frame);
        }

        let mut encoded = Vec::new();
        IcoEncoder::new(&mut encoded)
            .encode_images(&frames)
            .map_err(|e| FaviconError::Encode(format!("ICO 打包失败：{}", e)))?;

        let path = self.config.output_dir.join(config::ICO_FILE_NAME);
        fs::write(&path, &encoded)?;

        Ok((path, selected))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use image::{ImageBuffer, Rgba};

    use super::*;
    use crate::config::FaviconConfig;

    fn icon(size: u32) -> ProcessedIcon {
        ProcessedIcon {
            size,
            image: ImageBuffer::from_pixel(size, size, Rgba([200, 100, 50, 255])),
        }
    }

    fn retained(sizes: &[u32]) -> BTreeMap<u32, ProcessedIcon> {
        sizes.iter().map(|&size| (size, icon(size))).collect()
    }

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("favicon-gen-test-{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn selects_full_intersection_in_preferred_order() {
        let available = retained(&[48, 16, 32]);

        assert_eq!(select_ico_sizes(&available, &[16, 32, 48]), vec![16, 32, 48]);
    }

    #[test]
    fn selects_partial_intersection() {
        let available = retained(&[32, 180]);

        assert_eq!(select_ico_sizes(&available, &[16, 32, 48]), vec![32]);
    }

    #[test]
    fn falls_back_to_smallest_available_size() {
        let available = retained(&[180, 512]);

        assert_eq!(select_ico_sizes(&available, &[16, 32, 48]), vec![180]);
    }

    #[test]
    fn empty_available_set_selects_nothing() {
        let available = retained(&[]);

        assert!(select_ico_sizes(&available, &[16, 32, 48]).is_empty());
    }

    #[test]
    fn written_ico_embeds_one_frame_per_selected_size() {
        let dir = unique_temp_dir();
        let mut config = FaviconConfig::default();
        config.output_dir = dir.clone();
        let generator = FaviconGenerator::new(config).expect("generator init failed");

        let (path, sizes) = generator
            .write_ico(&retained(&[16, 32, 48]))
            .expect("write ico");

        assert_eq!(sizes, vec![16, 32, 48]);

        // ICONDIR 头：reserved=0, type=1, count=帧数
        let bytes = std::fs::read(&path).expect("read ico");
        assert_eq!(&bytes[0..4], &[0, 0, 1, 0]);
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 3);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn packing_with_no_retained_sizes_is_an_encode_error() {
        let dir = unique_temp_dir();
        let mut config = FaviconConfig::default();
        config.output_dir = dir.clone();
        let generator = FaviconGenerator::new(config).expect("generator init failed");

        let result = generator.write_ico(&retained(&[]));

        assert!(matches!(result, Err(FaviconError::Encode(_))));

        let _ = std::fs::remove_dir_all(dir);
    }
}
