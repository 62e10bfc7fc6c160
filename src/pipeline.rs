//! # 几何变换流水线模块
//!
//! ## 设计思路
//!
//! “中心裁方 → 放大 → 回裁 → 目标缩放”是一条固定链路，全部为纯函数，
//! 不做任何 I/O，给定（源像素、目标边长、放大倍率）输出唯一确定。
//!
//! ## 实现思路
//!
//! 1. 以短边 `M = min(w, h)` 为准做中心正方形裁剪，偏移取整除
//! 2. 用高质量卷积核放大到 `round(M × zoom)`
//! 3. 以同样的居中取整规则回裁到 `M×M`，得到“拉近”效果
//! 4. 缩放到目标边长，并把 alpha 通道替换为圆形蒙版

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::FaviconError;
use crate::generator::FaviconGenerator;
use crate::mask;
use crate::source::ProcessedIcon;

impl FaviconGenerator {
    /// 对源图像执行完整变换，产出指定边长的圆形图标。
    pub(crate) fn process_icon(
        &self,
        source: &RgbaImage,
        target_size: u32,
    ) -> Result<ProcessedIcon, FaviconError> {
        let framed = zoom_center_square(source, self.config.zoom_factor, self.config.resize_filter)?;
        let mut resized = resize_rgba(&framed, target_size, target_size, self.config.resize_filter)?;
        mask::apply_circular_mask(&mut resized);

        Ok(ProcessedIcon {
            size: target_size,
            image: resized,
        })
    }
}

/// 以短边为准的中心正方形裁剪。
///
/// 裁剪偏移为 `((w − M) / 2, (h − M) / 2)`，整数除法向下取整，
/// 非整除时主体最多偏离几何中心 1 像素。
pub(crate) fn center_square_crop(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let min_size = width.min(height);
    let left = (width - min_size) / 2;
    let top = (height - min_size) / 2;

    image::imageops::crop_imm(image, left, top, min_size, min_size).to_image()
}

/// 中心放大：先放大到 `round(M × zoom)`，再以居中取整规则回裁到 `M×M`。
///
/// `round(M × zoom) <= M`（含 `zoom = 1.0`）时直接返回裁方结果，
/// 跳过放大与回裁，两条路径逐像素等价。
pub(crate) fn zoom_center_square(
    image: &RgbaImage,
    zoom_factor: f64,
    filter: FilterType,
) -> Result<RgbaImage, FaviconError> {
    let cropped = center_square_crop(image);
    let min_size = cropped.width();
    let zoomed_size = (min_size as f64 * zoom_factor).round() as u32;

    if zoomed_size <= min_size {
        return Ok(cropped);
    }

    let zoomed = resize_rgba(&cropped, zoomed_size, zoomed_size, filter)?;
    let offset = (zoomed_size - min_size) / 2;

    Ok(image::imageops::crop_imm(&zoomed, offset, offset, min_size, min_size).to_image())
}

/// 高质量缩放。
///
/// 优先走 fast_image_resize 的卷积实现，构建缓冲或执行失败时
/// 回退到 image 内置缩放并记录告警。尺寸相同直接返回副本。
pub(crate) fn resize_rgba(
    image: &RgbaImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbaImage, FaviconError> {
    if image.dimensions() == (target_width, target_height) {
        return Ok(image.clone());
    }

    match resize_with_fast_image_resize(image, target_width, target_height, filter) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!(
                "⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}",
                err
            );
            Ok(image::imageops::resize(
                image,
                target_width,
                target_height,
                filter,
            ))
        }
    }
}

fn resize_with_fast_image_resize(
    image: &RgbaImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbaImage, FaviconError> {
    let (src_width, src_height) = image.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        image.as_raw().clone(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| FaviconError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| FaviconError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| FaviconError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::FaviconConfig;

    /// 像素值编码坐标（r = x, g = y），便于断言裁剪偏移。
    fn coordinate_image(width: u32, height: u32) -> RgbaImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        })
    }

    fn test_generator() -> FaviconGenerator {
        FaviconGenerator::new(FaviconConfig::default()).expect("generator init failed")
    }

    #[test]
    fn processed_icon_is_exactly_target_size() {
        let generator = test_generator();
        let source = coordinate_image(1000, 800);

        for target in [16_u32, 32, 48, 180, 512] {
            let icon = generator
                .process_icon(&source, target)
                .expect("process failed");

            assert_eq!(icon.size, target);
            assert_eq!(icon.image.dimensions(), (target, target));
            assert_eq!(
                icon.image.as_raw().len(),
                (target as usize) * (target as usize) * 4
            );
        }
    }

    #[test]
    fn crop_uses_min_side_and_centers_offsets() {
        let image = coordinate_image(10, 6);
        let cropped = center_square_crop(&image);

        assert_eq!(cropped.dimensions(), (6, 6));
        // left = (10 - 6) / 2 = 2, top = 0
        assert_eq!(cropped.get_pixel(0, 0).0[0], 2);
        assert_eq!(cropped.get_pixel(0, 0).0[1], 0);
        assert_eq!(cropped.get_pixel(5, 5).0[0], 7);
        assert_eq!(cropped.get_pixel(5, 5).0[1], 5);
    }

    #[test]
    fn crop_floor_division_on_odd_margin() {
        let image = coordinate_image(7, 4);
        let cropped = center_square_crop(&image);

        assert_eq!(cropped.dimensions(), (4, 4));
        // left = (7 - 4) / 2 = 1（向下取整）
        assert_eq!(cropped.get_pixel(0, 0).0[0], 1);
    }

    #[test]
    fn zoom_of_one_matches_plain_crop_pixel_for_pixel() {
        let image = coordinate_image(50, 40);

        let zoomed = zoom_center_square(&image, 1.0, FilterType::Lanczos3)
            .expect("zoom path failed");
        let plain = center_square_crop(&image);

        assert_eq!(zoomed.as_raw(), plain.as_raw());
    }

    #[test]
    fn zoom_keeps_square_frame_size() {
        let image = coordinate_image(60, 44);

        let zoomed = zoom_center_square(&image, 1.2, FilterType::Lanczos3)
            .expect("zoom path failed");

        assert_eq!(zoomed.dimensions(), (44, 44));
    }

    #[test]
    fn transform_is_deterministic() {
        let generator = test_generator();
        let source = coordinate_image(300, 200);

        let first = generator.process_icon(&source, 48).expect("first run failed");
        let second = generator
            .process_icon(&source, 48)
            .expect("second run failed");

        assert_eq!(first.image.as_raw(), second.image.as_raw());
    }

    #[test]
    fn resize_to_same_size_is_identity() {
        let image = coordinate_image(32, 32);
        let resized = resize_rgba(&image, 32, 32, FilterType::Lanczos3).expect("resize failed");

        assert_eq!(resized.as_raw(), image.as_raw());
    }

    proptest! {
        #[test]
        fn crop_is_square_with_min_side(width in 1_u32..96, height in 1_u32..96) {
            let image = coordinate_image(width, height);
            let cropped = center_square_crop(&image);
            let min_size = width.min(height);

            prop_assert_eq!(cropped.dimensions(), (min_size, min_size));
        }

        #[test]
        fn crop_top_left_matches_floor_centered_offset(width in 1_u32..96, height in 1_u32..96) {
            let image = coordinate_image(width, height);
            let cropped = center_square_crop(&image);
            let min_size = width.min(height);
            let left = (width - min_size) / 2;
            let top = (height - min_size) / 2;

            prop_assert_eq!(cropped.get_pixel(0, 0).0[0], (left % 256) as u8);
            prop_assert_eq!(cropped.get_pixel(0, 0).0[1], (top % 256) as u8);
        }
    }
}
