//! 圆形蒙版模块
//!
//! 以目标边长为唯一输入生成 8 位蒙版：内切圆各边内缩 1 像素
//! （等效包围盒 `[1, 1, size−2, size−2]`，即圆心 `(size−1)/2`、
//! 半径 `(size−2)/2`），让圆边落在画布内侧。
//! 算法纯函数化：输入边长，输出唯一蒙版，便于测试。

use image::RgbaImage;

/// 生成边长 `size` 的圆形蒙版。
///
/// # 参数
/// * `size` - 蒙版边长（像素）
///
/// # 返回
/// 长度为 `size * size` 的按行存储缓冲，圆内 255（不透明）、圆外 0（全透明）
pub(crate) fn circular_mask(size: u32) -> Vec<u8> {
    let center = (size as f64 - 1.0) / 2.0;
    let radius = (size as f64 - 2.0) / 2.0;
    let radius_sq = radius * radius;

    let mut mask = vec![0_u8; size as usize * size as usize];
    for y in 0..size {
        for x in 0..size {
            let dx = x as f64 - center;
            let dy = y as f64 - center;
            if dx * dx + dy * dy <= radius_sq {
                mask[y as usize * size as usize + x as usize] = 255;
            }
        }
    }

    mask
}

/// 将圆形蒙版写入方形图像的 alpha 通道，覆盖原有 alpha。
///
/// 圆外像素变为全透明，圆内像素保留 RGB 并设为不透明。
pub(crate) fn apply_circular_mask(image: &mut RgbaImage) {
    debug_assert_eq!(image.width(), image.height());

    let mask = circular_mask(image.width());
    for (index, pixel) in image.pixels_mut().enumerate() {
        pixel.0[3] = mask[index];
    }
}
