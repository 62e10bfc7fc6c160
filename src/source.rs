//! # 数据模型
//!
//! 将“流水线中间结果”与“对外汇总”解耦：
//! - `LoadedSource` 表示已解码并归一化为 RGBA 的源图像
//! - `ProcessedIcon` 表示某一尺寸的最终成品（方形 + 圆形蒙版）
//! - `GenerationReport` 表示一次完整生成的对外结果

use std::path::PathBuf;

use image::RgbaImage;

/// 加载阶段输出：归一化为 RGBA 的源图像及其来源路径。
pub(crate) struct LoadedSource {
    /// 实际使用的候选路径。
    pub(crate) path: PathBuf,
    /// RGBA8 像素数据。
    pub(crate) image: RgbaImage,
}

/// 变换阶段输出：指定边长的方形图像，alpha 通道已替换为圆形蒙版。
pub(crate) struct ProcessedIcon {
    /// 边长（像素）。
    pub(crate) size: u32,
    /// RGBA8 像素数据（`size * size * 4` 字节）。
    pub(crate) image: RgbaImage,
}

/// 一次完整生成的结果汇总。
#[derive(Debug)]
pub struct GenerationReport {
    /// 实际使用的源图像路径。
    pub source_path: PathBuf,
    /// 按生成顺序排列的全部输出文件路径（PNG 在前，ICO 最后）。
    pub outputs: Vec<PathBuf>,
    /// ICO 容器内实际嵌入的尺寸。
    pub ico_sizes: Vec<u32>,
}
