//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `FaviconConfig`，保证运行时行为可观测、可调整、可测试。
//! 固定尺寸表与 ICO 嵌入顺序作为常量放在本模块，避免散落在流程代码里的魔法数。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的默认配置（候选路径、输出目录、放大倍率均来自约定）。
//! - `validate` 在构造生成器时执行一次，拒绝明显不可用的取值；
//!   放大倍率超出推荐区间时仅提示，不拒绝。

use std::path::PathBuf;

use image::imageops::FilterType;
use once_cell::sync::Lazy;

use crate::error::FaviconError;

/// 生成的 PNG 尺寸表（文件名 → 正方形边长），按此顺序处理与输出。
pub const SIZE_SPECS: [(&str, u32); 5] = [
    ("favicon-16x16.png", 16),
    ("favicon-32x32.png", 32),
    ("favicon-48x48.png", 48),
    ("icon.png", 512),
    ("apple-touch-icon.png", 180),
];

/// ICO 容器内嵌尺寸，按优先顺序排列。
pub const ICO_SIZES: [u32; 3] = [16, 32, 48];

/// ICO 输出文件名。
pub const ICO_FILE_NAME: &str = "favicon.ico";

/// 放大倍率的推荐区间（超出会提示但不拒绝）。
pub const RECOMMENDED_ZOOM_RANGE: (f64, f64) = (1.15, 1.25);

/// 默认源图像候选路径，按优先级排列。
static DEFAULT_SOURCE_CANDIDATES: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("public/icon-source.png"),
        PathBuf::from("app/icon.png"),
    ]
});

/// favicon 生成配置。
///
/// 字段覆盖了源解析、加载上限、几何变换与输出位置四个方面。
#[derive(Debug, Clone)]
pub struct FaviconConfig {
    /// 源图像候选路径（按优先级排列，取第一个存在的，相对当前工作目录）。
    pub source_candidates: Vec<PathBuf>,
    /// 输出目录（不存在时自动创建）。
    pub output_dir: PathBuf,
    /// 中心放大倍率，用于“拉近”主体。
    pub zoom_factor: f64,
    /// 重采样滤镜策略。
    pub resize_filter: FilterType,
    /// 源文件允许的最大体积（字节）。
    pub max_source_bytes: u64,
    /// 源图像解码后的像素上限（`width * height`）。
    pub max_source_pixels: u64,
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            source_candidates: DEFAULT_SOURCE_CANDIDATES.clone(),
            output_dir: PathBuf::from("public"),
            zoom_factor: 1.2,
            resize_filter: FilterType::Lanczos3,
            max_source_bytes: 50 * 1024 * 1024,
            max_source_pixels: 40_000_000,
        }
    }
}

impl FaviconConfig {
    /// 校验配置是否可用。
    ///
    /// # 返回
    /// - `Ok(())` — 配置可用
    /// - `Err(FaviconError::InvalidConfig)` — 候选列表为空或倍率不可用
    pub(crate) fn validate(&self) -> Result<(), FaviconError> {
        if self.source_candidates.is_empty() {
            return Err(FaviconError::InvalidConfig(
                "源图像候选列表不能为空".to_string(),
            ));
        }

        if !self.zoom_factor.is_finite() || self.zoom_factor < 1.0 {
            return Err(FaviconError::InvalidConfig(format!(
                "zoom_factor 必须是不小于 1.0 的有限值（当前：{}）",
                self.zoom_factor
            )));
        }

        if self.zoom_factor > 4.0 {
            return Err(FaviconError::InvalidConfig(format!(
                "zoom_factor 不能大于 4.0（当前：{}）",
                self.zoom_factor
            )));
        }

        let (low, high) = RECOMMENDED_ZOOM_RANGE;
        if self.zoom_factor != 1.0 && !(low..=high).contains(&self.zoom_factor) {
            log::warn!(
                "⚠️ zoom_factor {} 超出推荐区间 {}~{}，裁剪效果可能偏紧或偏松",
                self.zoom_factor,
                low,
                high
            );
        }

        if self.max_source_pixels == 0 {
            return Err(FaviconError::InvalidConfig(
                "max_source_pixels 不能为 0".to_string(),
            ));
        }

        Ok(())
    }
}
