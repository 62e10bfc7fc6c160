//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理源图像的定位与加载，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要的内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 候选解析：按优先级取第一个存在的路径，全部缺失时带上完整候选列表报错。
//! - 文件：metadata 体积限制 + 读取 + 文件签名（magic bytes）校验。
//! - 解码：先只读图片头获取宽高做像素上限检查，再完整解码并归一化为 RGBA。

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageReader;

use crate::error::FaviconError;
use crate::generator::FaviconGenerator;
use crate::source::LoadedSource;

impl FaviconGenerator {
    /// 按优先级解析源图像路径，返回第一个存在的候选。
    pub(crate) fn resolve_source(&self) -> Result<PathBuf, FaviconError> {
        for candidate in &self.config.source_candidates {
            if candidate.is_file() {
                return Ok(candidate.clone());
            }
            log::debug!("候选路径不存在: {}", candidate.display());
        }

        Err(FaviconError::MissingSource {
            candidates: self.config.source_candidates.clone(),
        })
    }

    /// 读取并解码源图像，统一转换为 RGBA。
    pub(crate) fn load_source(&self, path: &Path) -> Result<LoadedSource, FaviconError> {
        let metadata = fs::metadata(path)?;
        if metadata.len() > self.config.max_source_bytes {
            return Err(FaviconError::ResourceLimit(format!(
                "源文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                self.config.max_source_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = fs::read(path)?;
        Self::validate_image_signature(&bytes)?;

        let (header_width, header_height) = Self::inspect_dimensions(&bytes)?;
        self.validate_pixel_limits(header_width, header_height)?;

        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| FaviconError::Decode(format!("图片解码失败：{}", e)))?;
        let image = decoded.to_rgba8();

        log::info!(
            "✅ 源图像解码成功 - 路径: {} 尺寸: {}x{}",
            path.display(),
            image.width(),
            image.height()
        );

        Ok(LoadedSource {
            path: path.to_path_buf(),
            image,
        })
    }

    /// 通过文件签名（magic bytes）校验输入是否为图片。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), FaviconError> {
        if bytes.is_empty() {
            return Err(FaviconError::InvalidFormat("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| FaviconError::InvalidFormat("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(FaviconError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }

    /// 仅通过内存中的图片头信息读取宽高。
    ///
    /// 用于在完整解码前做像素限制检查。
    fn inspect_dimensions(bytes: &[u8]) -> Result<(u32, u32), FaviconError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| FaviconError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| FaviconError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(&self, width: u32, height: u32) -> Result<(), FaviconError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| FaviconError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > self.config.max_source_pixels {
            return Err(FaviconError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, self.config.max_source_pixels
            )));
        }

        Ok(())
    }
}
