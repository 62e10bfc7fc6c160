//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `FaviconError` 枚举，替代各阶段分散的
//! `.map_err(|e| e.to_string())`、`format!(...)`、`expect()` 等不一致模式。
//!
//! 所有阶段函数统一返回 `Result<T, FaviconError>`，任何失败都会中止整次
//! 生成（无重试、无部分产物清理），由 `main` 打印诊断并以非零码退出。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 外部原因（解码器、编码器）以字符串承载，调用侧按分支匹配。
//! - `std::io::Error` 提供 `From` 转换，无需手动 map。

use std::path::PathBuf;

/// favicon 生成统一错误类型
///
/// 所有阶段均返回此类型，确保入口处收到一致的错误格式。
#[derive(Debug, thiserror::Error)]
pub enum FaviconError {
    /// 所有候选路径均不存在（入口处会逐条打印候选以便放置源文件）
    #[error("未找到源图像")]
    MissingSource { candidates: Vec<PathBuf> },

    /// 输入不是可识别的图片格式
    #[error("格式错误：{0}")]
    InvalidFormat(String),

    /// 图片解码或像素变换失败
    #[error("解码错误：{0}")]
    Decode(String),

    /// PNG / ICO 编码失败
    #[error("编码错误：{0}")]
    Encode(String),

    /// 超出配置的体积或像素上限
    #[error("资源限制：{0}")]
    ResourceLimit(String),

    /// 配置校验失败
    #[error("配置错误：{0}")]
    InvalidConfig(String),

    /// 文件系统 I/O 错误
    #[error("文件系统错误：{0}")]
    Io(#[from] std::io::Error),
}
