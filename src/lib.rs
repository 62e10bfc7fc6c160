//! # favicon 生成工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     main (CLI 入口)                       │
//! │          日志初始化 + 错误出口（退出码 0 / 1）             │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ Result<GenerationReport, FaviconError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕              库 (favicon_gen)                     │
//! │                                                          │
//! │  ┌─ error ────── FaviconError (统一错误类型)               │
//! │  │                                                       │
//! │  ├─ config ───── FaviconConfig + 固定尺寸表                │
//! │  │                                                       │
//! │  ├─ generator ── 流程编排 + 阶段耗时 + 进度输出             │
//! │  │   ├─ loader     候选解析 · 签名校验 · RGBA 解码          │
//! │  │   ├─ pipeline   中心裁方 · 放大 · 回裁 · 目标缩放        │
//! │  │   ├─ mask       圆形 alpha 蒙版（纯几何）               │
//! │  │   ├─ writer     PNG 落盘                               │
//! │  │   └─ ico        尺寸选择策略 + ICO 容器打包              │
//! │  │                                                       │
//! │  └─ source ───── 各阶段中间数据模型                        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `FaviconError`，所有阶段的失败出口 |
//! | [`config`] | 候选路径、输出目录、放大倍率、资源上限与固定尺寸表 |
//! | `generator` | 固定处理链路的编排：解析 → 加载 → 逐尺寸变换 → 打包 |
//! | `loader` | 源图像解析与加载，解码前做签名与像素上限校验 |
//! | `pipeline` | 几何变换（裁剪 / 缩放），全部纯函数 |
//! | `mask` | 以边长为唯一输入的圆形蒙版 |
//! | `writer` | 输出目录创建与 PNG 写入 |
//! | `ico` | 16/32/48 优先级选择与多分辨率 ICO 打包 |
//! | `source` | `LoadedSource` / `ProcessedIcon` / `GenerationReport` |

pub mod config;
pub mod error;

mod generator;
mod ico;
mod loader;
mod mask;
mod pipeline;
mod source;
mod writer;

pub use config::FaviconConfig;
pub use error::FaviconError;
pub use generator::FaviconGenerator;
pub use source::GenerationReport;
