//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `FaviconGenerator` 只负责流程编排与进度输出，不承载任何图像算法。
//! 处理链路固定为：
//! 1. 解析源图像路径（候选列表取第一个存在项）
//! 2. 加载并归一化为 RGBA
//! 3. 逐尺寸执行几何变换 + 圆形蒙版，写出 PNG
//! 4. 将 16/32/48 打包为多分辨率 ICO
//!
//! ## 实现思路
//!
//! - 配置在构造时校验一次，随后只读；单次运行内不存在配置漂移。
//! - 进度与产物汇总走标准输出，阶段耗时与告警走日志。
//! - 任何阶段失败都立即中止，不产生部分重试或补偿逻辑。

use std::collections::BTreeMap;
use std::time::Instant;

use crate::config::{self, FaviconConfig};
use crate::error::FaviconError;
use crate::source::GenerationReport;

/// favicon 生成器。
///
/// 封装一份只读配置，并编排各子模块实现完整流程。
pub struct FaviconGenerator {
    pub(crate) config: FaviconConfig,
}

impl FaviconGenerator {
    /// 校验配置并创建生成器。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use favicon_gen::{FaviconConfig, FaviconGenerator};
    ///
    /// let generator = FaviconGenerator::new(FaviconConfig::default())?;
    /// # Ok::<(), favicon_gen::FaviconError>(())
    /// ```
    pub fn new(config: FaviconConfig) -> Result<Self, FaviconError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 执行一次完整生成，返回产物汇总。
    ///
    /// 按尺寸表顺序写出各 PNG，并将 16/32/48 的处理结果保留下来
    /// 直接用于 ICO 打包，不做重复计算。
    pub fn run(&self) -> Result<GenerationReport, FaviconError> {
        let total_start = Instant::now();

        let source_path = self.resolve_source()?;
        println!("📁 使用源图像: {}", source_path.display());

        let load_start = Instant::now();
        let source = self.load_source(&source_path)?;
        let load_elapsed = load_start.elapsed();

        self.ensure_output_dir()?;

        let process_start = Instant::now();
        let mut outputs = Vec::with_capacity(config::SIZE_SPECS.len() + 1);
        let mut retained = BTreeMap::new();

        for (file_name, size) in config::SIZE_SPECS {
            let icon = self.process_icon(&source.image, size)?;
            let path = self.write_png(&icon, file_name)?;
            println!("✅ 生成: {} ({}x{})", path.display(), size, size);
            outputs.push(path);

            if config::ICO_SIZES.contains(&size) {
                retained.insert(size, icon);
            }
        }
        let process_elapsed = process_start.elapsed();

        let pack_start = Instant::now();
        let (ico_path, ico_sizes) = self.write_ico(&retained)?;
        println!(
            "✅ 生成: {} (尺寸: {})",
            ico_path.display(),
            format_sizes(&ico_sizes)
        );
        outputs.push(ico_path);
        let pack_elapsed = pack_start.elapsed();

        log::info!(
            "✅ favicon 生成完成 - load={}ms process={}ms pack={}ms total={}ms",
            load_elapsed.as_millis(),
            process_elapsed.as_millis(),
            pack_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        println!("\n🎉 所有 favicon 生成完成！");
        println!("\n生成的文件:");
        for path in &outputs {
            println!("  - {}", path.display());
        }

        Ok(GenerationReport {
            source_path: source.path,
            outputs,
            ico_sizes,
        })
    }
}

/// 把尺寸列表格式化为 `16x16, 32x32` 形式的展示文本。
fn format_sizes(sizes: &[u32]) -> String {
    sizes
        .iter()
        .map(|size| format!("{size}x{size}"))
        .collect::<Vec<_>>()
        .join(", ")
}
