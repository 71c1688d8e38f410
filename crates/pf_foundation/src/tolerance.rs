// crates/pf_foundation/src/tolerance.rs

//! 数值容差配置
//!
//! 提供界面捕捉相关的数值容差，替代全局静态变量。
//!
//! # 设计原则
//!
//! 1. **无全局状态**: 容差作为参数传递
//! 2. **可序列化**: 支持从配置文件读取
//! 3. **语义分组**: 界面判定与碎屑清除使用不同量级的阈值

use serde::{Deserialize, Serialize};

/// 数值容差配置
///
/// # 示例
///
/// ```
/// use pf_foundation::Tolerance;
///
/// let tol = Tolerance::default();
/// assert!(tol.interface < 1e-10);
///
/// // 判断某个体积分数是否处于界面中间段
/// fn is_mid_range(f: f64, tol: &Tolerance) -> bool {
///     f > tol.interface && f < 1.0 - tol.interface
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// 界面判定容差
    ///
    /// 体积分数与 0/1 的偏差小于该值时视为纯相。
    /// 同时用于界面带检测的峰谷差判据。
    pub interface: f64,

    /// 碎屑清除阈值
    ///
    /// 被零分数邻居包围且分数低于该值的孤立碎片会被清零。
    pub debris: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            interface: 1e-12,
            debris: 1e-8,
        }
    }
}

impl Tolerance {
    /// 使用指定界面容差创建
    pub fn with_interface(mut self, tol: f64) -> Self {
        self.interface = tol;
        self
    }

    /// 使用指定碎屑阈值创建
    pub fn with_debris(mut self, tol: f64) -> Self {
        self.debris = tol;
        self
    }

    /// 校验容差取值合理
    pub fn validate(&self) -> crate::PfResult<()> {
        crate::error::PfError::check_range("tolerance.interface", self.interface, 0.0, 1e-3)?;
        crate::error::PfError::check_range("tolerance.debris", self.debris, 0.0, 1e-2)?;
        Ok(())
    }
}

// ========================================================================
// 测试
// ========================================================================
