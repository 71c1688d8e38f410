// crates/pf_foundation/src/lib.rs

//! PlicFlow 基础层
//!
//! 提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`tolerance`]: 数值容差配置
//! - [`validation`]: 运行时验证宏
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 serde 和 thiserror
//! 2. **无全局状态**: 容差作为参数传递，不使用全局静态变量
//! 3. **构造期校验**: 数值核心内部不产生错误，错误只出现在
//!    构造/配置阶段（契约违规）

#![warn(clippy::all)]

pub mod error;
pub mod tolerance;
pub mod validation;

pub use error::{PfError, PfResult};
pub use tolerance::Tolerance;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::ensure;
    pub use crate::error::{PfError, PfResult};
    pub use crate::tolerance::Tolerance;
}
