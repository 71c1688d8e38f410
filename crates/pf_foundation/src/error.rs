// crates/pf_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `PfError` 枚举和 `PfResult` 类型别名。
//!
//! # 设计原则
//!
//! 数值核心（法向估计、PLIC 求解、扫掠更新）是确定性计算内核，
//! 运行时从不返回错误：退化几何用 epsilon 保护的分母和回退法向
//! 就地恢复，越界结果一律截断。`PfError` 只用于构造期的契约校验
//! （幽灵层深度不足、尺寸不匹配、配置非法），在集成边界处拦截
//! 编程错误。

use thiserror::Error;

/// 统一结果类型
pub type PfResult<T> = Result<T, PfError>;

/// PlicFlow 错误类型
#[derive(Error, Debug)]
pub enum PfError {
    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    /// 幽灵层深度不足
    ///
    /// 法向模板和扫掠的邻居访问要求至少 3 层幽灵单元。
    #[error("幽灵层深度不足: 需要至少{required}层, 实际{actual}层")]
    InsufficientGhosts {
        /// 要求的最小层数
        required: usize,
        /// 实际层数
        actual: usize,
    },

    /// 无效网格定义
    #[error("无效的网格定义: {message}")]
    InvalidGrid {
        /// 具体错误信息
        message: String,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl PfError {
    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// 幽灵层深度不足
    pub fn insufficient_ghosts(required: usize, actual: usize) -> Self {
        Self::InsufficientGhosts { required, actual }
    }

    /// 无效网格
    pub fn invalid_grid(message: impl Into<String>) -> Self {
        Self::InvalidGrid {
            message: message.into(),
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl PfError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> PfResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查值是否在范围内
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> PfResult<()> {
        if value < min || value > max {
            Err(Self::out_of_range(field, value, min, max))
        } else {
            Ok(())
        }
    }

    /// 检查索引是否在范围内
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> PfResult<()> {
        if index >= len {
            Err(Self::index_out_of_bounds(index_type, index, len))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 测试
// ========================================================================
