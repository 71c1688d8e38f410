// crates/pf_grid/src/parallel.rs

//! 数据并行策略
//!
//! 逐单元/逐面的几何计算是天然数据并行的：每个元素读取有界
//! 邻域、只写自身。本模块把并行调度抽象为"在索引区间上应用
//! 纯函数"，几何内核保持纯标量算术，不感知调度方式。
//!
//! 小规模问题并行开销大于收益，低于阈值时走串行路径；
//! 两条路径逐元素执行完全相同的运算，结果按位一致。

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// 并行执行策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// 是否启用并行
    pub enabled: bool,
    /// 并行阈值（元素数），低于此值走串行
    pub threshold: usize,
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 4096,
        }
    }
}

impl ParallelPolicy {
    /// 强制串行
    pub fn serial() -> Self {
        Self {
            enabled: false,
            threshold: usize::MAX,
        }
    }

    /// 设置并行开关
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// 设置并行阈值
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// 给定规模是否并行执行
    #[inline]
    pub fn should_parallelize(&self, n: usize) -> bool {
        self.enabled && n >= self.threshold
    }
}

/// 在索引区间上应用纯函数，收集结果
///
/// 并行与否由策略决定；`f` 必须无副作用（只依赖索引）。
pub fn map_indexed<T, F>(policy: ParallelPolicy, n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if policy.should_parallelize(n) {
        (0..n).into_par_iter().map(f).collect()
    } else {
        (0..n).map(f).collect()
    }
}

// ============================================================
// 测试
// ============================================================
