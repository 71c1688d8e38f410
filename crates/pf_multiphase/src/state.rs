// crates/pf_multiphase/src/state.rs

//! 多相状态容器
//!
//! - [`VofState`]: 体积分数的旧态/工作态/新态三份存储
//! - [`FaceVelocities`]: 三个面法向速度场
//!
//! 状态轮换（新态提升为下一步旧态）由外层时间积分循环负责，
//! 对流核心只消费 `old`、产出 `new`，`working` 是步内缓冲。

use pf_foundation::PfResult;
use pf_grid::{Axis, CartesianGrid, CellField, FaceField};

/// 体积分数三态存储
///
/// 语义约定：值 1 为纯第一相，0 为纯第二相。对流步开始时把
/// `old` 复制进 `working`，三次扫掠就地更新 `working`，清理后
/// 复制进 `new`。清理后的内部值保证落在 [0,1]。
#[derive(Debug, Clone)]
pub struct VofState {
    /// 旧态（上一步结果，对流步只读）
    pub old: CellField,
    /// 工作态（步内缓冲，逐相位更新）
    pub working: CellField,
    /// 新态（对流步输出，下游直接读取）
    pub new: CellField,
}

impl VofState {
    /// 创建全零状态
    pub fn new(grid: &CartesianGrid, nghost: usize) -> PfResult<Self> {
        let field = CellField::from_grid(grid, nghost)?;
        Ok(Self {
            old: field.clone(),
            working: field.clone(),
            new: field,
        })
    }

    /// 从初始分数场创建（三份同值）
    pub fn from_initial(field: CellField) -> Self {
        Self {
            old: field.clone(),
            working: field.clone(),
            new: field,
        }
    }

    /// 状态轮换：新态提升为旧态
    ///
    /// 由外层时间循环在每步末尾调用一次。
    pub fn advance(&mut self) {
        std::mem::swap(&mut self.old, &mut self.new);
    }
}

/// 面法向速度场
///
/// 三个分量各自存储在对应轴的全部面上，由外部求解器时间推进后
/// 提供，对流核心只读。
#[derive(Debug, Clone)]
pub struct FaceVelocities {
    u: FaceField,
    v: FaceField,
    w: FaceField,
}

impl FaceVelocities {
    /// 创建全零速度场
    pub fn zeros(grid: &CartesianGrid) -> Self {
        let (nx, ny, nz) = (grid.nx(), grid.ny(), grid.nz());
        Self {
            u: FaceField::new(Axis::X, nx, ny, nz),
            v: FaceField::new(Axis::Y, nx, ny, nz),
            w: FaceField::new(Axis::Z, nx, ny, nz),
        }
    }

    /// 创建均匀速度场
    pub fn uniform(grid: &CartesianGrid, ux: f64, uy: f64, uz: f64) -> Self {
        let mut vel = Self::zeros(grid);
        vel.u.fill(ux);
        vel.v.fill(uy);
        vel.w.fill(uz);
        vel
    }

    /// 某轴的速度分量
    #[inline]
    pub fn component(&self, axis: Axis) -> &FaceField {
        match axis {
            Axis::X => &self.u,
            Axis::Y => &self.v,
            Axis::Z => &self.w,
        }
    }

    /// 某轴的速度分量（可变）
    #[inline]
    pub fn component_mut(&mut self, axis: Axis) -> &mut FaceField {
        match axis {
            Axis::X => &mut self.u,
            Axis::Y => &mut self.v,
            Axis::Z => &mut self.w,
        }
    }
}

// ============================================================
// 测试
// ============================================================
