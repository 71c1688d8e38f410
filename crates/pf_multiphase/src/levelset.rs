// crates/pf_multiphase/src/levelset.rs

//! 水平集到体积分数转换
//!
//! 问题初始化的一次性转换：给定符号距离场 φ（第一相内为正）与
//! 界面带半宽 ε，逐单元构造体积分数：
//!
//! 1. 在 φ 上做 Youngs 有限差分求法向（带 ×32 缩放，取绝对值后
//!    除回），L1 模即单元间距度量下的梯度模；
//! 2. `φ < -ε` 的远场单元直接取 0；
//! 3. 否则 `alpha = φ/|∇φ|_L1 + 0.5`，alpha 越出 (0,1) 时分数
//!    截断为 0/1，否则用全立方体切割体积求分数。
//!
//! 非周期边界的单元用塌缩模板（零梯度镜像）求法向。

use crate::normal::youngs_normal_neumann;
use crate::plic::cut_volume;
use pf_foundation::{ensure, PfError, PfResult};
use pf_grid::{fill_halo, BoundarySides, CartesianGrid, CellField, Stencil3};
use tracing::debug;

/// 单元级转换规则
///
/// `s` 是以该单元为中心的 φ 模板，`sides` 标记单元与非周期域
/// 边界的接触（法向估计在边界处走零梯度塌缩变体），`eps` 为
/// 界面带半宽。返回 [0,1] 内的体积分数。
pub fn levelset_to_vof(s: &Stencil3, sides: BoundarySides, eps: f64) -> f64 {
    let g = youngs_normal_neumann(s, sides);
    let mx = (g.x / 32.0).abs();
    let my = (g.y / 32.0).abs();
    let mz = (g.z / 32.0).abs();
    let norm_l1 = mx + my + mz;
    let phi = s.center();

    // 远场均匀 φ 梯度退化，按符号取纯相
    if norm_l1 <= f64::EPSILON {
        return if phi < 0.0 { 0.0 } else { 1.0 };
    }

    // 远离界面处强制 alpha 为负
    let alpha = if phi < -eps {
        -1.0
    } else {
        phi / norm_l1 + 0.5
    };

    if alpha >= 1.0 {
        1.0
    } else if alpha <= 0.0 {
        0.0
    } else {
        cut_volume(mx / norm_l1, my / norm_l1, mz / norm_l1, alpha, 0.0, 1.0)
    }
}

/// 水平集场转换器
///
/// 一次性把整个符号距离场转换为体积分数场。
#[derive(Debug, Clone, Copy)]
pub struct LevelSetConverter {
    eps: f64,
}

impl LevelSetConverter {
    /// 创建转换器
    ///
    /// `eps` 为界面带半宽（物理长度与 φ 同量纲），必须为正。
    pub fn new(eps: f64) -> PfResult<Self> {
        ensure!(
            eps > 0.0,
            PfError::config(format!("界面带半宽必须为正: {eps}"))
        );
        Ok(Self { eps })
    }

    /// 界面带半宽
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// 整场转换
    ///
    /// 输入 φ 场（内部单元有效即可，幽灵层在内部填充），输出同形
    /// 的体积分数场，幽灵层已填充。
    pub fn convert(&self, phi: &CellField, grid: &CartesianGrid) -> PfResult<CellField> {
        let mut phi_work = phi.clone();
        fill_halo(&mut phi_work, grid);

        let mut vof = CellField::from_grid(grid, phi.nghost())?;
        for idx in 0..vof.n_interior() {
            let (i, j, k) = vof.interior_cell(idx);
            let sides = grid.boundary_sides(i, j, k);
            let s = Stencil3::gather(&phi_work, i, j, k);
            vof.set(i, j, k, levelset_to_vof(&s, sides, self.eps));
        }
        fill_halo(&mut vof, grid);

        let (lo, hi) = vof.interior_min_max();
        debug!(eps = self.eps, min = lo, max = hi, "levelset converted to vof");
        Ok(vof)
    }
}

// ============================================================
// 测试
// ============================================================
