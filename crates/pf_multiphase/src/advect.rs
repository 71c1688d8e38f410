// crates/pf_multiphase/src/advect.rs

//! 方向分裂对流
//!
//! 基于 PLIC 重构平面的欧拉式方向分裂输运：每个时间步沿三个
//! 坐标轴各做一次一维扫掠。扫掠轴顺序由循环计数器（1→2→3→1）
//! 与相位序号共同决定，相邻时间步的扫掠顺序不同，抑制方向性
//! 偏差。
//!
//! 单次扫掠相位：
//! 1. 对每个面，取迎风施主单元；界面带内的施主做平面拟合，
//!    以面速度位移 `u·dt/dx` 确定扫掠子区间，用切割体积求面通量；
//!    纯相施主直接通量其均匀分数；
//! 2. `new = old - (flux_out - flux_in)`，越界值截断到 [0,1]；
//! 3. 填充幽灵层，使下一相位在所有单元上看到本相位的结果。
//!
//! 三相位结束后按配置做碎屑清除与掩码覆盖。
//!
//! # 并行
//!
//! 面通量与单元更新各自是"索引区间上的纯函数"：面通量只读分数
//! 场，单元更新只读通量与旧值、只写自身。两阶段之间与相位之间
//! 是同步屏障。串行与并行路径逐元素运算一致。

use crate::cleanup::{remove_debris, replace_masked};
use crate::fit::{fit_plane, interface_band};
use crate::plic::cut_volume;
use crate::state::{FaceVelocities, VofState};
use glam::DVec3;
use pf_foundation::{ensure, PfError, PfResult, Tolerance};
use pf_grid::{fill_halo, map_indexed, Axis, CartesianGrid, CellField, MaskField, ParallelPolicy, Stencil3, MIN_GHOST};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================
// 配置
// ============================================================

/// 方向分裂对流配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitAdvectionConfig {
    /// 三相位结束后是否清除孤立碎屑
    pub remove_debris: bool,

    /// 是否用参考场覆盖被 overset 掩码遮蔽的单元
    pub replace_masked: bool,

    /// 界面带检测半宽（单元数，不得超过幽灵层深度）
    pub band_width: usize,

    /// 数值容差
    pub tolerance: Tolerance,

    /// 并行策略
    pub parallel: ParallelPolicy,
}

impl Default for SplitAdvectionConfig {
    fn default() -> Self {
        Self {
            remove_debris: true,
            replace_masked: true,
            band_width: 1,
            tolerance: Tolerance::default(),
            parallel: ParallelPolicy::default(),
        }
    }
}

impl SplitAdvectionConfig {
    /// 设置碎屑清除开关
    pub fn with_remove_debris(mut self, enabled: bool) -> Self {
        self.remove_debris = enabled;
        self
    }

    /// 设置掩码覆盖开关
    pub fn with_replace_masked(mut self, enabled: bool) -> Self {
        self.replace_masked = enabled;
        self
    }

    /// 设置界面带半宽
    pub fn with_band_width(mut self, width: usize) -> Self {
        self.band_width = width;
        self
    }

    /// 设置容差
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// 设置并行策略
    pub fn with_parallel(mut self, parallel: ParallelPolicy) -> Self {
        self.parallel = parallel;
        self
    }

    /// 校验配置
    pub fn validate(&self) -> PfResult<()> {
        ensure!(
            self.band_width >= 1 && self.band_width <= MIN_GHOST,
            PfError::config(format!(
                "界面带半宽必须在 1..={MIN_GHOST} 内: {}",
                self.band_width
            ))
        );
        self.tolerance.validate()
    }
}

// ============================================================
// 扫掠循环计数器
// ============================================================

/// 扫掠顺序循环计数器
///
/// 取值 1、2、3，每个时间步推进一次，4 回卷到 1。参考实现把它
/// 作为进程级可变状态；这里作为对流器实例的显式字段，由唯一的
/// 对流步入口每步推进一次，绝不作为环境全局量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepCycle {
    counter: u8,
}

impl SweepCycle {
    /// 初始状态（尚未推进，首次对流步推进到 1）
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    /// 推进一步: 1→2→3→1
    pub fn advance(&mut self) {
        self.counter += 1;
        if self.counter > 3 {
            self.counter = 1;
        }
    }

    /// 当前计数值
    #[inline]
    pub fn current(&self) -> u8 {
        self.counter
    }

    /// 相位对应的扫掠轴
    ///
    /// 固定置换表：`axis = (counter - 1 + phase) mod 3`，即计数 1
    /// 按 x,y,z 扫掠，计数 2 按 y,z,x，计数 3 按 z,x,y。
    #[inline]
    pub fn axis_for_phase(&self, phase: usize) -> Axis {
        debug_assert!((1..=3).contains(&self.counter), "扫掠计数器未初始化");
        debug_assert!(phase < 3);
        Axis::ALL[(self.counter as usize - 1 + phase) % 3]
    }
}

impl Default for SweepCycle {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================
// 统计
// ============================================================

/// 单个对流步的统计量
///
/// 越界截断次数是数值质量指标：平流本身守恒，截断意味着损失。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// 执行平面拟合的施主单元次数（跨三个相位累计）
    pub reconstructed: usize,
    /// 更新后越界被截断的单元次数
    pub clipped: usize,
    /// 清除的碎屑单元数
    pub debris_removed: usize,
    /// 被掩码覆盖的单元数
    pub masked_replaced: usize,
}

// ============================================================
// 对流器
// ============================================================

/// 方向分裂对流器
///
/// 持有扫掠循环计数器与配置；法向/截距/通量等几何数据均为相位
/// 内临时量，每相位从头重算，不跨相位缓存（界面可能已经移动）。
///
/// # 示例
///
/// ```
/// use pf_grid::CartesianGrid;
/// use pf_multiphase::{FaceVelocities, SplitAdvectionConfig, SplitAdvector, VofState};
///
/// let grid = CartesianGrid::new(8, 8, 8, 1.0, 1.0, 1.0).unwrap();
/// let mut state = VofState::new(&grid, 3).unwrap();
/// let velocity = FaceVelocities::uniform(&grid, 0.25, 0.0, 0.0);
/// let mut advector = SplitAdvector::new(SplitAdvectionConfig::default()).unwrap();
///
/// let stats = advector.advect(&mut state, &velocity, &grid, 1.0, None, None);
/// assert_eq!(advector.current_sweep(), 1);
/// assert_eq!(stats.clipped, 0);
/// ```
pub struct SplitAdvector {
    config: SplitAdvectionConfig,
    sweep: SweepCycle,
    last_stats: SweepStats,
}

impl SplitAdvector {
    /// 创建对流器
    pub fn new(config: SplitAdvectionConfig) -> PfResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sweep: SweepCycle::new(),
            last_stats: SweepStats::default(),
        })
    }

    /// 配置引用
    pub fn config(&self) -> &SplitAdvectionConfig {
        &self.config
    }

    /// 当前扫掠计数值
    pub fn current_sweep(&self) -> u8 {
        self.sweep.current()
    }

    /// 上一个对流步的统计量
    pub fn last_stats(&self) -> SweepStats {
        self.last_stats
    }

    /// 推进扫掠循环计数器
    ///
    /// 每个时间步恰好推进一次，由 [`Self::advect`]（对流步的唯一
    /// 入口）在步首调用。
    fn advance_sweep_cycle(&mut self) {
        self.sweep.advance();
    }

    /// 执行一个时间步的对流
    ///
    /// 每个时间步调用恰好一次。前置条件（由调用方保证，见外部
    /// 接口约定）：速度场已时间推进且在所有需要的面上可用；CFL
    /// 位移 `|u|·dt/dx <= 1`。
    ///
    /// # 参数
    /// - `state`: 体积分数三态，读 `old` 写 `new`
    /// - `velocity`: 三个面法向速度场
    /// - `grid`: 网格与边界配置
    /// - `dt`: 时间步长
    /// - `mask`: 可选的 overset 掩码场
    /// - `mask_reference`: 掩码覆盖的参考分数场
    ///
    /// # 返回
    /// 本步统计量
    pub fn advect(
        &mut self,
        state: &mut VofState,
        velocity: &FaceVelocities,
        grid: &CartesianGrid,
        dt: f64,
        mask: Option<&MaskField>,
        mask_reference: Option<&CellField>,
    ) -> SweepStats {
        // 旧态复制进工作态
        state.working.copy_from(&state.old);
        fill_halo(&mut state.working, grid);

        self.advance_sweep_cycle();

        let mut stats = SweepStats::default();
        for phase in 0..3 {
            let axis = self.sweep.axis_for_phase(phase);
            let (reconstructed, clipped) =
                self.sweep_phase(&mut state.working, velocity, grid, dt, axis);
            stats.reconstructed += reconstructed;
            stats.clipped += clipped;
            // 相位间同步：下一相位读取本相位更新后的邻居
            fill_halo(&mut state.working, grid);
        }

        if self.config.remove_debris {
            stats.debris_removed = remove_debris(&mut state.working, self.config.tolerance.debris);
            if stats.debris_removed > 0 {
                fill_halo(&mut state.working, grid);
            }
        }

        if self.config.replace_masked {
            if let (Some(mask), Some(reference)) = (mask, mask_reference) {
                stats.masked_replaced = replace_masked(&mut state.working, mask, reference);
                if stats.masked_replaced > 0 {
                    fill_halo(&mut state.working, grid);
                }
            }
        }

        // 工作态复制进新态
        state.new.copy_from(&state.working);

        debug!(
            sweep = self.sweep.current(),
            reconstructed = stats.reconstructed,
            clipped = stats.clipped,
            debris_removed = stats.debris_removed,
            masked_replaced = stats.masked_replaced,
            "vof advection step complete"
        );

        self.last_stats = stats;
        stats
    }

    /// 单个扫掠相位
    ///
    /// 返回 (平面拟合次数, 截断次数)。
    fn sweep_phase(
        &self,
        vof: &mut CellField,
        velocity: &FaceVelocities,
        grid: &CartesianGrid,
        dt: f64,
        axis: Axis,
    ) -> (usize, usize) {
        let vel = velocity.component(axis);
        let dt_dx = dt / grid.spacing(axis);
        let tol = self.config.tolerance.interface;
        let band = self.config.band_width;
        let policy = self.config.parallel;
        let ax = axis.index();

        // 阶段 1: 面通量（单位：单元体积分数，沿轴向带符号）
        let vof_ref: &CellField = vof;
        let fluxes: Vec<(f64, bool)> = map_indexed(policy, vel.len(), |fidx| {
            let (fi, fj, fk) = vel.decompose(fidx);
            let un = vel.at(fi, fj, fk);
            let s = un * dt_dx;
            if s.abs() < tol {
                return (0.0, false);
            }
            debug_assert!(s.abs() <= 1.0 + 1e-12, "CFL 位移超过一个单元: {s}");

            // 迎风施主单元；域边界面的施主可能是幽灵单元
            let mut cell = [fi as isize, fj as isize, fk as isize];
            if un > 0.0 {
                cell[ax] -= 1;
            }
            let (ci, cj, ck) = (cell[0], cell[1], cell[2]);

            // 扫掠子区间（施主单元局部坐标）
            let (r0, dr0) = if un > 0.0 { (1.0 - s, s) } else { (0.0, -s) };

            if interface_band(vof_ref, ci, cj, ck, band, tol) {
                let fit = fit_plane(&Stencil3::gather(vof_ref, ci, cj, ck));
                let (m1, m2, m3) = rotate_to_axis(fit.normal, axis);
                (cut_volume(m1, m2, m3, fit.alpha, r0, dr0) * s, true)
            } else {
                // 纯相施主：均匀单元的切割体积就是其分数
                (vof_ref.at(ci, cj, ck) * s, false)
            }
        });

        // 阶段 2: 分数更新（读两侧面通量，写自身）
        let n_cells = vof.n_interior();
        let vof_ref: &CellField = vof;
        let updates: Vec<(f64, bool)> = map_indexed(policy, n_cells, |idx| {
            let (i, j, k) = vof_ref.interior_cell(idx);
            let cell = [i as usize, j as usize, k as usize];
            let mut hi = cell;
            hi[ax] += 1;

            let f_lo = fluxes[vel.index(cell[0], cell[1], cell[2])].0;
            let f_hi = fluxes[vel.index(hi[0], hi[1], hi[2])].0;

            let value = vof_ref.at(i, j, k) - (f_hi - f_lo);
            let clipped = value < -tol || value > 1.0 + tol;
            (value.clamp(0.0, 1.0), clipped)
        });

        for (idx, &(value, _)) in updates.iter().enumerate() {
            let (i, j, k) = vof.interior_cell(idx);
            vof.set(i, j, k, value);
        }

        let reconstructed = fluxes.iter().filter(|f| f.1).count();
        let clipped = updates.iter().filter(|u| u.1).count();
        (reconstructed, clipped)
    }
}

/// 法向分量循环旋转，使扫掠轴成为切割体积的第一轴
///
/// 平面方程在坐标轴重标记下不变：`(my,mz,mx)·(y,z,x) = alpha`。
#[inline]
fn rotate_to_axis(n: DVec3, axis: Axis) -> (f64, f64, f64) {
    match axis {
        Axis::X => (n.x, n.y, n.z),
        Axis::Y => (n.y, n.z, n.x),
        Axis::Z => (n.z, n.x, n.y),
    }
}

// ============================================================
// 测试
// ============================================================
