// crates/pf_multiphase/src/fit.rs

//! 单元平面拟合与界面带检测
//!
//! [`fit_plane`] 把法向估计与截距求解装配为完整的单元重构：
//! 输入 3×3×3 模板，输出单元自身坐标系（原点在单元低角、单位
//! 间距）下的界面平面 `(normal, alpha)`。纯函数，无隐藏状态。
//!
//! [`interface_band`] 判定单元是否邻近界面，用于把重构与通量
//! 计算限制在界面带内，避免纯相区域的无谓开销。

use crate::normal::mixed_youngs_central_normal;
use crate::plic::volume_intercept;
use glam::DVec3;
use pf_grid::{CellField, Stencil3};
use tracing::warn;

/// 单元内的界面平面
///
/// 平面方程 `normal · x = alpha`，坐标系原点在单元低角，间距为 1。
/// 拟合后 `|mx|+|my|+|mz| = 1`；分量符号指向真实梯度方向
/// （体积分数增大方向背离第一相）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneFit {
    /// 单位 L1 法向
    pub normal: DVec3,
    /// 平面截距
    pub alpha: f64,
}

/// 单元平面拟合
///
/// 步骤：混合格式估计法向 → 记录分量符号并翻转为非负 → L1 归一
/// → 截距求解 → 符号还原 → 截距按符号翻转引入的原点平移修正
/// (`alpha += min(0,mx)+min(0,my)+min(0,mz)`)。
///
/// 法向模长退化为零时回退到 z 轴对齐平面，不产生 NaN——混合
/// 格式的中心候选恒非零，此分支只在输入非法时触发。
pub fn fit_plane(s: &Stencil3) -> PlaneFit {
    let n = mixed_youngs_central_normal(s);
    let (mut mx, mut my, mut mz) = (n.x, n.y, n.z);

    if mx.abs() + my.abs() + mz.abs() < 1e-30 {
        warn!("plane fit degenerated to zero normal, falling back to z-aligned plane");
        mx = 0.0;
        my = 0.0;
        mz = 1.0;
    }

    // 翻转为非负并记录符号
    let invx = if mx < 0.0 {
        mx = -mx;
        -1.0
    } else {
        1.0
    };
    let invy = if my < 0.0 {
        my = -my;
        -1.0
    } else {
        1.0
    };
    let invz = if mz < 0.0 {
        mz = -mz;
        -1.0
    } else {
        1.0
    };

    // L1 归一化
    let mm2 = mx + my + mz;
    mx /= mm2;
    my /= mm2;
    mz /= mm2;

    let mut alpha = volume_intercept(mx, my, mz, s.center());

    // 还原到原坐标系
    mx *= invx;
    my *= invy;
    mz *= invz;
    alpha += mx.min(0.0) + my.min(0.0) + mz.min(0.0);

    PlaneFit {
        normal: DVec3::new(mx, my, mz),
        alpha,
    }
}

/// 界面带检测
///
/// 以 (i, j, k) 为中心、半宽 `n_band` 的窗口内，若体积分数峰谷差
/// 超过容差、或存在中间段取值（`tol < v < 1-tol`），判定该单元
/// 需要重构。`n_band` 不得超过幽灵层深度。
///
/// 该判据是优化而非正确性条件：被排除的单元必须是扫掠中分数
/// 不会变化的单元，否则产生无声的质量损失。
pub fn interface_band(
    field: &CellField,
    i: isize,
    j: isize,
    k: isize,
    n_band: usize,
    tol: f64,
) -> bool {
    debug_assert!(n_band <= field.nghost(), "界面带半宽超过幽灵层深度");

    let n = n_band as isize;
    let mut vof_max: f64 = 0.0;
    let mut vof_min: f64 = 1.0;
    let mut vof_mid = false;

    for kk in -n..=n {
        for jj in -n..=n {
            for ii in -n..=n {
                let v = field.at(i + ii, j + jj, k + kk);
                vof_max = vof_max.max(v);
                vof_min = vof_min.min(v);
                if v < 1.0 - tol && v > tol {
                    vof_mid = true;
                }
            }
        }
    }

    (vof_max - vof_min).abs() > tol || vof_mid
}

// ============================================================
// 测试
// ============================================================
