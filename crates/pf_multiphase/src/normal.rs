// crates/pf_multiphase/src/normal.rs

//! 界面法向估计
//!
//! 给定 3×3×3 体积分数模板，估计界面单位法向。提供两套格式：
//!
//! - **Youngs 有限差分** (Youngs 1982): 对每轴取两个半模板的
//!   加权和之差，权重按与轴的邻接程度取 1/2/4。
//! - **混合 Youngs/中心格式** (Aulisa et al. 2007, MYC): 三个按
//!   符号规则构造的中心差分候选加 Youngs-CIAM 候选，按主对角
//!   分量的置信度选择。中心差分在光滑界面上更精确，Youngs 在
//!   尖角与薄结构附近更稳健。
//!
//! # 已知缺陷
//!
//! Youngs 模板不含中心单元 (0,0,0)：孤立的单湿单元具有对称的
//! 空邻域，其 Youngs 法向所有分量为零。混合格式的中心候选
//! 因符号规则恒非零，对此情形天然兜底。

use glam::DVec3;
use pf_grid::{Axis, BoundarySides, Stencil3};

/// Youngs 有限差分法向
///
/// 返回值带 **-32 倍**的梯度缩放:
///
/// ```text
/// (mx, my, mz) = -32 · ∇c
/// ```
///
/// 需要真实梯度的调用方必须除以 32（见水平集转换）；
/// 只需要方向的调用方直接做 L1 归一化即可。
pub fn youngs_normal(s: &Stencil3) -> DVec3 {
    DVec3::new(
        half_sum(s, Axis::X, -1) - half_sum(s, Axis::X, 1),
        half_sum(s, Axis::Y, -1) - half_sum(s, Axis::Y, 1),
        half_sum(s, Axis::Z, -1) - half_sum(s, Axis::Z, 1),
    )
}

/// Youngs 法向的诺伊曼边界变体
///
/// 与 [`youngs_normal`] 同一公式，但贴非周期边界的一侧，越界
/// 偏移塌缩到中心索引（零梯度镜像），不读取模板外的数据。
pub fn youngs_normal_neumann(s: &Stencil3, sides: BoundarySides) -> DVec3 {
    youngs_normal(&s.collapsed(sides))
}

/// 某轴一侧半模板的加权和
///
/// 9 个单元，权重按另两轴偏移与轴线的邻接程度：面邻 4、棱邻 2、
/// 角邻 1。
#[inline]
fn half_sum(s: &Stencil3, axis: Axis, dir: i32) -> f64 {
    let mut acc = 0.0;
    for p in -1..=1i32 {
        for q in -1..=1i32 {
            let w = match p * p + q * q {
                0 => 4.0,
                1 => 2.0,
                _ => 1.0,
            };
            let (di, dj, dk) = match axis {
                Axis::X => (dir, p, q),
                Axis::Y => (p, dir, q),
                Axis::Z => (p, q, dir),
            };
            acc += w * s.at(di, dj, dk);
        }
    }
    acc
}

/// 混合 Youngs/中心格式法向
///
/// 构造 4×3 候选矩阵：
/// - 行 0..3: 三个中心差分候选，主轴分量由两个半和的比较取
///   符号（类似迎风的符号规则），其余分量为中心差分斜率；
/// - 行 3: Youngs-CIAM 候选。
///
/// 每行 L1 归一化后，先在三个中心候选中取主对角分量绝对值最大
/// 者（比较顺序：行 0 → 行 1 → 行 2），再与 Youngs 候选对比：
/// 当选中的中心候选主对角分量超过 Youngs 候选的最大分量、且后者
/// 非零时，改用 Youngs 候选。该比较顺序与判据照搬参考实现，
/// 不得改动。
pub fn mixed_youngs_central_normal(s: &Stencil3) -> DVec3 {
    let mut m = [[0.0f64; 3]; 4];

    // 候选 0: 平面写作 sgn(mx)·X = my·Y + mz·Z + alpha
    let m1 = s.at(-1, 0, -1) + s.at(-1, 0, 1) + s.at(-1, -1, 0) + s.at(-1, 1, 0) + s.at(-1, 0, 0);
    let m2 = s.at(1, 0, -1) + s.at(1, 0, 1) + s.at(1, -1, 0) + s.at(1, 1, 0) + s.at(1, 0, 0);
    m[0][0] = if m1 > m2 { 1.0 } else { -1.0 };
    m[0][1] = 0.5
        * ((s.at(-1, -1, 0) + s.at(1, -1, 0) + s.at(0, -1, 0))
            - (s.at(-1, 1, 0) + s.at(1, 1, 0) + s.at(0, 1, 0)));
    m[0][2] = 0.5
        * ((s.at(-1, 0, -1) + s.at(1, 0, -1) + s.at(0, 0, -1))
            - (s.at(-1, 0, 1) + s.at(1, 0, 1) + s.at(0, 0, 1)));

    // 候选 1: 平面写作 sgn(my)·Y = mx·X + mz·Z + alpha
    m[1][0] = 0.5
        * ((s.at(-1, -1, 0) + s.at(-1, 1, 0) + s.at(-1, 0, 0))
            - (s.at(1, -1, 0) + s.at(1, 1, 0) + s.at(1, 0, 0)));
    let m1 = s.at(0, -1, -1) + s.at(0, -1, 1) + s.at(1, -1, 0) + s.at(-1, -1, 0) + s.at(0, -1, 0);
    let m2 = s.at(0, 1, -1) + s.at(0, 1, 1) + s.at(1, 1, 0) + s.at(-1, 1, 0) + s.at(0, 1, 0);
    m[1][1] = if m1 > m2 { 1.0 } else { -1.0 };
    m[1][2] = 0.5
        * ((s.at(0, -1, -1) + s.at(0, 0, -1) + s.at(0, 1, -1))
            - (s.at(0, -1, 1) + s.at(0, 0, 1) + s.at(0, 1, 1)));

    // 候选 2: 平面写作 sgn(mz)·Z = mx·X + my·Y + alpha
    m[2][0] = 0.5
        * ((s.at(-1, 0, -1) + s.at(-1, 0, 1) + s.at(-1, 0, 0))
            - (s.at(1, 0, -1) + s.at(1, 0, 1) + s.at(1, 0, 0)));
    m[2][1] = 0.5
        * ((s.at(0, -1, -1) + s.at(0, -1, 1) + s.at(0, -1, 0))
            - (s.at(0, 1, -1) + s.at(0, 1, 1) + s.at(0, 1, 0)));
    let m1 = s.at(-1, 0, -1) + s.at(1, 0, -1) + s.at(0, -1, -1) + s.at(0, 1, -1) + s.at(0, 0, -1);
    let m2 = s.at(-1, 0, 1) + s.at(1, 0, 1) + s.at(0, -1, 1) + s.at(0, 1, 1) + s.at(0, 0, 1);
    m[2][2] = if m1 > m2 { 1.0 } else { -1.0 };

    // 每个中心候选 L1 归一化（主对角为 ±1，范数不会为零）
    for row in m.iter_mut().take(3) {
        let t0 = row[0].abs() + row[1].abs() + row[2].abs();
        row[0] /= t0;
        row[1] /= t0;
        row[2] /= t0;
    }

    // 在三个中心候选中选择主对角分量最大者
    let mut t0 = m[0][0].abs();
    let mut cn = 0;
    let t1 = m[1][1].abs();
    if t1 > t0 {
        t0 = t1;
        cn = 1;
    }
    let t2 = m[2][2].abs();
    if t2 > t0 {
        cn = 2;
    }

    // Youngs-CIAM 候选；孤立单湿单元的零法向由 1e-20 保护
    let y = youngs_normal(s);
    let t0 = y.x.abs() + y.y.abs() + y.z.abs() + 1e-20;
    m[3][0] = y.x / t0;
    m[3][1] = y.y / t0;
    m[3][2] = y.z / t0;

    // 在选中的中心候选与 Youngs 候选之间抉择
    let mut t0 = m[3][0].abs();
    let t1 = m[3][1].abs();
    if t1 > t0 {
        t0 = t1;
    }
    let t2 = m[3][2].abs();
    if t2 > t0 {
        t0 = t2;
    }

    // t0 > 0 条件保证选择的法向模长非零
    if m[cn][cn].abs() > t0 && t0 > 0.0 {
        cn = 3;
    }

    DVec3::new(m[cn][0], m[cn][1], m[cn][2])
}

// ============================================================
// 测试
// ============================================================
