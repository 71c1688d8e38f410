// crates/pf_multiphase/src/plic.rs

//! PLIC 平面求解器
//!
//! 单位立方体内平面切割的解析正反问题 (Scardovelli & Zaleski,
//! JCP 2000；多项式分支改编自 Kawano, Computers & Fluids 2016)：
//!
//! - [`volume_intercept`]: 给定单位 L1 法向与目标体积分数，求
//!   平面截距 alpha，使 `m·x = alpha` 切下的体积等于该分数；
//! - [`cut_volume`]: 给定平面方程与第一轴子区间 `[r0, r0+dr0]`，
//!   求子长方体内的切割体积分数。
//!
//! 两者在整个单位立方体上互为近似逆：
//! `volume_intercept(m, cut_volume(m, a, 0, 1)) ≈ a`。
//!
//! 数值细节：三次项分母用机器精度下界保护（法向分量消失时），
//! `acos` 的自变量用分母加 1e-20 防止浮点舍入越过 ±1。

/// 平面截距求解
///
/// 求 alpha 使 `m1·x1 + m2·x2 + m3·x3 = alpha` 在单位立方体内
/// 切下体积 `vol_frac`，输入要求 `m1+m2+m3 = 1` 且各分量非负。
///
/// 按排序后的法向分量把 `[0, 0.5]` 划分为若干解析分段（立方根、
/// 二次、三角、线性、对称三角），`vol_frac > 0.5` 时按对称性取
/// `alpha = 1 - alpha`。
pub fn volume_intercept(b1: f64, b2: f64, b3: f64, vol_frac: f64) -> f64 {
    let tiny = f64::EPSILON;

    // 排序: m1 <= m2 <= m3
    let mut m1 = b1.min(b2);
    let mut m3 = b1.max(b2);
    let mut m2 = b3;
    if m2 < m1 {
        std::mem::swap(&mut m1, &mut m2);
    } else if m2 > m3 {
        std::mem::swap(&mut m2, &mut m3);
    }

    // 分段端点: V1 < V2 < V3
    let m12 = m1 + m2;
    let pr = (6.0 * m1 * m2 * m3).max(tiny);
    let v1 = m1 * m1 * m1 / pr;
    let v2 = v1 + 0.5 * (m2 - m1) / m3;

    let (mm, v3);
    if m3 < m12 {
        mm = m3;
        v3 = (m3 * m3 * (3.0 * m12 - m3) + m1 * m1 * (m1 - 3.0 * m3) + m2 * m2 * (m2 - 3.0 * m3))
            / pr;
    } else {
        mm = m12;
        v3 = 0.5 * mm / m3;
    }

    // 限制 ch 到 [0, 0.5]
    let ch = vol_frac.min(1.0 - vol_frac);

    let mut alpha;
    if ch < v1 {
        // 三棱锥段
        alpha = (pr * ch).cbrt();
    } else if ch < v2 {
        // 二次段
        alpha = 0.5 * (m1 + (m1 * m1 + 8.0 * m2 * m3 * (ch - v1)).sqrt());
    } else if ch < v3 {
        // 三角段
        let p = 2.0 * m1 * m2;
        let q = 1.5 * m1 * m2 * (m12 - 2.0 * m3 * ch);
        let p12 = p.sqrt();
        let teta = (q / (p * p12 + 1e-20)).acos() / 3.0;
        let cs = teta.cos();
        alpha = p12 * ((3.0 * (1.0 - cs * cs)).sqrt() - cs) + m12;
    } else if m12 < m3 {
        // 线性段
        alpha = m3 * ch + 0.5 * mm;
    } else {
        // 对称三角段
        let p = m1 * (m2 + m3) + m2 * m3 - 0.25;
        let q = 1.5 * m1 * m2 * m3 * (0.5 - ch);
        let p12 = p.sqrt();
        let teta = (q / (p * p12 + 1e-20)).acos() / 3.0;
        let cs = teta.cos();
        alpha = p12 * ((3.0 * (1.0 - cs * cs)).sqrt() - cs) + 0.5;
    }

    if vol_frac > 0.5 {
        alpha = 1.0 - alpha;
    }

    alpha
}

/// 子长方体切割体积
///
/// 给定平面 `m1·x1 + m2·x2 + m3·x3 = alpha`（系数允许为负），求
/// 第一轴子区间 `[r0, r0+dr0]`、其余两轴全幅的子长方体内的切割
/// 体积分数（按子长方体体积归一）。
///
/// 步骤：(1) 原点沿第一轴移到 r0；(2) 负系数方向反射几何并累加
/// 修正项；(3) 重新归一化回单位立方体问题；(4) 排序系数后按五段
/// 多项式求体积；(5) 末尾按 **排序前** 的钳位 alpha 是否超过 0.5
/// 取镜像。最后一步与 [`volume_intercept`] 用 `vol_frac` 判镜像
/// 的方式不对称，系参考实现原样行为，保持不变。
pub fn cut_volume(m1: f64, m2: f64, m3: f64, alpha: f64, r0: f64, dr0: f64) -> f64 {
    let tiny = f64::EPSILON;

    // 原点移到 r0
    let mut al = alpha - m1 * r0;

    // 负系数方向反射
    al += (-m1 * dr0).max(0.0) + (-m2).max(0.0) + (-m3).max(0.0);

    // 归一化: m1·y1 + m2·y2 + m3·y3 = alh, 0 <= m1 <= m2 <= m3,
    // 问题化归回单位立方体
    let tmp = m1.abs() * dr0 + m2.abs() + m3.abs();
    let n1 = m1.abs() / tmp;
    let n2 = m2.abs() / tmp;
    let n3 = m3.abs() / tmp;
    let al = (al / tmp).clamp(0.0, 1.0);
    let al0 = al.min(1.0 - al); // 限制到 0 < alh < 1/2

    // 排序系数: b1 <= b2 <= b3
    let mut b1 = (n1 * dr0).min(n2);
    let mut b3 = (n1 * dr0).max(n2);
    let mut b2 = n3;
    if b2 < b1 {
        std::mem::swap(&mut b1, &mut b2);
    } else if b2 > b3 {
        std::mem::swap(&mut b2, &mut b3);
    }
    let b12 = b1 + b2;

    let a = al0;
    let mut v = 0.0;
    if a > 0.0 {
        if a < b1 {
            v = a * a * a / (6.0 * b1 * b2 * b3);
        } else if a < b2 {
            v = a * (a - b1) / (2.0 * b2 * b3) + b1 * b1 / (6.0 * b2 * b3 + tiny);
        } else if a < b12.min(b3) {
            v = (a * a * (3.0 * b12 - a) + b1 * b1 * (b1 - 3.0 * a) + b2 * b2 * (b2 - 3.0 * a))
                / (6.0 * b1 * b2 * b3);
        } else if b3 < b12 {
            v = (a * a * (3.0 - 2.0 * a)
                + b1 * b1 * (b1 - 3.0 * a)
                + b2 * b2 * (b2 - 3.0 * a)
                + b3 * b3 * (b3 - 3.0 * a))
                / (6.0 * b1 * b2 * b3);
        } else {
            v = (a - 0.5 * b12) / b3;
        }
    }

    // 镜像判据使用排序前的钳位 al
    if al <= 0.5 {
        v
    } else {
        1.0 - v
    }
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    /// 一组覆盖各分段的单位 L1 法向
    fn sample_normals() -> Vec<(f64, f64, f64)> {
        vec![
            (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.5, 0.5, 0.0),
            (0.7, 0.2, 0.1),
            (0.05, 0.15, 0.8),
            (0.9, 0.05, 0.05),
            (0.02, 0.49, 0.49),
            (0.25, 0.35, 0.4),
        ]
    }

    #[test]
    fn test_symmetric_plane_through_center() {
        // 法向 (1/3,1/3,1/3)、体积分数 0.5 → 平面过中心, alpha = 0.5
        let alpha = volume_intercept(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 0.5);
        assert!(approx_eq(alpha, 0.5, 1e-14), "alpha = {alpha}");
    }

    #[test]
    fn test_axis_aligned_cut_is_linear() {
        // 两分量为零时退化为线性插值
        let alpha = volume_intercept(1.0, 0.0, 0.0, 0.3);
        assert!(approx_eq(alpha, 0.3, 1e-14), "alpha = {alpha}");

        let alpha = volume_intercept(0.0, 0.0, 1.0, 0.85);
        assert!(approx_eq(alpha, 0.85, 1e-14), "alpha = {alpha}");
    }

    #[test]
    fn test_empty_and_full_cells() {
        for &(m1, m2, m3) in &sample_normals() {
            let a0 = volume_intercept(m1, m2, m3, 0.0);
            let a1 = volume_intercept(m1, m2, m3, 1.0);
            assert!(approx_eq(a0, 0.0, 1e-12), "空单元 alpha = {a0}");
            assert!(approx_eq(a1, 1.0, 1e-12), "满单元 alpha = {a1}");
        }
    }

    #[test]
    fn test_cut_volume_full_cube_roundtrip() {
        // volume_intercept 与 cut_volume 在整个立方体上互逆
        for &(m1, m2, m3) in &sample_normals() {
            for n in 1..20 {
                let vol = n as f64 / 20.0;
                let alpha = volume_intercept(m1, m2, m3, vol);
                let back = cut_volume(m1, m2, m3, alpha, 0.0, 1.0);
                assert!(
                    approx_eq(back, vol, 1e-10),
                    "normal=({m1},{m2},{m3}) vol={vol} back={back}"
                );
            }
        }
    }

    #[test]
    fn test_alpha_roundtrip() {
        // volume_intercept(cut_volume(alpha)) == alpha, 精度 1e-10
        for &(m1, m2, m3) in &sample_normals() {
            for n in 1..40 {
                let alpha0 = n as f64 / 40.0;
                let vol = cut_volume(m1, m2, m3, alpha0, 0.0, 1.0);
                let alpha = volume_intercept(m1, m2, m3, vol);
                assert!(
                    approx_eq(alpha, alpha0, 1e-10),
                    "normal=({m1},{m2},{m3}) alpha0={alpha0} alpha={alpha}"
                );
            }
        }
    }

    #[test]
    fn test_complement_symmetry() {
        // alpha(1-volF) = 1 - alpha(volF), 且切割体积满足互补对称
        for &(m1, m2, m3) in &sample_normals() {
            for n in 1..20 {
                let vol = n as f64 / 20.0;
                let alpha = volume_intercept(m1, m2, m3, vol);
                let alpha_c = volume_intercept(m1, m2, m3, 1.0 - vol);
                assert!(
                    approx_eq(alpha_c, 1.0 - alpha, 1e-12),
                    "normal=({m1},{m2},{m3}) vol={vol}"
                );

                let v = cut_volume(m1, m2, m3, alpha, 0.0, 1.0);
                let v_c = cut_volume(m1, m2, m3, 1.0 - alpha, 0.0, 1.0);
                assert!(
                    approx_eq(v_c, 1.0 - v, 1e-12),
                    "normal=({m1},{m2},{m3}) vol={vol} v={v} v_c={v_c}"
                );
            }
        }
    }

    #[test]
    fn test_cut_volume_subinterval_additivity() {
        // 子区间切割体积按区间宽度加权后应与整体一致
        let (m1, m2, m3) = (0.4, 0.35, 0.25);
        let alpha = volume_intercept(m1, m2, m3, 0.37);

        let whole = cut_volume(m1, m2, m3, alpha, 0.0, 1.0);
        let left = cut_volume(m1, m2, m3, alpha, 0.0, 0.3);
        let right = cut_volume(m1, m2, m3, alpha, 0.3, 0.7);
        assert!(
            approx_eq(0.3 * left + 0.7 * right, whole, 1e-12),
            "left={left} right={right} whole={whole}"
        );
    }

    #[test]
    fn test_cut_volume_negative_coefficients() {
        // 负系数经反射后结果在 [0,1] 且与镜像几何一致
        let v_pos = cut_volume(0.5, 0.3, 0.2, 0.4, 0.0, 1.0);
        // x1 → 1-x1 镜像: m1 取负, alpha 平移 m1
        let v_neg = cut_volume(-0.5, 0.3, 0.2, 0.4 - 0.5, 0.0, 1.0);
        assert!(approx_eq(v_pos, v_neg, 1e-12), "v_pos={v_pos} v_neg={v_neg}");
    }

    #[test]
    fn test_cut_volume_bounds() {
        for &(m1, m2, m3) in &sample_normals() {
            for n in 0..=20 {
                let alpha = n as f64 / 20.0;
                for &(r0, dr0) in &[(0.0, 1.0), (0.2, 0.5), (0.75, 0.25), (0.0, 0.1)] {
                    let v = cut_volume(m1, m2, m3, alpha, r0, dr0);
                    assert!(
                        (0.0..=1.0).contains(&v),
                        "v={v} normal=({m1},{m2},{m3}) alpha={alpha} r0={r0} dr0={dr0}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_degenerate_normal_no_nan() {
        // 全零法向在 epsilon 保护下仍返回有限值
        let alpha = volume_intercept(0.0, 0.0, 1.0, 0.5);
        assert!(alpha.is_finite());
        let v = cut_volume(1.0, 0.0, 0.0, 0.5, 0.0, 1.0);
        assert!(v.is_finite());
    }
}
