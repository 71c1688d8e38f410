// tests/plic_properties.rs

//! PLIC 几何核的性质验证
//!
//! # 测试覆盖
//!
//! - 截距/切割体积的双向往返（广撒点采样）
//! - 镜像规则的互补对称性
//! - 文献给定的具体场景
//! - 平面拟合闭环（拟合平面还原单元分数）
//! - 界面带判定
//! - 水平集转换端点

use pf_grid::{BoundarySides, CellField, Stencil3};
use pf_multiphase::{
    cut_volume, fit_plane, interface_band, levelset_to_vof, volume_intercept,
};

// ============================================================================
// 测试辅助函数
// ============================================================================

/// 确定性伪随机的单位 L1 法向采样
fn pseudo_random_normals(count: usize) -> Vec<(f64, f64, f64)> {
    let mut normals = Vec::with_capacity(count);
    for n in 0..count {
        let t = n as f64;
        let a = (t * 0.7).sin().abs() + 1e-3;
        let b = (t * 1.3).cos().abs() + 1e-3;
        let c = (t * 2.1).sin().abs() + 1e-3;
        let l1 = a + b + c;
        normals.push((a / l1, b / l1, c / l1));
    }
    normals
}

// ============================================================================
// 往返与对称性
// ============================================================================

#[test]
fn test_roundtrip_sampled_normals() {
    // volume_intercept(cut_volume(alpha)) == alpha, 容差 1e-10
    let mut worst: f64 = 0.0;
    for (m1, m2, m3) in pseudo_random_normals(60) {
        for n in 1..50 {
            let alpha0 = n as f64 / 50.0;
            let vol = cut_volume(m1, m2, m3, alpha0, 0.0, 1.0);
            let alpha = volume_intercept(m1, m2, m3, vol);
            let err = (alpha - alpha0).abs();
            worst = worst.max(err);
            assert!(
                err < 1e-10,
                "往返失败: normal=({m1:.4},{m2:.4},{m3:.4}) alpha0={alpha0} err={err:.2e}"
            );
        }
    }
    println!("往返最大误差: {worst:.2e}");
}

#[test]
fn test_inverse_roundtrip_sampled_fractions() {
    // cut_volume(volume_intercept(vol)) == vol
    for (m1, m2, m3) in pseudo_random_normals(60) {
        for n in 1..50 {
            let vol0 = n as f64 / 50.0;
            let alpha = volume_intercept(m1, m2, m3, vol0);
            let vol = cut_volume(m1, m2, m3, alpha, 0.0, 1.0);
            assert!(
                (vol - vol0).abs() < 1e-10,
                "逆向往返失败: normal=({m1:.4},{m2:.4},{m3:.4}) vol0={vol0}"
            );
        }
    }
}

#[test]
fn test_mirror_complement_symmetry() {
    // 互补分数经镜像规则满足 cut(1-volF) == 1 - cut(volF)
    for (m1, m2, m3) in pseudo_random_normals(30) {
        for n in 1..20 {
            let vol = n as f64 / 20.0;
            let alpha = volume_intercept(m1, m2, m3, vol);
            let alpha_c = volume_intercept(m1, m2, m3, 1.0 - vol);

            assert!(
                (alpha_c - (1.0 - alpha)).abs() < 1e-12,
                "截距镜像失败: vol={vol}"
            );

            let v = cut_volume(m1, m2, m3, alpha, 0.0, 1.0);
            let v_c = cut_volume(m1, m2, m3, alpha_c, 0.0, 1.0);
            assert!(
                (v_c - (1.0 - v)).abs() < 1e-12,
                "切割体积镜像失败: vol={vol} v={v} v_c={v_c}"
            );
        }
    }
}

// ============================================================================
// 具体场景
// ============================================================================

#[test]
fn test_symmetric_normal_half_volume() {
    // 法向 (1/3,1/3,1/3)、分数 0.5 → 对称平面过中心
    let alpha = volume_intercept(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 0.5);
    assert!((alpha - 0.5).abs() < 1e-14, "alpha = {alpha}");
}

#[test]
fn test_single_axis_normal_linear() {
    // 法向 (1,0,0)：双零分量退化为线性插值
    let alpha = volume_intercept(1.0, 0.0, 0.0, 0.3);
    assert!((alpha - 0.3).abs() < 1e-14, "alpha = {alpha}");
}

#[test]
fn test_fit_plane_closure() {
    // 拟合平面的全立方体切割体积还原单元分数
    let stencils = [
        Stencil3::from_fn(|di, _, _| (0.5 - 0.5 * di as f64).clamp(0.0, 1.0)),
        Stencil3::from_fn(|di, dj, dk| {
            (0.35 - 0.2 * di as f64 + 0.15 * dj as f64 - 0.1 * dk as f64).clamp(0.0, 1.0)
        }),
        Stencil3::from_fn(|di, dj, dk| {
            (0.65 + (di - dj + 2 * dk) as f64 * 0.08).clamp(0.0, 1.0)
        }),
    ];
    for s in &stencils {
        let fit = fit_plane(s);
        let l1 = fit.normal.x.abs() + fit.normal.y.abs() + fit.normal.z.abs();
        assert!((l1 - 1.0).abs() < 1e-12, "法向未归一: {l1}");

        let v = cut_volume(
            fit.normal.x,
            fit.normal.y,
            fit.normal.z,
            fit.alpha,
            0.0,
            1.0,
        );
        assert!(
            (v - s.center()).abs() < 1e-10,
            "闭环失败: v={v} center={}",
            s.center()
        );
    }
}

// ============================================================================
// 界面带
// ============================================================================

#[test]
fn test_band_uniform_stencil_not_flagged() {
    // 纯相均匀邻域：不需要重构
    for &value in &[0.0, 1.0] {
        let mut f = CellField::new(7, 7, 7, 3).unwrap();
        f.fill(value);
        for n_band in 1..=3 {
            assert!(
                !interface_band(&f, 3, 3, 3, n_band, 1e-12),
                "value={value} n_band={n_band}"
            );
        }
    }
}

#[test]
fn test_band_detects_interface_within_width() {
    let mut f = CellField::new(7, 7, 7, 3).unwrap();
    f.set(5, 3, 3, 1.0);

    // 距离 2 的扰动：半宽 1 看不到，半宽 2 能看到
    assert!(!interface_band(&f, 3, 3, 3, 1, 1e-12));
    assert!(interface_band(&f, 3, 3, 3, 2, 1e-12));
    assert!(interface_band(&f, 3, 3, 3, 3, 1e-12));
}

// ============================================================================
// 水平集端点
// ============================================================================

#[test]
fn test_levelset_band_endpoints() {
    let eps = 1.0;
    let planar = |phi0: f64| Stencil3::from_fn(move |di, _, _| phi0 + di as f64);

    // 第二相深处精确 0，第一相深处精确 1
    assert_eq!(levelset_to_vof(&planar(-2.0 * eps), BoundarySides::INTERIOR, eps), 0.0);
    assert_eq!(levelset_to_vof(&planar(2.0 * eps), BoundarySides::INTERIOR, eps), 1.0);

    // 界面上半满
    let v = levelset_to_vof(&planar(0.0), BoundarySides::INTERIOR, eps);
    assert!((v - 0.5).abs() < 1e-12, "v = {v}");
}
