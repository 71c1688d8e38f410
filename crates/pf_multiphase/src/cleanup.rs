// crates/pf_multiphase/src/cleanup.rs

//! 对流后清理
//!
//! 浮点残差会在纯相区域留下非物理的微小碎片（"碎屑"）：被零
//! 分数邻居包围的孤立亚阈值分数。清理分两类：
//! - 分数低于阈值、六邻居全部低于阈值的孤立湿碎片 → 清零；
//! - 对称情形，分数高于 `1-阈值`、六邻居全部高于 `1-阈值` 的
//!   孤立干空洞 → 置一。
//!
//! 另外，overset 掩码遮蔽的单元可按配置用参考场覆盖——掩码由
//! 外部 chimera 子系统产生并维护，这里只读消费。

use pf_grid::{CellField, MaskField};
use tracing::debug;

/// 六邻居偏移
const NEIGHBORS: [(isize, isize, isize); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// 清除孤立碎屑
///
/// 先收集再改写，扫描阶段不修改场，判定顺序无关。
/// 返回处理的单元数。
pub fn remove_debris(vof: &mut CellField, tol: f64) -> usize {
    let mut zero_out = Vec::new();
    let mut fill_one = Vec::new();

    for idx in 0..vof.n_interior() {
        let (i, j, k) = vof.interior_cell(idx);
        let v = vof.at(i, j, k);

        if v > 0.0 && v < tol {
            let isolated = NEIGHBORS
                .iter()
                .all(|&(di, dj, dk)| vof.at(i + di, j + dj, k + dk) < tol);
            if isolated {
                zero_out.push((i, j, k));
            }
        } else if v < 1.0 && v > 1.0 - tol {
            let isolated = NEIGHBORS
                .iter()
                .all(|&(di, dj, dk)| vof.at(i + di, j + dj, k + dk) > 1.0 - tol);
            if isolated {
                fill_one.push((i, j, k));
            }
        }
    }

    for &(i, j, k) in &zero_out {
        vof.set(i, j, k, 0.0);
    }
    for &(i, j, k) in &fill_one {
        vof.set(i, j, k, 1.0);
    }

    let removed = zero_out.len() + fill_one.len();
    if removed > 0 {
        debug!(removed, "removed isolated vof debris");
    }
    removed
}

/// 覆盖掩码遮蔽单元
///
/// 掩码值 `<= 0` 的单元用参考场的值覆盖。返回覆盖的单元数。
pub fn replace_masked(vof: &mut CellField, mask: &MaskField, reference: &CellField) -> usize {
    let (mx, my, mz) = mask.dims();
    assert_eq!(
        (mx, my, mz),
        (
            vof.extent(pf_grid::Axis::X),
            vof.extent(pf_grid::Axis::Y),
            vof.extent(pf_grid::Axis::Z)
        ),
        "掩码与分数场尺寸不匹配"
    );

    let mut replaced = 0;
    for idx in 0..vof.n_interior() {
        let (i, j, k) = vof.interior_cell(idx);
        if mask.is_masked(i as usize, j as usize, k as usize) {
            vof.set(i, j, k, reference.at(i, j, k));
            replaced += 1;
        }
    }

    if replaced > 0 {
        debug!(replaced, "replaced masked vof cells from reference field");
    }
    replaced
}

// ============================================================
// 测试
// ============================================================
