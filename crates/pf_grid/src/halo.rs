// crates/pf_grid/src/halo.rs

//! 幽灵层填充
//!
//! 幽灵单元是统一内部与边界数值格式的手段：填充后，法向模板
//! 与扫掠的邻居访问无需区分单元位置，同一个内核覆盖全域。
//!
//! 填充规则按域侧面类型：
//! - 周期：从对侧内部单元回卷复制
//! - 零梯度（固壁/诺伊曼）：镜像最近的内部单元
//!
//! 按 x → y → z 逐轴填充；后填充的轴遍历前序轴的完整扩展范围，
//! 棱与角上的幽灵单元由此获得有效值。

use crate::field::CellField;
use crate::grid::{Axis, BoundaryKind, CartesianGrid, Side};

/// 填充场的全部幽灵层
///
/// 对应单进程情形下的 halo 交换：每个扫掠相位结束后必须调用，
/// 使相位 k+1 在所有单元上看到相位 k 的更新结果。
pub fn fill_halo(field: &mut CellField, grid: &CartesianGrid) {
    fill_axis(field, grid, Axis::X);
    fill_axis(field, grid, Axis::Y);
    fill_axis(field, grid, Axis::Z);
}

fn fill_axis(field: &mut CellField, grid: &CartesianGrid, axis: Axis) {
    let ng = field.nghost() as isize;
    let n = field.extent(axis) as isize;

    // 已填充轴遍历扩展范围，未填充轴只遍历内部
    let range = |a: Axis| -> (isize, isize) {
        let m = field.extent(a) as isize;
        if a.index() < axis.index() {
            (-ng, m + ng)
        } else {
            (0, m)
        }
    };

    let (oa, ob) = (axis.next(), axis.next().next());
    let (a_lo, a_hi) = range(oa);
    let (b_lo, b_hi) = range(ob);

    let lo_kind = grid.boundary(axis, Side::Lo);
    let hi_kind = grid.boundary(axis, Side::Hi);

    for b in b_lo..b_hi {
        for a in a_lo..a_hi {
            for g in 1..=ng {
                // 低侧幽灵 -g
                let src = match lo_kind {
                    BoundaryKind::Periodic => n - g,
                    BoundaryKind::Neumann => 0,
                };
                let (si, sj, sk) = compose(axis, src, oa, a, ob, b);
                let (gi, gj, gk) = compose(axis, -g, oa, a, ob, b);
                let value = field.at(si, sj, sk);
                field.set(gi, gj, gk, value);

                // 高侧幽灵 n-1+g
                let src = match hi_kind {
                    BoundaryKind::Periodic => g - 1,
                    BoundaryKind::Neumann => n - 1,
                };
                let (si, sj, sk) = compose(axis, src, oa, a, ob, b);
                let (gi, gj, gk) = compose(axis, n - 1 + g, oa, a, ob, b);
                let value = field.at(si, sj, sk);
                field.set(gi, gj, gk, value);
            }
        }
    }
}

/// 将 (轴向坐标, 其余两轴坐标) 组装为 (i, j, k)
#[inline]
fn compose(axis: Axis, c: isize, oa: Axis, a: isize, ob: Axis, b: isize) -> (isize, isize, isize) {
    let mut out = [0isize; 3];
    out[axis.index()] = c;
    out[oa.index()] = a;
    out[ob.index()] = b;
    (out[0], out[1], out[2])
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_field(nx: usize, ny: usize, nz: usize) -> CellField {
        let mut f = CellField::new(nx, ny, nz, 3).unwrap();
        for idx in 0..f.n_interior() {
            let (i, j, k) = f.interior_cell(idx);
            f.set(i, j, k, (i + 10 * j + 100 * k) as f64);
        }
        f
    }

    #[test]
    fn test_periodic_wrap() {
        let grid = CartesianGrid::new(4, 4, 4, 1.0, 1.0, 1.0).unwrap();
        let mut f = linear_field(4, 4, 4);
        fill_halo(&mut f, &grid);

        // 低侧幽灵来自高侧内部
        assert_eq!(f.at(-1, 0, 0), f.at(3, 0, 0));
        assert_eq!(f.at(-3, 2, 1), f.at(1, 2, 1));
        // 高侧幽灵来自低侧内部
        assert_eq!(f.at(4, 0, 0), f.at(0, 0, 0));
        assert_eq!(f.at(6, 2, 1), f.at(2, 2, 1));
        // y、z 方向同理
        assert_eq!(f.at(1, -2, 3), f.at(1, 2, 3));
        assert_eq!(f.at(1, 2, 5), f.at(1, 2, 1));
    }

    #[test]
    fn test_neumann_mirror() {
        let grid = CartesianGrid::new(4, 4, 4, 1.0, 1.0, 1.0)
            .unwrap()
            .with_all_neumann();
        let mut f = linear_field(4, 4, 4);
        fill_halo(&mut f, &grid);

        // 零梯度：所有幽灵层等于最近的内部单元
        assert_eq!(f.at(-1, 2, 2), f.at(0, 2, 2));
        assert_eq!(f.at(-3, 2, 2), f.at(0, 2, 2));
        assert_eq!(f.at(4, 2, 2), f.at(3, 2, 2));
        assert_eq!(f.at(6, 2, 2), f.at(3, 2, 2));
    }

    #[test]
    fn test_corner_ghosts_valid() {
        let grid = CartesianGrid::new(4, 4, 4, 1.0, 1.0, 1.0).unwrap();
        let mut f = linear_field(4, 4, 4);
        fill_halo(&mut f, &grid);

        // 角幽灵由逐轴填充获得有效值（全周期：三向回卷）
        assert_eq!(f.at(-1, -1, -1), f.at(3, 3, 3));
        assert_eq!(f.at(4, 4, 4), f.at(0, 0, 0));
        assert_eq!(f.at(-2, 5, -1), f.at(2, 1, 3));
    }

    #[test]
    fn test_mixed_boundaries() {
        let grid = CartesianGrid::new(4, 4, 4, 1.0, 1.0, 1.0)
            .unwrap()
            .with_boundary(Axis::Z, BoundaryKind::Neumann, BoundaryKind::Neumann)
            .unwrap();
        let mut f = linear_field(4, 4, 4);
        fill_halo(&mut f, &grid);

        // x 周期，z 零梯度
        assert_eq!(f.at(-1, 1, 1), f.at(3, 1, 1));
        assert_eq!(f.at(1, 1, -2), f.at(1, 1, 0));
        assert_eq!(f.at(1, 1, 6), f.at(1, 1, 3));
    }
}
