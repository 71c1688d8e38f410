// crates/pf_grid/src/grid.rs

//! 固定笛卡尔网格
//!
//! 本模块提供均匀笛卡尔网格的几何描述：
//! - [`Axis`]: 坐标轴枚举，带循环后继（方向分裂扫掠使用）
//! - [`BoundaryKind`]: 每个域侧面的边界类型
//! - [`CartesianGrid`]: 网格尺寸、间距与边界配置
//!
//! 网格本身不持有任何场数据；场的存储见 [`crate::field`]。
//! 网格生成、AMR 层级与分布式分解均在本核心范围之外，
//! 这里只描述单块均匀网格。

use pf_foundation::{ensure, PfError, PfResult};
use serde::{Deserialize, Serialize};

// ============================================================
// 坐标轴
// ============================================================

/// 坐标轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// x 轴
    X,
    /// y 轴
    Y,
    /// z 轴
    Z,
}

impl Axis {
    /// 全部轴，按 x, y, z 顺序
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// 轴序号 (x=0, y=1, z=2)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// 循环后继 (x→y→z→x)
    #[inline]
    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// 轴名称
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// 域侧面 (低侧/高侧)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// 低坐标侧
    Lo,
    /// 高坐标侧
    Hi,
}

// ============================================================
// 边界类型
// ============================================================

/// 域边界类型
///
/// 决定幽灵层填充方式与边界处的法向模板变体。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// 周期边界：幽灵层从对侧内部单元回卷复制
    #[default]
    Periodic,

    /// 零梯度边界（固壁/诺伊曼）：幽灵层镜像最近的内部单元
    Neumann,
}

/// 单元相对域边界的接触标记
///
/// 每个分量取值 -1（贴低侧非周期边界）、+1（贴高侧）、0（内部）。
/// 用于边界处的法向模板塌缩（零梯度镜像），见
/// [`crate::stencil::Stencil3::collapsed`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundarySides {
    /// x 方向标记
    pub x: i8,
    /// y 方向标记
    pub y: i8,
    /// z 方向标记
    pub z: i8,
}

impl BoundarySides {
    /// 内部单元（无边界接触）
    pub const INTERIOR: BoundarySides = BoundarySides { x: 0, y: 0, z: 0 };

    /// 是否完全处于内部
    #[inline]
    pub fn is_interior(self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }
}

// ============================================================
// 笛卡尔网格
// ============================================================

/// 均匀笛卡尔网格
///
/// 描述 `nx × ny × nz` 个内部单元、各向间距与六个域侧面的边界类型。
///
/// # 示例
///
/// ```
/// use pf_grid::{Axis, BoundaryKind, CartesianGrid};
///
/// let grid = CartesianGrid::new(16, 16, 16, 1.0, 1.0, 1.0).unwrap();
/// assert_eq!(grid.n_cells(), 16 * 16 * 16);
/// assert!(grid.is_periodic(Axis::X));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartesianGrid {
    nx: usize,
    ny: usize,
    nz: usize,
    dx: f64,
    dy: f64,
    dz: f64,
    bc_lo: [BoundaryKind; 3],
    bc_hi: [BoundaryKind; 3],
}

impl CartesianGrid {
    /// 创建全周期网格
    ///
    /// # 参数
    /// - `nx`, `ny`, `nz`: 各向内部单元数
    /// - `dx`, `dy`, `dz`: 各向单元间距
    pub fn new(nx: usize, ny: usize, nz: usize, dx: f64, dy: f64, dz: f64) -> PfResult<Self> {
        ensure!(
            nx > 0 && ny > 0 && nz > 0,
            PfError::invalid_grid(format!("单元数必须为正: ({nx}, {ny}, {nz})"))
        );
        ensure!(
            dx > 0.0 && dy > 0.0 && dz > 0.0,
            PfError::invalid_grid(format!("网格间距必须为正: ({dx}, {dy}, {dz})"))
        );

        Ok(Self {
            nx,
            ny,
            nz,
            dx,
            dy,
            dz,
            bc_lo: [BoundaryKind::Periodic; 3],
            bc_hi: [BoundaryKind::Periodic; 3],
        })
    }

    /// 设置某一轴两侧的边界类型
    ///
    /// 周期边界必须成对出现：单侧周期没有几何意义。
    pub fn with_boundary(mut self, axis: Axis, lo: BoundaryKind, hi: BoundaryKind) -> PfResult<Self> {
        ensure!(
            (lo == BoundaryKind::Periodic) == (hi == BoundaryKind::Periodic),
            PfError::invalid_grid(format!("{} 轴周期边界必须两侧成对", axis.name()))
        );
        self.bc_lo[axis.index()] = lo;
        self.bc_hi[axis.index()] = hi;
        Ok(self)
    }

    /// 设置全部六个侧面为零梯度边界
    pub fn with_all_neumann(mut self) -> Self {
        self.bc_lo = [BoundaryKind::Neumann; 3];
        self.bc_hi = [BoundaryKind::Neumann; 3];
        self
    }

    /// 某轴的内部单元数
    #[inline]
    pub fn extent(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.nx,
            Axis::Y => self.ny,
            Axis::Z => self.nz,
        }
    }

    /// 某轴的单元间距
    #[inline]
    pub fn spacing(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.dx,
            Axis::Y => self.dy,
            Axis::Z => self.dz,
        }
    }

    /// x 方向单元数
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// y 方向单元数
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// z 方向单元数
    #[inline]
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// 内部单元总数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// 单元体积
    #[inline]
    pub fn cell_volume(&self) -> f64 {
        self.dx * self.dy * self.dz
    }

    /// 某轴某侧的边界类型
    #[inline]
    pub fn boundary(&self, axis: Axis, side: Side) -> BoundaryKind {
        match side {
            Side::Lo => self.bc_lo[axis.index()],
            Side::Hi => self.bc_hi[axis.index()],
        }
    }

    /// 某轴是否为周期边界
    #[inline]
    pub fn is_periodic(&self, axis: Axis) -> bool {
        self.bc_lo[axis.index()] == BoundaryKind::Periodic
    }

    /// 内部单元的边界接触标记
    ///
    /// 仅非周期边界产生非零标记；周期方向的幽灵层总是有效数据，
    /// 模板无需塌缩。
    pub fn boundary_sides(&self, i: isize, j: isize, k: isize) -> BoundarySides {
        let flag = |axis: Axis, c: isize| -> i8 {
            if self.is_periodic(axis) {
                return 0;
            }
            if c == 0 {
                -1
            } else if c == self.extent(axis) as isize - 1 {
                1
            } else {
                0
            }
        };
        BoundarySides {
            x: flag(Axis::X, i),
            y: flag(Axis::Y, j),
            z: flag(Axis::Z, k),
        }
    }
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_cycle() {
        assert_eq!(Axis::X.next(), Axis::Y);
        assert_eq!(Axis::Y.next(), Axis::Z);
        assert_eq!(Axis::Z.next(), Axis::X);
        assert_eq!(Axis::ALL[1], Axis::Y);
    }

    #[test]
    fn test_grid_construction() {
        let grid = CartesianGrid::new(8, 4, 2, 0.5, 1.0, 2.0).unwrap();
        assert_eq!(grid.n_cells(), 64);
        assert_eq!(grid.extent(Axis::Y), 4);
        assert_eq!(grid.spacing(Axis::Z), 2.0);
        assert_eq!(grid.cell_volume(), 1.0);
    }

    #[test]
    fn test_invalid_grid_rejected() {
        assert!(CartesianGrid::new(0, 4, 4, 1.0, 1.0, 1.0).is_err());
        assert!(CartesianGrid::new(4, 4, 4, -1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_boundary_pairing() {
        let grid = CartesianGrid::new(4, 4, 4, 1.0, 1.0, 1.0).unwrap();
        // 单侧周期被拒绝
        assert!(grid
            .clone()
            .with_boundary(Axis::X, BoundaryKind::Periodic, BoundaryKind::Neumann)
            .is_err());
        // 成对设置通过
        let grid = grid
            .with_boundary(Axis::X, BoundaryKind::Neumann, BoundaryKind::Neumann)
            .unwrap();
        assert!(!grid.is_periodic(Axis::X));
        assert!(grid.is_periodic(Axis::Y));
    }

    #[test]
    fn test_boundary_sides() {
        let grid = CartesianGrid::new(4, 4, 4, 1.0, 1.0, 1.0)
            .unwrap()
            .with_all_neumann();

        assert_eq!(grid.boundary_sides(0, 1, 1).x, -1);
        assert_eq!(grid.boundary_sides(3, 1, 1).x, 1);
        assert!(grid.boundary_sides(1, 2, 1).is_interior());

        // 周期方向不产生标记
        let periodic = CartesianGrid::new(4, 4, 4, 1.0, 1.0, 1.0).unwrap();
        assert!(periodic.boundary_sides(0, 0, 0).is_interior());
    }
}
