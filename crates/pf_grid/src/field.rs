// crates/pf_grid/src/field.rs

//! 网格场存储
//!
//! 本模块提供三类平铺 `Vec` 存储的场：
//! - [`CellField`]: 单元中心标量场，带幽灵层，带符号索引
//! - [`FaceField`]: 某一轴的面法向标量场（面速度、面通量）
//! - [`MaskField`]: 单元中心整型掩码场（overset iblank），本核心只读
//!
//! # 幽灵层约定
//!
//! 法向模板访问 ±1，扫掠的邻居访问更远，幽灵层深度至少 3。
//! 深度不足属于编程契约违规，在构造期拦截（运行期不再逐单元检查）。

use crate::grid::{Axis, CartesianGrid};
use pf_foundation::{ensure, PfError, PfResult};
use serde::{Deserialize, Serialize};

/// 幽灵层最小深度
pub const MIN_GHOST: usize = 3;

// ============================================================
// 单元场
// ============================================================

/// 单元中心标量场（带幽灵层）
///
/// 内部单元索引 `0..n`，幽灵单元通过带符号索引 `-nghost..0` 与
/// `n..n+nghost` 访问。存储按 x 最快的行主序平铺。
///
/// # 示例
///
/// ```
/// use pf_grid::CellField;
///
/// let mut f = CellField::new(4, 4, 4, 3).unwrap();
/// f.set(0, 0, 0, 1.0);
/// assert_eq!(f.at(0, 0, 0), 1.0);
/// // 幽灵单元同样可读写
/// f.set(-1, 0, 0, 0.5);
/// assert_eq!(f.at(-1, 0, 0), 0.5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellField {
    nx: usize,
    ny: usize,
    nz: usize,
    nghost: usize,
    data: Vec<f64>,
}

impl CellField {
    /// 创建全零场
    ///
    /// `nghost < 3` 会被拒绝：这是本核心唯一的致命输入错误。
    pub fn new(nx: usize, ny: usize, nz: usize, nghost: usize) -> PfResult<Self> {
        ensure!(
            nx > 0 && ny > 0 && nz > 0,
            PfError::invalid_grid(format!("场尺寸必须为正: ({nx}, {ny}, {nz})"))
        );
        ensure!(
            nghost >= MIN_GHOST,
            PfError::insufficient_ghosts(MIN_GHOST, nghost)
        );

        let len = (nx + 2 * nghost) * (ny + 2 * nghost) * (nz + 2 * nghost);
        Ok(Self {
            nx,
            ny,
            nz,
            nghost,
            data: vec![0.0; len],
        })
    }

    /// 按网格尺寸创建全零场
    pub fn from_grid(grid: &CartesianGrid, nghost: usize) -> PfResult<Self> {
        Self::new(grid.nx(), grid.ny(), grid.nz(), nghost)
    }

    /// 幽灵层深度
    #[inline]
    pub fn nghost(&self) -> usize {
        self.nghost
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

    /// 内部单元总数
    #[inline]
    pub fn n_interior(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    #[inline]
    fn flat(&self, i: isize, j: isize, k: isize) -> usize {
        let ng = self.nghost as isize;
        let sx = (self.nx + 2 * self.nghost) as isize;
        let sy = (self.ny + 2 * self.nghost) as isize;
        debug_assert!(i >= -ng && i < self.nx as isize + ng, "i 越界: {i}");
        debug_assert!(j >= -ng && j < self.ny as isize + ng, "j 越界: {j}");
        debug_assert!(k >= -ng && k < self.nz as isize + ng, "k 越界: {k}");
        (((k + ng) * sy + (j + ng)) * sx + (i + ng)) as usize
    }

    /// 读取单元值（内部或幽灵）
    #[inline]
    pub fn at(&self, i: isize, j: isize, k: isize) -> f64 {
        self.data[self.flat(i, j, k)]
    }

    /// 写入单元值（内部或幽灵）
    #[inline]
    pub fn set(&mut self, i: isize, j: isize, k: isize, value: f64) {
        let idx = self.flat(i, j, k);
        self.data[idx] = value;
    }

    /// 全场填充（含幽灵层）
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// 从同形场复制（含幽灵层）
    pub fn copy_from(&mut self, other: &CellField) {
        assert_eq!(
            (self.nx, self.ny, self.nz, self.nghost),
            (other.nx, other.ny, other.nz, other.nghost),
            "场形状不匹配"
        );
        self.data.copy_from_slice(&other.data);
    }

    /// 线性内部索引还原为 (i, j, k)
    ///
    /// 供数据并行的"按索引区间应用单元函数"模式使用。
    #[inline]
    pub fn interior_cell(&self, idx: usize) -> (isize, isize, isize) {
        debug_assert!(idx < self.n_interior());
        let i = (idx % self.nx) as isize;
        let j = ((idx / self.nx) % self.ny) as isize;
        let k = (idx / (self.nx * self.ny)) as isize;
        (i, j, k)
    }

    /// 内部单元求和
    pub fn interior_sum(&self) -> f64 {
        let mut total = 0.0;
        for idx in 0..self.n_interior() {
            let (i, j, k) = self.interior_cell(idx);
            total += self.at(i, j, k);
        }
        total
    }

    /// 内部单元最小/最大值
    pub fn interior_min_max(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for idx in 0..self.n_interior() {
            let (i, j, k) = self.interior_cell(idx);
            let v = self.at(i, j, k);
            lo = lo.min(v);
            hi = hi.max(v);
        }
        (lo, hi)
    }
}

// ============================================================
// 面场
// ============================================================

/// 面法向标量场
///
/// 存储某一轴全部面上的标量：该轴方向有 `n+1` 个面，其余两轴
/// 按单元计数。面索引约定：轴向分量为面序号（`0..=n`），其余
/// 分量为单元序号。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceField {
    axis: Axis,
    dims: [usize; 3],
    data: Vec<f64>,
}

impl FaceField {
    /// 创建全零面场
    ///
    /// `nx`, `ny`, `nz` 为单元数；轴向维度自动加一。
    pub fn new(axis: Axis, nx: usize, ny: usize, nz: usize) -> Self {
        let mut dims = [nx, ny, nz];
        dims[axis.index()] += 1;
        let len = dims[0] * dims[1] * dims[2];
        Self {
            axis,
            dims,
            data: vec![0.0; len],
        }
    }

    /// 从已有数据创建
    pub fn from_vec(axis: Axis, nx: usize, ny: usize, nz: usize, data: Vec<f64>) -> PfResult<Self> {
        let mut dims = [nx, ny, nz];
        dims[axis.index()] += 1;
        PfError::check_size("face_field.data", dims[0] * dims[1] * dims[2], data.len())?;
        Ok(Self { axis, dims, data })
    }

    /// 所属轴
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// 面总数
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// (i, j, k) 的线性面索引
    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(i < self.dims[0] && j < self.dims[1] && k < self.dims[2]);
        (k * self.dims[1] + j) * self.dims[0] + i
    }

    /// 线性面索引还原为 (i, j, k)
    #[inline]
    pub fn decompose(&self, idx: usize) -> (usize, usize, usize) {
        debug_assert!(idx < self.data.len());
        let i = idx % self.dims[0];
        let j = (idx / self.dims[0]) % self.dims[1];
        let k = idx / (self.dims[0] * self.dims[1]);
        (i, j, k)
    }

    /// 读取面值
    #[inline]
    pub fn at(&self, i: usize, j: usize, k: usize) -> f64 {
        self.data[self.index(i, j, k)]
    }

    /// 写入面值
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f64) {
        let idx = self.index(i, j, k);
        self.data[idx] = value;
    }

    /// 全场填充
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }
}

// ============================================================
// 掩码场
// ============================================================

/// 单元中心整型掩码场（overset iblank）
///
/// 由外部 overset 子系统产生并维护，本核心只读消费。
/// 约定 `> 0` 为活动单元，`<= 0` 为被遮蔽单元（hole/fringe）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskField {
    nx: usize,
    ny: usize,
    nz: usize,
    data: Vec<i32>,
}

impl MaskField {
    /// 创建全活动掩码
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            nx,
            ny,
            nz,
            data: vec![1; nx * ny * nz],
        }
    }

    /// 掩码尺寸 (nx, ny, nz)
    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    #[inline]
    fn flat(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny && k < self.nz);
        (k * self.ny + j) * self.nx + i
    }

    /// 读取掩码值
    #[inline]
    pub fn at(&self, i: usize, j: usize, k: usize) -> i32 {
        self.data[self.flat(i, j, k)]
    }

    /// 写入掩码值（属于 overset 子系统的职责，这里仅供测试构造）
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: i32) {
        let idx = self.flat(i, j, k);
        self.data[idx] = value;
    }

    /// 单元是否被遮蔽
    #[inline]
    pub fn is_masked(&self, i: usize, j: usize, k: usize) -> bool {
        self.at(i, j, k) <= 0
    }
}

// ============================================================
// 测试
// ============================================================
