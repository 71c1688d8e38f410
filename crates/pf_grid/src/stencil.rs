// crates/pf_grid/src/stencil.rs

//! 3×3×3 模板提取
//!
//! 法向估计与平面拟合只依赖单元周围 ±1 的体积分数块。
//! 将模板提取为值拷贝使几何内核成为纯函数：不持有场引用、
//! 可单独构造、可单独测试。
//!
//! 模板提取要求幽灵层已填充（见 [`crate::halo::fill_halo`]）。

use crate::field::CellField;
use crate::grid::BoundarySides;

/// 3×3×3 体积分数模板
///
/// 偏移访问 `at(di, dj, dk)`，各偏移取值 -1、0、+1。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stencil3 {
    v: [f64; 27],
}

impl Stencil3 {
    #[inline]
    fn slot(di: i32, dj: i32, dk: i32) -> usize {
        debug_assert!((-1..=1).contains(&di));
        debug_assert!((-1..=1).contains(&dj));
        debug_assert!((-1..=1).contains(&dk));
        ((dk + 1) * 9 + (dj + 1) * 3 + (di + 1)) as usize
    }

    /// 从场提取以 (i, j, k) 为中心的模板
    pub fn gather(field: &CellField, i: isize, j: isize, k: isize) -> Self {
        let mut v = [0.0; 27];
        for dk in -1..=1 {
            for dj in -1..=1 {
                for di in -1..=1 {
                    v[Self::slot(di, dj, dk)] =
                        field.at(i + di as isize, j + dj as isize, k + dk as isize);
                }
            }
        }
        Self { v }
    }

    /// 按偏移函数构造模板
    pub fn from_fn(f: impl Fn(i32, i32, i32) -> f64) -> Self {
        let mut v = [0.0; 27];
        for dk in -1..=1 {
            for dj in -1..=1 {
                for di in -1..=1 {
                    v[Self::slot(di, dj, dk)] = f(di, dj, dk);
                }
            }
        }
        Self { v }
    }

    /// 常值模板
    pub fn uniform(value: f64) -> Self {
        Self { v: [value; 27] }
    }

    /// 偏移读取
    #[inline]
    pub fn at(&self, di: i32, dj: i32, dk: i32) -> f64 {
        self.v[Self::slot(di, dj, dk)]
    }

    /// 中心值
    #[inline]
    pub fn center(&self) -> f64 {
        self.v[Self::slot(0, 0, 0)]
    }

    /// 边界塌缩模板
    ///
    /// 贴非周期边界的单元上，指向边界外的偏移塌缩到中心索引
    /// （零梯度镜像），对应诺伊曼变体的法向估计。标记为 -1 的
    /// 方向塌缩低侧偏移，+1 塌缩高侧偏移。
    pub fn collapsed(&self, sides: BoundarySides) -> Self {
        if sides.is_interior() {
            return *self;
        }
        let clamp = |d: i32, flag: i8| -> i32 {
            if (flag == -1 && d == -1) || (flag == 1 && d == 1) {
                0
            } else {
                d
            }
        };
        Self::from_fn(|di, dj, dk| {
            self.at(clamp(di, sides.x), clamp(dj, sides.y), clamp(dk, sides.z))
        })
    }
}

// ============================================================
// 测试
// ============================================================
