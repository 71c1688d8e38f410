// crates/pf_grid/src/lib.rs

//! PlicFlow 网格层
//!
//! 提供界面捕捉核心所需的网格与场抽象：
//! - 固定笛卡尔网格 (grid)
//! - 带幽灵层的单元场、面场与掩码场 (field)
//! - 幽灵层填充 (halo)
//! - 3×3×3 模板提取 (stencil)
//! - 数据并行策略 (parallel)
//!
//! # 职责边界
//!
//! 网格层只负责存储与索引；几何语义（法向、平面、通量）全部
//! 位于 `pf_multiphase`。AMR 层级、分布式分解与 GPU 调度不在
//! 本层范围内——多进程情形下 [`halo::fill_halo`] 对应的位置由
//! 宿主的 halo 交换替代。

#![warn(clippy::all)]

pub mod field;
pub mod grid;
pub mod halo;
pub mod parallel;
pub mod stencil;

pub use field::{CellField, FaceField, MaskField, MIN_GHOST};
pub use grid::{Axis, BoundaryKind, BoundarySides, CartesianGrid, Side};
pub use halo::fill_halo;
pub use parallel::{map_indexed, ParallelPolicy};
pub use stencil::Stencil3;
