// crates/pf_multiphase/src/lib.rs

//! PlicFlow 多相核心
//!
//! 固定笛卡尔网格上双不可混溶流体锐利界面的 VOF 捕捉核心：
//! - 界面法向估计 (normal)：Youngs 有限差分与混合 Youngs/中心格式
//! - PLIC 平面求解 (plic)：单位立方体切割的解析正反问题
//! - 单元平面拟合与界面带检测 (fit)
//! - 方向分裂对流 (advect)：三相位一维扫掠 + 轮换扫掠顺序
//! - 对流后清理 (cleanup)：碎屑清除与 overset 掩码覆盖
//! - 水平集初始化 (levelset)
//! - 状态容器 (state)
//!
//! # 错误与退化策略
//!
//! 核心是确定性数值内核：退化几何用 epsilon 保护与回退法向就地
//! 恢复，越界分数一律截断并计入统计，运行期不抛错误。唯一的
//! 致命条件是构造期契约违规（幽灵层不足、配置非法）。
//!
//! # 与宿主求解器的边界
//!
//! 网格层级、分布式 halo 交换、压力/黏性求解与外层时间循环均为
//! 外部协作方；本 crate 暴露的 [`SplitAdvector::advect`] 是被外层
//! 循环同步调用的纯计算核。

#![warn(clippy::all)]

pub mod advect;
pub mod cleanup;
pub mod fit;
pub mod levelset;
pub mod normal;
pub mod plic;
pub mod state;

pub use advect::{SplitAdvectionConfig, SplitAdvector, SweepCycle, SweepStats};
pub use cleanup::{remove_debris, replace_masked};
pub use fit::{fit_plane, interface_band, PlaneFit};
pub use levelset::{levelset_to_vof, LevelSetConverter};
pub use normal::{mixed_youngs_central_normal, youngs_normal, youngs_normal_neumann};
pub use plic::{cut_volume, volume_intercept};
pub use state::{FaceVelocities, VofState};
