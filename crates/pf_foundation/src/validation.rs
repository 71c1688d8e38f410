// crates/pf_foundation/src/validation.rs

//! 运行时验证宏
//!
//! 提供构造期契约校验的便捷宏。

/// 条件不满足时提前返回错误
///
/// # 示例
///
/// ```
/// use pf_foundation::{ensure, PfError, PfResult};
///
/// fn check(nx: usize) -> PfResult<()> {
///     ensure!(nx > 0, PfError::invalid_grid("nx 必须为正"));
///     Ok(())
/// }
/// assert!(check(0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

/// Option 为空时提前返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr) => {
        match $opt {
            Some(v) => v,
            None => return Err($err),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error::{PfError, PfResult};

    #[test]
    fn test_require_macro() {
        fn get_value(opt: Option<i32>) -> PfResult<i32> {
            let v = crate::require!(opt, PfError::invalid_input("缺少值"));
            Ok(v)
        }

        assert_eq!(get_value(Some(42)).unwrap(), 42);
        assert!(get_value(None).is_err());
    }
}
