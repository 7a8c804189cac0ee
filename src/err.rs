use thiserror::Error;

/// 序列操作错误。
///
/// 用户回调（谓词、映射、比较器等）中的panic不会转换为错误，而是原样向上传播。
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum SeqErr {
    #[error("[Infinite Seq] Operation `{op}` is not allowed on an infinite sequence of `{elem}`")]
    FinitenessViolation { op: &'static str, elem: &'static str },
}

impl SeqErr {
    pub(crate) fn finiteness_violation<T>(op: &'static str) -> SeqErr {
        SeqErr::FinitenessViolation { op, elem: std::any::type_name::<T>() }
    }

    /// 产生错误的操作名称
    pub fn op(&self) -> &'static str {
        match self {
            SeqErr::FinitenessViolation { op, .. } => op,
        }
    }
}
