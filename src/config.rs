/// 序列行为配置，通过[`Seq::with_configs`](crate::Seq::with_configs)设置，并被后续派生的序列继承。
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Config {
    /// 匹配类终结操作（`all_match`/`any_match`/`none_match`）同样拒绝无限序列。
    /// 未指定时依赖短路求值，允许在无限序列上执行。
    StrictMatch,
    /// 禁用基于底层集合的批量拷贝优化，始终逐个拉取元素。
    NoFastPath,
}

#[inline]
pub(crate) fn is_strict_match(configs: &[Config]) -> bool {
    configs.contains(&Config::StrictMatch)
}

#[inline]
pub(crate) fn use_fast_path(configs: &[Config]) -> bool {
    !configs.contains(&Config::NoFastPath)
}
