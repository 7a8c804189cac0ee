use crate::config::is_strict_match;
use crate::err::SeqErr;
use crate::kv::Pair;
use crate::order;
use crate::seq::Seq;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;

/// 终结操作：每次调用创建一个新的拉取迭代器并消费它。
///
/// 只能作用于有限序列的操作会在拉取任何元素之前检查有限性标记，无限序列直接返回错误。
impl<T: 'static> Seq<T> {
    /// 按顺序对每个元素调用`consumer`。
    pub fn for_each(&self, mut consumer: impl FnMut(T)) {
        for item in self.iter() {
            consumer(item);
        }
    }

    /// 从第一个元素开始从左到右累积，空序列返回`None`。
    pub fn reduce(&self, accumulator: impl FnMut(T, T) -> T) -> Result<Option<T>, SeqErr> {
        self.assert_finite("reduce")?;
        Ok(self.iter().reduce(accumulator))
    }

    pub fn count(&self) -> Result<usize, SeqErr> {
        self.assert_finite("count")?;
        if let Some(bulk) = self.bulk() {
            return Ok(bulk.len);
        }
        Ok(self.iter().count())
    }

    /// 只拉取一个元素，可以作用于无限序列。
    pub fn find_first(&self) -> Option<T> {
        self.iter().next()
    }

    /// 是否所有元素都满足`predicate`，遇到第一个不满足的元素立即停止，空序列返回`true`。
    ///
    /// 默认允许作用于无限序列（依赖短路求值，可能无法结束），
    /// 配置[`Config::StrictMatch`](crate::Config::StrictMatch)后拒绝无限序列。
    pub fn all_match(&self, mut predicate: impl FnMut(&T) -> bool) -> Result<bool, SeqErr> {
        self.assert_matchable("all_match")?;
        Ok(self.iter().all(|item| predicate(&item)))
    }

    /// 是否存在满足`predicate`的元素，遇到第一个满足的元素立即停止，空序列返回`false`。
    pub fn any_match(&self, mut predicate: impl FnMut(&T) -> bool) -> Result<bool, SeqErr> {
        self.assert_matchable("any_match")?;
        Ok(self.iter().any(|item| predicate(&item)))
    }

    /// 是否没有元素满足`predicate`，即`any_match`取反，空序列返回`true`。
    pub fn none_match(&self, mut predicate: impl FnMut(&T) -> bool) -> Result<bool, SeqErr> {
        self.assert_matchable("none_match")?;
        Ok(!self.iter().any(|item| predicate(&item)))
    }

    /// 按`comparator`取最小值，存在多个最小值时返回第一个。
    pub fn min_by(&self, comparator: impl Fn(&T, &T) -> Ordering) -> Result<Option<T>, SeqErr> {
        self.assert_finite("min")?;
        Ok(self.iter().reduce(|min, item| if comparator(&item, &min) == Ordering::Less { item } else { min }))
    }

    /// 按`comparator`取最大值，存在多个最大值时返回第一个。
    pub fn max_by(&self, comparator: impl Fn(&T, &T) -> Ordering) -> Result<Option<T>, SeqErr> {
        self.assert_finite("max")?;
        Ok(self.iter().reduce(|max, item| if comparator(&item, &max) == Ordering::Greater { item } else { max }))
    }

    /// 收集到新分配的`Vec`中。
    ///
    /// 直接基于集合创建、且未经过任何中间操作的序列会直接拷贝底层集合。
    pub fn collect_vec(&self) -> Result<Vec<T>, SeqErr> {
        self.assert_finite("collect_vec")?;
        if let Some(bulk) = self.bulk() {
            return Ok((bulk.copy)());
        }
        Ok(self.iter().collect_vec())
    }

    /// 收集到任意实现了`FromIterator`的容器中。
    pub fn collect<C: FromIterator<T>>(&self) -> Result<C, SeqErr> {
        self.assert_finite("collect")?;
        Ok(self.iter().collect())
    }

    fn assert_matchable(&self, op: &'static str) -> Result<(), SeqErr> {
        if is_strict_match(self.configs()) { self.assert_finite(op) } else { Ok(()) }
    }
}

impl<T: Ord + 'static> Seq<T> {
    /// 按自然顺序取最小值，参考[`Seq::min_by`]。
    pub fn min(&self) -> Result<Option<T>, SeqErr> {
        self.min_by(order::natural)
    }

    /// 按自然顺序取最大值，参考[`Seq::max_by`]。
    pub fn max(&self) -> Result<Option<T>, SeqErr> {
        self.max_by(order::natural)
    }
}

impl<K: Eq + Hash + 'static, V: 'static> Seq<Pair<K, V>> {
    /// 收集到新的关联容器中，重复的键以最后出现的值为准。
    pub fn to_map(&self) -> Result<FxHashMap<K, V>, SeqErr> {
        self.assert_finite("to_map")?;
        Ok(self.iter().map(Pair::into_tuple).collect())
    }
}
