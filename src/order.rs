//! 比较器工具，用于`sorted_by`、`min_by`、`max_by`等操作。
//!
//! 比较器即`Fn(&T, &T) -> Ordering`，需要满足严格弱序：反对称、可传递。

use crate::kv::Pair;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use unicase::UniCase;

/// 自然顺序
pub fn natural<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// 忽略大小写的字符串顺序（基于Unicode大小写折叠）
pub fn ignore_case<S: AsRef<str>>(a: &S, b: &S) -> Ordering {
    UniCase::new(a.as_ref()).cmp(&UniCase::new(b.as_ref()))
}

/// 浮点数的全序：`-0.0`与`0.0`相等，`NaN`大于所有其他值且与自身相等
pub fn float<F: Into<f64> + Copy>(a: &F, b: &F) -> Ordering {
    OrderedFloat((*a).into()).cmp(&OrderedFloat((*b).into()))
}

/// 逆序
pub fn inverse<T, F>(comparator: F) -> impl Fn(&T, &T) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| comparator(a, b).reverse()
}

/// 使用`comparator`比较键值对的键
pub fn by_key<K, V, F>(comparator: F) -> impl Fn(&Pair<K, V>, &Pair<K, V>) -> Ordering
where
    F: Fn(&K, &K) -> Ordering,
{
    move |a: &Pair<K, V>, b: &Pair<K, V>| comparator(&a.key, &b.key)
}

/// 使用`comparator`比较键值对的值
pub fn by_val<K, V, F>(comparator: F) -> impl Fn(&Pair<K, V>, &Pair<K, V>) -> Ordering
where
    F: Fn(&V, &V) -> Ordering,
{
    move |a: &Pair<K, V>, b: &Pair<K, V>| comparator(&a.val, &b.val)
}
