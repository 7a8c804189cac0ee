/// 键值对，用于在序列中承载关联容器的数据
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Pair<K, V> {
    pub key: K,
    pub val: V,
}

impl<K, V> Pair<K, V> {
    pub fn new(key: K, val: V) -> Pair<K, V> {
        Pair { key, val }
    }

    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.val)
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, val): (K, V)) -> Self {
        Pair { key, val }
    }
}

impl<K, V> From<Pair<K, V>> for (K, V) {
    fn from(pair: Pair<K, V>) -> Self {
        pair.into_tuple()
    }
}
