mod flat_map;
mod sort;

use crate::SeqRes;
use crate::op::flat_map::FlatMapIter;
use crate::op::sort::SortedIter;
use crate::order;
use crate::pipe::Pipe;
use crate::seq::Seq;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::hash::Hash;
use std::rc::Rc;

/// 中间操作：全部为惰性操作，调用时只记录上游序列，不会拉取任何元素。
///
/// 各操作的回调在同一序列的多次消费之间共享。
impl<T: 'static> Seq<T> {
    /// 只保留满足`predicate`的元素。
    pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Seq<T> {
        let predicate = Rc::new(predicate);
        let upstream = self.clone();
        self.derive("filter", self.is_infinite(), move || {
            let predicate = Rc::clone(&predicate);
            upstream.pipe().op_filter(move |item| predicate(item))
        })
    }

    /// 逐个转换元素，允许改变元素类型。
    pub fn map<U: 'static>(&self, mapper: impl Fn(T) -> U + 'static) -> Seq<U> {
        let mapper = Rc::new(mapper);
        let upstream = self.clone();
        self.derive("map", self.is_infinite(), move || {
            let mapper = Rc::clone(&mapper);
            upstream.pipe().op_map(move |item| mapper(item))
        })
    }

    /// 将每个元素映射为一个子序列，并依次展开子序列的全部元素。
    ///
    /// 结果沿用上游的有限性标记：子序列是否无限无法在构造时得知，
    /// 如果某个子序列是无限序列，`count`、`collect_vec`等操作将无法结束，需要配合`limit`使用。
    /// 缺失的子序列可以通过`Seq::from(None)`表示为空序列。
    pub fn flat_map<U: 'static>(&self, mapper: impl Fn(T) -> Seq<U> + 'static) -> Seq<U> {
        let mapper = Rc::new(mapper);
        let upstream = self.clone();
        self.derive("flat_map", self.is_infinite(), move || {
            Pipe::new(FlatMapIter::new(upstream.pipe(), Rc::clone(&mapper)))
        })
    }

    /// 最多保留前`n`个元素，结果始终为有限序列。
    ///
    /// 取满`n`个元素后不会再拉取上游，`n`为0时不拉取任何元素。
    pub fn limit(&self, n: usize) -> Seq<T> {
        let upstream = self.clone();
        self.derive(format!("limit({n})"), false, move || Pipe::new(upstream.pipe().take(n)))
    }

    /// 丢弃前`n`个元素，首次拉取时一次性从上游取出并丢弃。
    pub fn skip(&self, n: usize) -> Seq<T> {
        let upstream = self.clone();
        self.derive(format!("skip({n})"), self.is_infinite(), move || Pipe::new(upstream.pipe().skip(n)))
    }

    /// 按`key`去重，只保留每个键首次出现的元素。
    pub fn distinct_by<K: Eq + Hash + 'static>(&self, key: impl Fn(&T) -> K + 'static) -> Seq<T> {
        let key = Rc::new(key);
        let upstream = self.clone();
        self.derive("distinct_by", self.is_infinite(), move || {
            let key = Rc::clone(&key);
            let mut seen = FxHashSet::default();
            upstream.pipe().op_filter(move |item| seen.insert(key(item)))
        })
    }

    /// 原样转发元素，并在元素被下游拉取时调用一次`consumer`。
    ///
    /// `consumer`在多次消费之间共享，需要记录状态时由调用方自行使用`Cell`、`RefCell`等。
    /// `consumer`内部可以再次消费同一个序列。
    pub fn peek(&self, consumer: impl Fn(&T) + 'static) -> Seq<T> {
        let consumer = Rc::new(consumer);
        let upstream = self.clone();
        self.derive("peek", self.is_infinite(), move || {
            let consumer = Rc::clone(&consumer);
            upstream.pipe().op_inspect(move |item| consumer(item))
        })
    }

    /// 按`comparator`排序（稳定排序）。
    ///
    /// 上游为无限序列时立即返回错误，不会拉取任何元素。
    /// 每次消费在首次拉取时将上游全部读入独立的缓冲区，排序后再逐个输出。
    pub fn sorted_by(&self, comparator: impl Fn(&T, &T) -> Ordering + 'static) -> SeqRes<T> {
        self.assert_finite("sorted")?;
        let comparator = Rc::new(comparator);
        let upstream = self.clone();
        Ok(self.derive("sorted", false, move || Pipe::new(SortedIter::new(upstream.pipe(), Rc::clone(&comparator)))))
    }
}

impl<T: Eq + Hash + Clone + 'static> Seq<T> {
    /// 去重，只保留每个元素首次出现的位置。
    ///
    /// 需要记住所有已出现的元素，元素种类很多的大序列或无限序列会持续占用内存。
    pub fn distinct(&self) -> Seq<T> {
        let upstream = self.clone();
        self.derive("distinct", self.is_infinite(), move || {
            let mut seen = FxHashSet::default();
            upstream.pipe().op_filter(move |item| !seen.contains(item) && seen.insert(item.clone()))
        })
    }
}

impl<T: Ord + 'static> Seq<T> {
    /// 按自然顺序排序，参考[`Seq::sorted_by`]。
    pub fn sorted(&self) -> SeqRes<T> {
        self.sorted_by(order::natural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::SeqErr;
    use crate::kv::Pair;
    use std::cell::{Cell, RefCell};
    use unicase::UniCase;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, Rc<RefCell<Vec<String>>>) {
        let actions = Rc::new(RefCell::new(Vec::new()));
        (Rc::clone(&actions), actions)
    }

    #[test]
    fn test_lazy_operation() {
        let (actions, log) = recorder();
        let (filter_log, map_log) = (Rc::clone(&log), Rc::clone(&log));
        let seq = Seq::of(["hello", "my", "friend"])
            .filter(move |s| {
                filter_log.borrow_mut().push(format!("filter({s})"));
                s.contains('e')
            })
            .map(move |s| {
                map_log.borrow_mut().push(format!("map({s})"));
                s.len()
            });
        assert!(actions.borrow().is_empty());

        seq.for_each(|len| log.borrow_mut().push(format!("foreach({len})")));
        assert_eq!(
            *actions.borrow(),
            vec![
                "filter(hello)",
                "map(hello)",
                "foreach(5)",
                "filter(my)",
                "filter(friend)",
                "map(friend)",
                "foreach(6)"
            ]
        );
    }

    #[test]
    fn test_filter() {
        let seq = Seq::of(1..=10).filter(|x| x % 3 == 0);
        assert_eq!(seq.collect_vec(), Ok(vec![3, 6, 9]));
        assert_eq!(Seq::of(1..=10).filter(|_| false).collect_vec(), Ok(vec![]));
        assert!(Seq::generate(|| 1).filter(|_| true).is_infinite());
    }

    #[test]
    fn test_map_changes_type() {
        let seq = Seq::of([1, 2, 3]).map(|x| x.to_string());
        assert_eq!(seq.collect_vec(), Ok(vec!["1".to_string(), "2".to_string(), "3".to_string()]));
        assert_eq!(Seq::of(["a", "bb"]).map(str::len).map(|x| x * 2).collect_vec(), Ok(vec![2, 4]));
    }

    #[test]
    fn test_flat_map() {
        let seq = Seq::of(["ab", "", "c"]).flat_map(|s| Seq::of(s.chars()));
        assert_eq!(seq.collect_vec(), Ok(vec!['a', 'b', 'c']));
        assert!(!seq.is_infinite());
    }

    #[test]
    fn test_flat_map_absent_nested() {
        let seq = Seq::of([1, 2, 3, 4]).flat_map(|x| Seq::from((x % 2 == 0).then(|| Seq::repeat(x, Some(x as usize)))));
        assert_eq!(seq.collect_vec(), Ok(vec![2, 2, 4, 4, 4, 4]));
    }

    #[test]
    fn test_flat_map_infinite_nested_with_limit() {
        let seq = Seq::of([1, 2]).flat_map(|x| Seq::repeat(x, None));
        assert!(!seq.is_infinite());
        assert_eq!(seq.limit(4).collect_vec(), Ok(vec![1, 1, 1, 1]));

        let outer = Seq::iterate(1, |x| x + 1).flat_map(|x| Seq::of([x, -x]));
        assert!(outer.is_infinite());
        assert_eq!(outer.limit(5).collect_vec(), Ok(vec![1, -1, 2, -2, 3]));
    }

    #[test]
    fn test_limit() {
        assert_eq!(Seq::of(1..=5).limit(3).collect_vec(), Ok(vec![1, 2, 3]));
        assert_eq!(Seq::of(1..=5).limit(10).collect_vec(), Ok(vec![1, 2, 3, 4, 5]));
        assert_eq!(Seq::of(1..=5).limit(0).collect_vec(), Ok(vec![]));
        let limited = Seq::iterate(0, |x| x + 1).limit(4);
        assert!(!limited.is_infinite());
        assert_eq!(limited.count(), Ok(4));
    }

    #[test]
    fn test_limit_stops_pulling() {
        let pulls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulls);
        let seq = Seq::generate(move || {
            counter.set(counter.get() + 1);
            counter.get()
        });
        assert_eq!(seq.limit(0).collect_vec(), Ok(vec![]));
        assert_eq!(pulls.get(), 0);
        assert_eq!(seq.limit(3).collect_vec(), Ok(vec![1, 2, 3]));
        assert_eq!(pulls.get(), 3);
    }

    #[test]
    fn test_skip() {
        assert_eq!(Seq::of(1..=6).skip(3).limit(2).collect_vec(), Ok(vec![4, 5]));
        assert_eq!(Seq::of(1..=6).skip(0).collect_vec(), Ok(vec![1, 2, 3, 4, 5, 6]));
        assert_eq!(Seq::of(1..=6).skip(10).collect_vec(), Ok(vec![]));
        assert!(Seq::repeat(1, None).skip(3).is_infinite());
    }

    #[test]
    fn test_skip_draws_up_front() {
        let (pulled, log) = recorder();
        let seq = Seq::of(["a", "b", "c", "d"]).peek(move |s| log.borrow_mut().push(s.to_string())).skip(2);
        let mut pipe = seq.iter();
        assert!(pulled.borrow().is_empty());
        assert_eq!(pipe.next(), Some("c"));
        assert_eq!(*pulled.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_distinct() {
        let seq = Seq::of([1, 1, 2, 3, 3, 3, 4, 5, 1, 2, 3, 4, 5]).distinct();
        assert_eq!(seq.collect_vec(), Ok(vec![1, 2, 3, 4, 5]));
        // 每次消费使用独立的去重集合
        assert_eq!(seq.collect_vec(), Ok(vec![1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_distinct_on_infinite() {
        let seq = Seq::iterate(0, |x| (x + 1) % 4).distinct();
        assert!(seq.is_infinite());
        assert_eq!(seq.limit(4).collect_vec(), Ok(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_distinct_by() {
        let seq =
            Seq::of(["Apple", "apple", "BANANA", "Cherry", "banana"]).distinct_by(|s| UniCase::new(s.to_string()));
        assert_eq!(seq.collect_vec(), Ok(vec!["Apple", "BANANA", "Cherry"]));

        let pairs = Seq::of([Pair::new(1, "a"), Pair::new(2, "b"), Pair::new(1, "c")]).distinct_by(|p| p.key);
        assert_eq!(pairs.map(|p| p.val).collect_vec(), Ok(vec!["a", "b"]));
    }

    #[test]
    fn test_peek_only_on_pull() {
        let (peeked, log) = recorder();
        let seq = Seq::of(["x", "y", "z"]).peek(move |s| log.borrow_mut().push(s.to_string())).limit(2);
        assert!(peeked.borrow().is_empty());
        assert_eq!(seq.collect_vec(), Ok(vec!["x", "y"]));
        assert_eq!(*peeked.borrow(), vec!["x", "y"]);
        assert_eq!(seq.find_first(), Some("x"));
        assert_eq!(*peeked.borrow(), vec!["x", "y", "x"]);
    }

    #[test]
    fn test_peek_consumer_reenters_seq() {
        let (firsts, log) = recorder();
        let inner: Rc<RefCell<Option<Seq<i32>>>> = Rc::new(RefCell::new(None));
        let handle = Rc::clone(&inner);
        let entered = Cell::new(false);
        let seq = Seq::of([1, 2]).peek(move |x| {
            log.borrow_mut().push(format!("peek({x})"));
            if *x == 1 && !entered.replace(true) {
                let first = handle.borrow().as_ref().and_then(|seq| seq.find_first());
                log.borrow_mut().push(format!("first({first:?})"));
            }
        });
        *inner.borrow_mut() = Some(seq.clone());
        assert_eq!(seq.collect_vec(), Ok(vec![1, 2]));
        assert_eq!(*firsts.borrow(), vec!["peek(1)", "peek(1)", "first(Some(1))", "peek(2)"]);
        inner.borrow_mut().take();
    }

    #[test]
    fn test_sorted() {
        let seq = Seq::of([5, 3, 9, 1, 3]).sorted().unwrap();
        assert_eq!(seq.collect_vec(), Ok(vec![1, 3, 3, 5, 9]));
        let desc = Seq::of([5, 3, 9, 1, 3]).sorted_by(order::inverse(order::natural::<i32>)).unwrap();
        assert_eq!(desc.collect_vec(), Ok(vec![9, 5, 3, 3, 1]));
    }

    #[test]
    fn test_sorted_is_stable() {
        let seq = Seq::of([Pair::new(2, "a"), Pair::new(1, "b"), Pair::new(2, "c"), Pair::new(1, "d")])
            .sorted_by(order::by_key::<i32, &str, _>(order::natural))
            .unwrap();
        assert_eq!(seq.map(|p| p.val).collect_vec(), Ok(vec!["b", "d", "a", "c"]));
    }

    #[test]
    fn test_sorted_on_infinite_fails() {
        let pulls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulls);
        let seq = Seq::generate(move || {
            counter.set(counter.get() + 1);
            counter.get()
        });
        let err = seq.sorted().unwrap_err();
        assert_eq!(err, SeqErr::FinitenessViolation { op: "sorted", elem: "i32" });
        assert_eq!(pulls.get(), 0);
        // 失败不影响原序列
        assert_eq!(seq.find_first(), Some(1));
    }

    #[test]
    fn test_sorted_after_limit() {
        let mut n = 10;
        let seq = Seq::generate(move || {
            n = (n * 7 + 3) % 11;
            n
        });
        let sorted = seq.limit(5).sorted().unwrap();
        assert!(!sorted.is_infinite());
        let values = sorted.collect_vec().unwrap();
        assert_eq!(values.len(), 5);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_sorted_drains_on_first_pull() {
        let (pulled, log) = recorder();
        let seq = Seq::of(["b", "c", "a"]).peek(move |s| log.borrow_mut().push(s.to_string())).sorted().unwrap();
        let mut pipe = seq.iter();
        assert!(pulled.borrow().is_empty());
        assert_eq!(pipe.next(), Some("a"));
        assert_eq!(*pulled.borrow(), vec!["b", "c", "a"]);
        assert_eq!(pipe.collect::<Vec<_>>(), vec!["b", "c"]);
        // 每次消费独立缓冲
        assert_eq!(seq.collect_vec(), Ok(vec!["a", "b", "c"]));
        assert_eq!(pulled.borrow().len(), 6);
    }
}
