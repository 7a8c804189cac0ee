use crate::kv::Pair;
use crate::pipe::Pipe;
use crate::seq::{Bulk, Seq};
use log::trace;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Receiver;

impl<T: Clone + 'static> Seq<T> {
    /// 基于给定元素创建有限序列，元素只会被收集一次并在多次消费之间共享。
    ///
    /// 例如：
    /// ```
    /// use lazyseq::Seq;
    ///
    /// assert_eq!(Seq::of([1, 2, 3]).collect_vec(), Ok(vec![1, 2, 3]));
    /// ```
    pub fn of(items: impl IntoIterator<Item = T>) -> Seq<T> {
        Seq::of_shared(items.into_iter().collect())
    }

    /// 基于切片创建有限序列，不会修改原切片。
    pub fn of_slice(items: &[T]) -> Seq<T> {
        Seq::of_shared(Rc::from(items))
    }

    fn of_shared(items: Rc<[T]>) -> Seq<T> {
        let len = items.len();
        trace!("new sequence of {len} element(s)");
        let bulk_items = Rc::clone(&items);
        Seq::new(false, format!("of[{len}]"), move || Pipe::new(SharedIter { items: Rc::clone(&items), pos: 0 }))
            .with_bulk(Bulk { len, copy: Rc::new(move || bulk_items.to_vec()) })
    }

    /// 无限序列：`seed`, `step(seed)`, `step(step(seed))`, ...
    ///
    /// 只有在下一个元素真正被拉取时才会调用`step`，不会提前计算。
    pub fn iterate(seed: T, step: impl Fn(&T) -> T + 'static) -> Seq<T> {
        let step = Rc::new(step);
        Seq::new(true, "iterate", move || {
            Pipe::new(IterateIter { seed: seed.clone(), last: None, step: Rc::clone(&step) })
        })
    }

    /// 重复`value`，指定`count`时为有限序列，否则为无限序列。
    pub fn repeat(value: T, count: Option<usize>) -> Seq<T> {
        match count {
            Some(count) => Seq::new(false, format!("repeat[{count}]"), move || {
                Pipe::new(std::iter::repeat_n(value.clone(), count))
            }),
            None => Seq::new(true, "repeat", move || Pipe::new(std::iter::repeat(value.clone()))),
        }
    }
}

impl<T: 'static> Seq<T> {
    pub fn empty() -> Seq<T> {
        Seq::new(false, "empty", Pipe::empty)
    }

    /// 无限序列，每个元素都由`supplier`生成。
    ///
    /// 同一个序列的多次消费共享同一个`supplier`，因此有状态的`supplier`在每次消费时可能产生不同的结果。
    /// `supplier`内部不能再次消费同一个序列，否则会panic。
    pub fn generate(supplier: impl FnMut() -> T + 'static) -> Seq<T> {
        let supplier = Rc::new(RefCell::new(supplier));
        Seq::new(true, "generate", move || {
            let supplier = Rc::clone(&supplier);
            Pipe::new(std::iter::repeat_with(move || (&mut *supplier.borrow_mut())()))
        })
    }

    /// 连接两个序列：先完整消费`a`，再消费`b`。
    ///
    /// 仅当两个序列都是有限序列时结果才是有限序列，结果沿用`a`的配置。
    pub fn concat(a: Seq<T>, b: Seq<T>) -> Seq<T> {
        let infinite = a.is_infinite() || b.is_infinite();
        let configs = a.configs();
        let desc = format!("concat({}, {})", a.describe(), b.describe());
        Seq::new(infinite, desc, move || Pipe::new(ConcatIter { current: a.pipe(), next: Some(b.clone()) }))
            .with_configs(configs)
    }

    /// 适配外部的有限数据源，每次消费都会调用`factory`获取新的迭代器。
    pub fn supply<I>(factory: impl Fn() -> I + 'static) -> Seq<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Seq::new(false, "supply", move || Pipe::new(factory().into_iter()))
    }

    /// 同[`Seq::supply`]，但数据源被标记为无限序列。
    pub fn supply_infinite<I>(factory: impl Fn() -> I + 'static) -> Seq<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Seq::new(true, "supply", move || Pipe::new(factory().into_iter()))
    }

    /// 适配通道接收端，拉取时阻塞等待，所有发送端关闭后结束。
    ///
    /// 接收端在多次消费之间共享，已被接收的元素不会再次出现。
    pub fn of_receiver(rx: Receiver<T>) -> Seq<T> {
        let rx = Rc::new(rx);
        Seq::new(false, "receiver", move || {
            let rx = Rc::clone(&rx);
            Pipe::new(std::iter::from_fn(move || rx.recv().ok()))
        })
    }
}

impl<K: Clone + 'static, V: Clone + 'static> Seq<Pair<K, V>> {
    /// 将关联容器的键值对转换为序列，元素顺序与容器的遍历顺序一致。
    pub fn of_map(map: impl IntoIterator<Item = (K, V)>) -> Seq<Pair<K, V>> {
        Seq::of(map.into_iter().map(Pair::from))
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Seq<T> {
    fn from(items: Vec<T>) -> Self {
        Seq::of_shared(items.into())
    }
}

impl<T: Clone + 'static> FromIterator<T> for Seq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Seq::of(iter)
    }
}

/// 缺失的序列视为空序列
impl<T: 'static> From<Option<Seq<T>>> for Seq<T> {
    fn from(seq: Option<Seq<T>>) -> Self {
        seq.unwrap_or_else(Seq::empty)
    }
}

struct SharedIter<T> {
    items: Rc<[T]>,
    pos: usize,
}

impl<T: Clone> Iterator for SharedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.get(self.pos)?.clone();
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

struct IterateIter<T, F> {
    seed: T,
    last: Option<T>,
    step: Rc<F>,
}

impl<T, F> Iterator for IterateIter<T, F>
where
    T: Clone,
    F: Fn(&T) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = match &self.last {
            None => self.seed.clone(),
            Some(last) => (self.step)(last),
        };
        self.last = Some(value.clone());
        Some(value)
    }
}

struct ConcatIter<T> {
    current: Pipe<T>,
    next: Option<Seq<T>>,
}

impl<T: 'static> Iterator for ConcatIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }
            // 第一个序列耗尽后才创建第二个序列的迭代器
            self.current = self.next.take()?.pipe();
        }
    }
}
