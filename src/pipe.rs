use std::fmt::{Debug, Formatter};
use std::iter::Fuse;

/// 拉取式迭代器，序列每次被消费时都会创建一个新的实例。
///
/// 内部迭代器已经过`fuse`，首次返回`None`后后续调用始终返回`None`。
pub struct Pipe<T> {
    iter: Fuse<Box<dyn Iterator<Item = T>>>,
}

impl<T> Iterator for Pipe<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T: 'static> Pipe<T> {
    pub(crate) fn new(iter: impl Iterator<Item = T> + 'static) -> Pipe<T> {
        let iter: Box<dyn Iterator<Item = T>> = Box::new(iter);
        Pipe { iter: iter.fuse() }
    }

    pub(crate) fn empty() -> Pipe<T> {
        Pipe::new(std::iter::empty())
    }

    pub(crate) fn op_map<U: 'static>(self, f: impl FnMut(T) -> U + 'static) -> Pipe<U> {
        Pipe::new(self.map(f))
    }

    pub(crate) fn op_filter(self, f: impl FnMut(&T) -> bool + 'static) -> Pipe<T> {
        Pipe::new(self.filter(f))
    }

    pub(crate) fn op_inspect(self, f: impl FnMut(&T) + 'static) -> Pipe<T> {
        Pipe::new(self.inspect(f))
    }
}

impl<T> Debug for Pipe<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipe").finish_non_exhaustive()
    }
}
