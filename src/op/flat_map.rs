use crate::pipe::Pipe;
use crate::seq::Seq;
use log::debug;
use std::rc::Rc;

/// 展开子序列的迭代器，当前子序列耗尽后才会拉取上游的下一个元素
pub(crate) struct FlatMapIter<T, U, F> {
    source: Pipe<T>,
    mapper: Rc<F>,
    inner: Option<Pipe<U>>,
}

impl<T, U, F> FlatMapIter<T, U, F> {
    pub(crate) fn new(source: Pipe<T>, mapper: Rc<F>) -> Self {
        FlatMapIter { source, mapper, inner: None }
    }
}

impl<T, U, F> Iterator for FlatMapIter<T, U, F>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> Seq<U>,
{
    type Item = U;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(inner) = &mut self.inner {
                if let Some(item) = inner.next() {
                    return Some(item);
                }
                self.inner = None;
            }
            let nested = (self.mapper)(self.source.next()?);
            if nested.is_infinite() {
                debug!("flat_map expands an infinite nested sequence: {}", nested.describe());
            }
            self.inner = Some(nested.pipe());
        }
    }
}
