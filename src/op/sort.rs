use crate::pipe::Pipe;
use itertools::Itertools;
use log::debug;
use std::cmp::Ordering;
use std::rc::Rc;
use std::vec::IntoIter;

/// 排序迭代器：首次拉取时读入并排序上游全部元素，之后从缓冲区逐个输出
pub(crate) struct SortedIter<T, F> {
    source: Option<Pipe<T>>,
    comparator: Rc<F>,
    sorted: IntoIter<T>,
}

impl<T, F> SortedIter<T, F> {
    pub(crate) fn new(source: Pipe<T>, comparator: Rc<F>) -> Self {
        SortedIter { source: Some(source), comparator, sorted: Vec::new().into_iter() }
    }
}

impl<T, F> Iterator for SortedIter<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(source) = self.source.take() {
            let comparator = Rc::clone(&self.comparator);
            self.sorted = source.sorted_by(|a, b| comparator(a, b));
            debug!("sorted {} buffered element(s)", self.sorted.len());
        }
        self.sorted.next()
    }
}
