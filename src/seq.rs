use crate::config::{Config, use_fast_path};
use crate::err::SeqErr;
use crate::pipe::Pipe;
use log::{debug, trace};
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

/// 惰性序列：一个可重复调用的拉取迭代器工厂，以及序列是否无限的静态标记。
///
/// 序列本身不可变，所有中间操作都会返回引用上游序列的新序列，不会修改原序列。
/// 只有终结操作（或通过[`Seq::iter`]/`for`循环消费）才会真正拉取元素。
///
/// 每次消费都会调用工厂得到一个全新的[`Pipe`]，各阶段的状态（计数、去重集合、排序缓冲）
/// 都归属于该`Pipe`，不会在多次消费之间共享。
pub struct Seq<T> {
    supply: Rc<dyn Fn() -> Pipe<T>>,
    infinite: bool,
    configs: &'static [Config],
    desc: Rc<Desc>,
    bulk: Option<Bulk<T>>,
}

/// 流水线描述的一个节点，只保存本阶段的名称，上游部分与上游序列共享
struct Desc {
    upstream: Option<Rc<Desc>>,
    stage: Box<str>,
}

impl Display for Desc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut stages = Vec::new();
        let mut node = Some(self);
        while let Some(desc) = node {
            stages.push(&*desc.stage);
            node = desc.upstream.as_deref();
        }
        for (i, stage) in stages.iter().rev().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(stage)?;
        }
        Ok(())
    }
}

/// 直接批量拷贝能力，仅由基于集合的数据源提供
pub(crate) struct Bulk<T> {
    pub(crate) len: usize,
    pub(crate) copy: Rc<dyn Fn() -> Vec<T>>,
}

impl<T> Clone for Bulk<T> {
    fn clone(&self) -> Self {
        Bulk { len: self.len, copy: Rc::clone(&self.copy) }
    }
}

impl<T> Clone for Seq<T> {
    fn clone(&self) -> Self {
        Seq {
            supply: Rc::clone(&self.supply),
            infinite: self.infinite,
            configs: self.configs,
            desc: Rc::clone(&self.desc),
            bulk: self.bulk.clone(),
        }
    }
}

impl<T: 'static> Seq<T> {
    pub(crate) fn new(infinite: bool, desc: impl Into<Box<str>>, supply: impl Fn() -> Pipe<T> + 'static) -> Seq<T> {
        let desc = Rc::new(Desc { upstream: None, stage: desc.into() });
        Seq { supply: Rc::new(supply), infinite, configs: &[], desc, bulk: None }
    }

    pub(crate) fn with_bulk(mut self, bulk: Bulk<T>) -> Seq<T> {
        self.bulk = Some(bulk);
        self
    }

    /// 基于当前序列派生下游序列，继承配置并在描述中追加阶段名称
    pub(crate) fn derive<U: 'static>(
        &self, stage: impl Display, infinite: bool, supply: impl Fn() -> Pipe<U> + 'static,
    ) -> Seq<U> {
        Seq {
            supply: Rc::new(supply),
            infinite,
            configs: self.configs,
            desc: Rc::new(Desc { upstream: Some(Rc::clone(&self.desc)), stage: stage.to_string().into() }),
            bulk: None,
        }
    }

    /// 创建新的拉取迭代器，仅供阶段之间串联使用
    #[inline]
    pub(crate) fn pipe(&self) -> Pipe<T> {
        (self.supply)()
    }

    /// 创建一个新的拉取迭代器，从头开始消费此序列。
    pub fn iter(&self) -> Pipe<T> {
        trace!("open pipe: {}", self.desc);
        self.pipe()
    }

    /// 序列是否被静态标记为无限序列
    pub fn is_infinite(&self) -> bool {
        self.infinite
    }

    pub fn configs(&self) -> &'static [Config] {
        self.configs
    }

    /// 设置此序列及其后续派生序列的配置。
    pub fn with_configs(mut self, configs: &'static [Config]) -> Seq<T> {
        self.configs = configs;
        self
    }

    /// 流水线描述，例如：`of[3] -> filter -> limit(2)`
    pub fn describe(&self) -> String {
        self.desc.to_string()
    }

    pub(crate) fn assert_finite(&self, op: &'static str) -> Result<(), SeqErr> {
        if self.infinite {
            debug!("reject `{op}` on infinite sequence: {}", self.desc);
            Err(SeqErr::finiteness_violation::<T>(op))
        } else {
            Ok(())
        }
    }

    pub(crate) fn bulk(&self) -> Option<&Bulk<T>> {
        if use_fast_path(self.configs) { self.bulk.as_ref() } else { None }
    }
}

impl<T: 'static> IntoIterator for Seq<T> {
    type Item = T;
    type IntoIter = Pipe<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: 'static> IntoIterator for &Seq<T> {
    type Item = T;
    type IntoIter = Pipe<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Debug for Seq<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seq")
            .field("pipeline", &self.desc.to_string())
            .field("infinite", &self.infinite)
            .field("configs", &self.configs)
            .finish()
    }
}
