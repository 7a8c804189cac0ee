//! 惰性求值、拉取式的序列处理库。
//!
//! 通过数据源创建[`Seq`]，串联`filter`、`map`、`limit`、`sorted`等中间操作构建流水线，
//! 最后由`for_each`、`reduce`、`collect_vec`等终结操作驱动求值：
//!
//! ```
//! use lazyseq::Seq;
//!
//! let evens = Seq::iterate(1, |x| x + 1).filter(|x| x % 2 == 0).map(|x| x * x).limit(3);
//! assert_eq!(evens.collect_vec(), Ok(vec![4, 16, 36]));
//!
//! // 无限序列无法排序
//! assert!(Seq::iterate(1, |x| x + 1).sorted().is_err());
//! ```

mod config;
mod err;
pub mod item;
mod kv;
mod macros;
mod op;
pub mod order;
mod pipe;
mod seq;
mod source;
mod terminal;

pub use config::Config;
pub use err::SeqErr;
pub use kv::Pair;
pub use pipe::Pipe;
pub use seq::Seq;

/// 可能失败的中间操作的结果
pub type SeqRes<T> = Result<Seq<T>, SeqErr>;
