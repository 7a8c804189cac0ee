/// 使用字面值创建有限序列，用法与`vec!`一致。
///
/// ```
/// use lazyseq::seq;
///
/// assert_eq!(seq![1, 2, 3].count(), Ok(3));
/// assert_eq!(seq![].collect_vec(), Ok(Vec::<i32>::new()));
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::Seq::empty()
    };
    ($($elem:expr),+ $(,)?) => {
        $crate::Seq::of([$($elem),+])
    };
}
