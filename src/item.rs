//! 常用的元素级函数，可直接作为累加器、映射或谓词传入序列操作。

use std::ops::{Add, Mul};

/// 使用`+`累加两个参数
pub fn add<T: Add<Output = T>>(a: T, b: T) -> T {
    a + b
}

/// 使用`*`累乘两个参数
pub fn multiply<T: Mul<Output = T>>(a: T, b: T) -> T {
    a * b
}

/// 参数加一
pub fn increment<T: Add<Output = T> + From<u8>>(a: T) -> T {
    a + T::from(1)
}

/// 是否为类型的默认值（零值）
pub fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}
