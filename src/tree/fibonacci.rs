use std::sync::LazyLock;

const LEN: usize = 48;

/// The first 48 Fibonacci numbers, starting `0, 1, 1, 2`.
pub(super) static FIBONACCI: LazyLock<Vec<u64>> = LazyLock::new(|| {
    let mut table = Vec::with_capacity(LEN);
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..LEN {
        table.push(a);
        (a, b) = (b, a + b);
    }
    table
});
