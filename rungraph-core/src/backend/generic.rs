use super::Element;

pub(super) fn map<T: Element, F: Fn(T) -> T>(x: &[T], f: F) -> Vec<T> {
    x.iter().map(|&v| f(v)).collect()
}

pub(super) fn zip<T: Element, F: Fn(T, T) -> T>(a: &[T], b: &[T], f: F) -> Vec<T> {
    a.iter().zip(b.iter()).map(|(&x, &y)| f(x, y)).collect()
}

pub(super) fn accumulate<T: Element>(acc: &mut [T], x: &[T]) {
    for (a, &v) in acc.iter_mut().zip(x.iter()) {
        *a = *a + v;
    }
}

pub(super) fn sum<T: Element>(x: &[T]) -> T {
    x.iter().fold(T::zero(), |acc, &v| acc + v)
}

pub(super) fn matmul<T: Element>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); m * n];
    for i in 0..m {
        for j in 0..n {
            let mut acc = T::zero();
            for p in 0..k {
                acc = acc + a[i * k + p] * b[p * n + j];
            }
            out[i * n + j] = acc;
        }
    }
    out
}
