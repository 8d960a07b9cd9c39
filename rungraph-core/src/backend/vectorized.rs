//! Lane-chunked kernels. Each loop body works on a fixed `[T; LANES]` block so
//! the compiler can keep it in vector registers; the tail is handled scalar.

use super::Element;

pub(super) const LANES: usize = 8;

pub(super) fn map<T: Element, F: Fn(T) -> T>(x: &[T], f: F) -> Vec<T> {
    let mut out = Vec::with_capacity(x.len());
    let chunks = x.chunks_exact(LANES);
    let tail = chunks.remainder();
    for chunk in chunks {
        let mut lane = [T::zero(); LANES];
        for (o, &v) in lane.iter_mut().zip(chunk) {
            *o = f(v);
        }
        out.extend_from_slice(&lane);
    }
    out.extend(tail.iter().map(|&v| f(v)));
    out
}

pub(super) fn zip<T: Element, F: Fn(T, T) -> T>(a: &[T], b: &[T], f: F) -> Vec<T> {
    let len = a.len().min(b.len());
    let (a, b) = (&a[..len], &b[..len]);
    let mut out = Vec::with_capacity(len);
    let full = len - len % LANES;
    for (ca, cb) in a[..full].chunks_exact(LANES).zip(b[..full].chunks_exact(LANES)) {
        let mut lane = [T::zero(); LANES];
        for i in 0..LANES {
            lane[i] = f(ca[i], cb[i]);
        }
        out.extend_from_slice(&lane);
    }
    out.extend(a[full..].iter().zip(&b[full..]).map(|(&x, &y)| f(x, y)));
    out
}

pub(super) fn accumulate<T: Element>(acc: &mut [T], x: &[T]) {
    let len = acc.len().min(x.len());
    let full = len - len % LANES;
    for (ca, cx) in acc[..full]
        .chunks_exact_mut(LANES)
        .zip(x[..full].chunks_exact(LANES))
    {
        for i in 0..LANES {
            ca[i] = ca[i] + cx[i];
        }
    }
    for (a, &v) in acc[full..len].iter_mut().zip(&x[full..len]) {
        *a = *a + v;
    }
}

/// Sums with one partial accumulator per lane. The association order differs
/// from the scalar loop, so results agree only up to rounding.
pub(super) fn sum<T: Element>(x: &[T]) -> T {
    let mut partial = [T::zero(); LANES];
    let chunks = x.chunks_exact(LANES);
    let tail = chunks.remainder();
    for chunk in chunks {
        for i in 0..LANES {
            partial[i] = partial[i] + chunk[i];
        }
    }
    let head = partial.iter().fold(T::zero(), |acc, &v| acc + v);
    tail.iter().fold(head, |acc, &v| acc + v)
}

/// i-k-j ordering: every output row is updated a full lane at a time while the
/// reduction over `k` keeps the same order as the scalar kernel.
pub(super) fn matmul<T: Element>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); m * n];
    for i in 0..m {
        let row = &mut out[i * n..(i + 1) * n];
        for p in 0..k {
            let scale = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (o, &bv) in row.iter_mut().zip(b_row) {
                *o = *o + scale * bv;
            }
        }
    }
    out
}
