use num_bigint::BigUint;

use crate::codec;

/// N個の非負整数を1つの非負整数に畳み込む。
///
/// 1巡ごとに隣接する組 (2i, 2i+1) を [`codec::encode`] で結合して長さを
/// 半減させ、要素数が奇数なら余りの1個を次の巡へそのまま持ち越す。
/// 結合木の形は N のみで決まり、値には依存しない。
///
/// 呼び出し側のスライスは変更しない（作業バッファへ1回だけ複製し、
/// 以後はその中で縮約する）。
///
/// N = 0 は契約違反（panic）。
pub fn pack(values: &[BigUint]) -> BigUint {
    assert!(!values.is_empty(), "pack requires at least one value");

    let mut work = values.to_vec();
    let mut len = work.len();

    while len > 1 {
        let pairs = len / 2;
        for i in 0..pairs {
            let folded = codec::encode(&work[2 * i], &work[2 * i + 1]);
            work[i] = folded;
        }
        if len % 2 == 1 {
            // 奇数の余りは複製せず所有権ごと前方へ詰める
            work.swap(pairs, len - 1);
            len = pairs + 1;
        } else {
            len = pairs;
        }
    }

    work.swap_remove(0)
}

/// ネイティブ幅整数版の [`pack`]。BigUint に変換して委譲するだけの薄い層。
pub fn pack_u64(values: &[u64]) -> BigUint {
    assert!(!values.is_empty(), "pack requires at least one value");

    let values: Vec<BigUint> = values.iter().map(|&v| BigUint::from(v)).collect();
    pack(&values)
}

/// [`pack`] の逆変換。1つの整数を count 個の非負整数へ分解し、
/// 呼び出し側が用意した out の先頭 count 要素へ書き込む。
///
/// count = 0、および out の容量不足は契約違反（panic）。
pub fn unpack(packed: &BigUint, count: usize, out: &mut [BigUint]) {
    assert!(count >= 1, "unpack requires count >= 1");
    assert!(out.len() >= count, "output slice shorter than count");

    unpack_into(packed, &mut out[..count]);
}

/// 出力を所有して返す版の [`unpack`]。
pub fn unpack_vec(packed: &BigUint, count: usize) -> Vec<BigUint> {
    assert!(count >= 1, "unpack requires count >= 1");

    let mut out = vec![BigUint::ZERO; count];
    unpack_into(packed, &mut out);
    out
}

/// 再帰本体。out.len() ≥ 1 を前提とする。
fn unpack_into(z: &BigUint, out: &mut [BigUint]) {
    let n = out.len();
    if n == 1 {
        out[0] = z.clone();
        return;
    }

    let (x, y) = codec::decode(z);
    if n == 2 {
        out[0] = x;
        out[1] = y;
        return;
    }

    // pack の結合順をそのまま鏡写しにした分割幅。ここがずれると
    // 構造的には正しいが値の違う整数が黙って生成される。
    let left = left_width(n);
    let (lo, hi) = out.split_at_mut(left);
    unpack_into(&x, lo);
    unpack_into(&y, hi);
}

/// 左部分木が覆う要素数。n が2の冪なら n/2、
/// そうでなければ n を超えない最大の2の冪。
///
/// leading_zeros 由来の純粋な整数演算なので、分割構造は全プラットフォームで
/// 一致する。
pub fn left_width(n: usize) -> usize {
    debug_assert!(n >= 2);
    if n.is_power_of_two() {
        n / 2
    } else {
        1 << (usize::BITS - 1 - n.leading_zeros())
    }
}
