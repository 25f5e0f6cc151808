use num_bigint::BigUint;

/// 2引数ペアリング符号。非負整数の組 (x, y) を1つの非負整数 z に写す全単射。
///
/// y > x なら z = y² + x、そうでなければ z = x² + x + y。
/// 非対称な割り当てにより、どちらの引数が大きかったかが z に残り、
/// 逆変換が補助情報なしで両方の値を復元できる。
pub fn encode(x: &BigUint, y: &BigUint) -> BigUint {
    if y > x {
        y * y + x
    } else {
        x * x + x + y
    }
}

/// [`encode`] の逆変換。z から元の組 (x, y) を復元する。
///
/// s = ⌊√z⌋, r = z − s² とする（0 ≤ r ≤ 2s）。
/// s > r なら大きかったのは第2引数で (x, y) = (r, s)、
/// そうでなければ (x, y) = (s, r − s)。
/// 非負の z に対して常に成功する（エラー経路なし）。
pub fn decode(z: &BigUint) -> (BigUint, BigUint) {
    let s = z.sqrt();
    let r = z - &s * &s;

    if s > r {
        (r, s)
    } else {
        let y = r - &s;
        (s, y)
    }
}
