use num_bigint::BigUint;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::tree;

/// 幅範囲検証の結果
#[derive(Debug, Clone)]
pub struct VerifyResult {
    /// 検証したタプル幅の総数
    pub total_checked: u64,
    /// 全幅でラウンドトリップが成立したか
    pub all_passed: bool,
    /// 失敗したタプル幅
    pub failures: Vec<usize>,
    /// 観測した畳み込み結果の最大ビット長
    pub max_packed_bits: u64,
    /// 最大ビット長を与えたタプル幅
    pub max_packed_bits_width: usize,
}

/// 幅 n の検証用タプル [1, 2, …, n]
fn sequential_tuple(n: usize) -> Vec<BigUint> {
    (1..=n as u64).map(BigUint::from).collect()
}

/// 幅 n を1件検証。成立すれば畳み込み結果のビット長を返す。
fn check_width(n: usize) -> Result<u64, usize> {
    let values = sequential_tuple(n);
    let packed = tree::pack(&values);
    let restored = tree::unpack_vec(&packed, n);
    if restored == values {
        Ok(packed.bits())
    } else {
        Err(n)
    }
}

/// [start, end] の全タプル幅でラウンドトリップを検証する（シングルスレッド版）。
/// progress_callback: (完了数, 総数) を定期的に呼ぶ。
pub fn verify_widths(
    start: usize,
    end: usize,
    progress_callback: impl Fn(u64, u64),
) -> VerifyResult {
    assert!(start >= 1, "width range must start at 1 or above");

    let total = if end >= start { (end - start + 1) as u64 } else { 0 };

    let mut total_checked = 0u64;
    let mut failures: Vec<usize> = Vec::new();
    let mut max_packed_bits = 0u64;
    let mut max_packed_bits_width = start;

    if total > 0 {
        for n in start..=end {
            match check_width(n) {
                Ok(bits) => {
                    if bits > max_packed_bits {
                        max_packed_bits = bits;
                        max_packed_bits_width = n;
                    }
                }
                Err(n) => failures.push(n),
            }

            total_checked += 1;
            if total_checked % 16 == 0 {
                progress_callback(total_checked, total);
            }
        }
    }

    progress_callback(total_checked, total);

    VerifyResult {
        total_checked,
        all_passed: failures.is_empty(),
        failures,
        max_packed_bits,
        max_packed_bits_width,
    }
}

/// [start, end] の全タプル幅でラウンドトリップを検証する（並列版）。
/// Rayon でチャンク分割して並列処理。
/// progress_callback: (完了数, 総数) を定期的に呼ぶ（スレッドセーフ）。
pub fn verify_widths_parallel(
    start: usize,
    end: usize,
    progress_callback: impl Fn(u64, u64) + Sync,
) -> VerifyResult {
    assert!(start >= 1, "width range must start at 1 or above");

    if end < start {
        return VerifyResult {
            total_checked: 0,
            all_passed: true,
            failures: Vec::new(),
            max_packed_bits: 0,
            max_packed_bits_width: start,
        };
    }

    let total = (end - start + 1) as u64;

    // チャンク分割: 各チャンク16幅。幅が大きいほど1件が重いので細かめに切る
    let chunk_size: usize = 16;
    let num_chunks = (end - start + 1).div_ceil(chunk_size);

    let global_done = AtomicU64::new(0);
    let global_max_bits = AtomicU64::new(0);
    let global_max_bits_width = Mutex::new(start);
    let global_failures: Mutex<Vec<usize>> = Mutex::new(Vec::new());

    (0..num_chunks).into_par_iter().for_each(|chunk_idx| {
        let chunk_start = start + chunk_idx * chunk_size;
        let chunk_end = std::cmp::min(chunk_start + chunk_size - 1, end);

        let mut local_max_bits = 0u64;
        let mut local_max_bits_width = chunk_start;
        let mut local_failures: Vec<usize> = Vec::new();
        let mut unreported = 0u64;

        for n in chunk_start..=chunk_end {
            match check_width(n) {
                Ok(bits) => {
                    if bits > local_max_bits {
                        local_max_bits = bits;
                        local_max_bits_width = n;
                    }
                }
                Err(n) => local_failures.push(n),
            }
            unreported += 1;

            // チャンク内でも定期的に進捗報告
            if unreported >= 4 {
                let done = global_done.fetch_add(unreported, Ordering::Relaxed) + unreported;
                progress_callback(done, total);
                unreported = 0;
            }
        }

        // 残りをグローバルに反映
        if unreported > 0 {
            let done = global_done.fetch_add(unreported, Ordering::Relaxed) + unreported;
            progress_callback(done, total);
        }

        // 最大ビット長を更新
        let prev_max = global_max_bits.load(Ordering::Relaxed);
        if local_max_bits > prev_max {
            global_max_bits.fetch_max(local_max_bits, Ordering::Relaxed);
            let mut guard = global_max_bits_width.lock().unwrap();
            if local_max_bits >= global_max_bits.load(Ordering::Relaxed) {
                *guard = local_max_bits_width;
            }
        }

        if !local_failures.is_empty() {
            global_failures.lock().unwrap().extend(local_failures);
        }
    });

    let total_checked = global_done.load(Ordering::Relaxed);
    let max_packed_bits = global_max_bits.load(Ordering::Relaxed);
    let max_packed_bits_width = *global_max_bits_width.lock().unwrap();
    let mut failures = global_failures.into_inner().unwrap();
    failures.sort_unstable();

    VerifyResult {
        total_checked,
        all_passed: failures.is_empty(),
        failures,
        max_packed_bits,
        max_packed_bits_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_widths_small() {
        let result = verify_widths(1, 24, |_, _| {});
        assert!(result.all_passed);
        assert!(result.failures.is_empty());
        assert_eq!(result.total_checked, 24);
        assert!(result.max_packed_bits > 0);
    }

    #[test]
    fn test_verify_parallel_matches_serial() {
        let serial = verify_widths(1, 40, |_, _| {});
        let parallel = verify_widths_parallel(1, 40, |_, _| {});

        assert_eq!(serial.total_checked, parallel.total_checked);
        assert_eq!(serial.all_passed, parallel.all_passed);
        assert_eq!(serial.max_packed_bits, parallel.max_packed_bits);
        assert_eq!(serial.max_packed_bits_width, parallel.max_packed_bits_width);
    }

    #[test]
    fn test_verify_empty_range() {
        let result = verify_widths_parallel(5, 4, |_, _| {});
        assert_eq!(result.total_checked, 0);
        assert!(result.all_passed);
    }
}
