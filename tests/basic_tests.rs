use num_bigint::BigUint;
use num_traits::Zero;
use pairtree::*;

/// ラウンドトリップ検証ヘルパー
fn verify_roundtrip(values: &[u64]) {
    let tuple: Vec<BigUint> = values.iter().map(|&v| BigUint::from(v)).collect();
    let packed = pack(&tuple);
    let restored = unpack_vec(&packed, tuple.len());

    assert_eq!(
        restored, tuple,
        "roundtrip mismatch for input {:?}: packed={}",
        values, packed
    );
}

// ===== 素ペアリング符号 =====

#[test]
fn test_codec_base_pair() {
    // encode(1,2) = 2² + 1 = 5、decode(5) = (1,2)
    let z = encode(&BigUint::from(1u64), &BigUint::from(2u64));
    assert_eq!(z, BigUint::from(5u64));

    let (x, y) = decode(&z);
    assert_eq!(x, BigUint::from(1u64));
    assert_eq!(y, BigUint::from(2u64));
}

#[test]
fn test_codec_equal_operands() {
    // x = y は「y ≤ x」の枝に入る: z = x² + x + y
    let z = encode(&BigUint::from(4u64), &BigUint::from(4u64));
    assert_eq!(z, BigUint::from(24u64));

    let (x, y) = decode(&z);
    assert_eq!(x, BigUint::from(4u64));
    assert_eq!(y, BigUint::from(4u64));
}

#[test]
fn test_codec_non_negative_outputs() {
    for z in 0u64..=500 {
        let (x, y) = decode(&BigUint::from(z));
        // BigUint なので負にはなり得ないが、復元→再符号の一致で全域性を確認
        assert_eq!(encode(&x, &y), BigUint::from(z), "re-encode mismatch for z={}", z);
    }
}

// ===== 畳み込み/復元の具体ケース =====

#[test]
fn test_roundtrip_1_to_6() {
    verify_roundtrip(&[1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_roundtrip_69_420_1234() {
    verify_roundtrip(&[69, 420, 1234]);
}

#[test]
fn test_roundtrip_odd_carry() {
    // 奇数幅: 最後の要素がそのまま次巡へ持ち越される経路
    verify_roundtrip(&[2, 3, 1]);
}

#[test]
fn test_roundtrip_with_zeros() {
    verify_roundtrip(&[0, 0, 0, 0]);
    verify_roundtrip(&[0, 1, 0, 2, 0]);
    verify_roundtrip(&[1000000, 0, 1]);
}

#[test]
fn test_single_value_identity() {
    let v = BigUint::from(123456789u64);
    assert_eq!(pack(std::slice::from_ref(&v)), v);
    assert_eq!(unpack_vec(&v, 1), vec![v]);
}

#[test]
fn test_pack_zero_tuple() {
    let zero = vec![BigUint::zero(); 8];
    let packed = pack(&zero);
    assert!(packed.is_zero());
    assert_eq!(unpack_vec(&packed, 8), zero);
}

// ===== 契約 =====

#[test]
#[should_panic(expected = "at least one value")]
fn test_pack_empty_is_contract_violation() {
    let _ = pack(&[]);
}

#[test]
#[should_panic(expected = "at least one value")]
fn test_pack_u64_empty_is_contract_violation() {
    let _ = pack_u64(&[]);
}

#[test]
#[should_panic(expected = "count >= 1")]
fn test_unpack_zero_count_is_contract_violation() {
    let _ = unpack_vec(&BigUint::from(5u64), 0);
}

// ===== 性質 =====

#[test]
fn test_determinism() {
    let tuple: Vec<BigUint> = (0..17u64).map(|i| BigUint::from(i * i + 1)).collect();
    let first = pack(&tuple);
    for _ in 0..3 {
        assert_eq!(pack(&tuple), first);
    }
}

#[test]
fn test_pack_input_unchanged() {
    let tuple: Vec<BigUint> = (1..=9u64).map(BigUint::from).collect();
    let before = tuple.clone();
    let _ = pack(&tuple);
    assert_eq!(tuple, before);
}

#[test]
fn test_order_sensitivity() {
    // タプルは順序付き: 並べ替えは別の整数に写る
    let a = pack_u64(&[1, 2, 3, 4]);
    let b = pack_u64(&[4, 3, 2, 1]);
    let c = pack_u64(&[1, 2, 4, 3]);
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_ne!(b, c);
}

#[test]
fn test_pack_u64_delegates() {
    let native = [7u64, 0, 99, 3, 12];
    let big: Vec<BigUint> = native.iter().map(|&v| BigUint::from(v)).collect();
    assert_eq!(pack_u64(&native), pack(&big));
}

#[test]
fn test_every_width_1_to_40() {
    // 全ての木形状（2の冪、奇数持ち越し、その混在）を踏む
    for n in 1u64..=40 {
        let values: Vec<u64> = (1..=n).collect();
        verify_roundtrip(&values);
    }
}

#[test]
fn test_width_values_independence() {
    // 木の形が値に依存しないこと: 同じ幅なら異なる値でも復元できる
    verify_roundtrip(&[5, 5, 5, 5, 5]);
    verify_roundtrip(&[0, 1000000000000, 1, 999, 2]);
    verify_roundtrip(&[u64::MAX, 0, u64::MAX, 1, u64::MAX]);
}
