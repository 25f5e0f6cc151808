//! 平衡ペアリング木による N整数タプル ⇔ 単一整数の全単射。
//!
//! 2引数の平方ペアリング符号（y > x なら y²+x、それ以外は x²+x+y）を
//! 葉とする決定的な平衡2分結合木で、N ≥ 1 個の非負整数を1個に畳み込み、
//! また正確に復元する。木の形は N のみの関数であり、
//! 復元側は補助情報なしで同じ分割を再現できる。

pub mod codec;
pub mod tree;
pub mod verify;

pub use codec::{decode, encode};
pub use tree::{left_width, pack, pack_u64, unpack, unpack_vec};
pub use verify::{verify_widths, verify_widths_parallel, VerifyResult};
