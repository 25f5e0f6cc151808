use num_bigint::BigUint;
use pairtree::*;
use std::env;
use std::fs::File;
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

fn print_usage() {
    eprintln!("平衡ペアリング木による N整数⇔1整数 全単射");
    eprintln!();
    eprintln!("使い方:");
    eprintln!("  pairtree pack <v1> <v2> ...      整数列を1つの整数へ畳み込む");
    eprintln!("  pairtree unpack <z> <n>          整数 z を n 個の整数へ分解する");
    eprintln!("  pairtree stress <n>              [1..=n] の畳み込み→復元を計測");
    eprintln!("  pairtree verify <start> <end>    タプル幅範囲のラウンドトリップ検証");
    eprintln!();
    eprintln!("stress / verify の結果は output/ フォルダに保存されます。");
    eprintln!();
    eprintln!("例:");
    eprintln!("  pairtree pack 1 2 3 4 5 6        6要素の畳み込み");
    eprintln!("  pairtree unpack 5 2              5 を2要素に分解 → 1, 2");
    eprintln!("  pairtree stress 1000000          歴史的ストレスケース (100万要素)");
    eprintln!("  pairtree verify 1 512            幅1〜512を並列検証");
}

fn output_dir() -> PathBuf {
    let dir = PathBuf::from("output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn timestamp() -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let s = now % 60;
    let m = (now / 60) % 60;
    let h = (now / 3600) % 24;
    let days = now / 86400;
    let y = 1970 + days / 365;
    let d = days % 365;
    format!("{:04}{:03}_{:02}{:02}{:02}", y, d, h, m, s)
}

fn format_big(n: &BigUint) -> String {
    let s = n.to_string();
    if s.len() <= 50 {
        s
    } else {
        format!("{}...{} ({}桁)", &s[..20], &s[s.len() - 20..], s.len())
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "pack" => cmd_pack(&args[2..]),
        "unpack" => cmd_unpack(&args[2..]),
        "stress" => cmd_stress(&args[2..]),
        "verify" => cmd_verify(&args[2..]),
        _ => {
            eprintln!("不明なコマンド: {}", args[1]);
            print_usage();
        }
    }
}

fn parse_big(s: &str) -> BigUint {
    BigUint::from_str(s).unwrap_or_else(|_| {
        eprintln!("数値を解析できません: {}", s);
        std::process::exit(1);
    })
}

fn parse_count(s: &str) -> usize {
    s.parse::<usize>().unwrap_or_else(|_| {
        eprintln!("個数を解析できません: {}", s);
        std::process::exit(1);
    })
}

fn cmd_pack(args: &[String]) {
    if args.is_empty() {
        eprintln!("使い方: pairtree pack <v1> <v2> ...");
        return;
    }

    let values: Vec<BigUint> = args.iter().map(|s| parse_big(s)).collect();

    let timer = Instant::now();
    let packed = pack(&values);
    let elapsed = timer.elapsed();

    println!("n = {}", values.len());
    println!("z = {}", packed);
    println!("ビット長 = {}", packed.bits());
    println!("計算時間 = {:?}", elapsed);
}

fn cmd_unpack(args: &[String]) {
    if args.len() < 2 {
        eprintln!("使い方: pairtree unpack <z> <n>");
        return;
    }

    let z = parse_big(&args[0]);
    let n = parse_count(&args[1]);
    if n == 0 {
        eprintln!("n は 1 以上が必要です");
        std::process::exit(1);
    }

    let timer = Instant::now();
    let values = unpack_vec(&z, n);
    let elapsed = timer.elapsed();

    for (i, v) in values.iter().enumerate() {
        println!("[{}] {}", i, v);
    }
    println!("計算時間 = {:?}", elapsed);
}

fn cmd_stress(args: &[String]) {
    if args.is_empty() {
        eprintln!("使い方: pairtree stress <n>");
        return;
    }

    let n = parse_count(&args[0]);
    if n == 0 {
        eprintln!("n は 1 以上が必要です");
        std::process::exit(1);
    }

    println!("ストレス実行: [1..={}] の畳み込み→復元", n);

    let values: Vec<BigUint> = (1..=n as u64).map(BigUint::from).collect();

    eprint!("畳み込み中... ");
    let timer = Instant::now();
    let packed = pack(&values);
    let pack_elapsed = timer.elapsed();
    eprintln!("完了 ({:?})", pack_elapsed);

    println!("z = {}", format_big(&packed));
    println!("ビット長 = {}", packed.bits());

    eprint!("復元中... ");
    let timer = Instant::now();
    let restored = unpack_vec(&packed, n);
    let unpack_elapsed = timer.elapsed();
    eprintln!("完了 ({:?})", unpack_elapsed);

    let exact = restored == values;
    println!("一致 = {}", if exact { "はい" } else { "いいえ" });

    // サマリー保存
    let filename = format!("stress_n{}_{}.txt", n, timestamp());
    let path = output_dir().join(&filename);
    if let Ok(mut f) = File::create(&path) {
        writeln!(f, "# pairtree stress").ok();
        writeln!(f, "n = {}", n).ok();
        writeln!(f, "packed_bits = {}", packed.bits()).ok();
        writeln!(f, "pack_elapsed = {:?}", pack_elapsed).ok();
        writeln!(f, "unpack_elapsed = {:?}", unpack_elapsed).ok();
        writeln!(f, "exact = {}", exact).ok();
        println!("\n保存: {}", path.display());
    }

    if !exact {
        std::process::exit(1);
    }
}

fn cmd_verify(args: &[String]) {
    if args.len() < 2 {
        eprintln!("使い方: pairtree verify <start> <end>");
        return;
    }

    let start = parse_count(&args[0]);
    let end = parse_count(&args[1]);
    if start == 0 {
        eprintln!("start は 1 以上が必要です");
        std::process::exit(1);
    }

    let num_threads = rayon::current_num_threads();
    println!("幅範囲検証: [{}, {}] ({}スレッド並列)", start, end, num_threads);
    println!();

    let timer = Instant::now();
    let last_print = std::sync::Mutex::new(Instant::now());
    let result = verify_widths_parallel(start, end, |done, total| {
        let now = Instant::now();
        if let Ok(mut lp) = last_print.try_lock() {
            if now.duration_since(*lp).as_millis() >= 500 {
                let elapsed = timer.elapsed();
                let pct = done as f64 / total as f64 * 100.0;
                eprint!(
                    "\x1b[2K\r  [{:.1}s] {}/{} ({:.1}%)",
                    elapsed.as_secs_f64(),
                    done,
                    total,
                    pct
                );
                *lp = now;
            }
        }
    });
    let elapsed = timer.elapsed();

    eprintln!();
    println!("--- 結果 ---");
    println!("検証した幅の数      = {}", result.total_checked);
    println!("全て成立            = {}", if result.all_passed { "はい" } else { "いいえ" });
    println!("最大ビット長        = {} (幅={})", result.max_packed_bits, result.max_packed_bits_width);
    println!("計算時間            = {:?}", elapsed);

    if !result.failures.is_empty() {
        println!("失敗した幅          = {} 個", result.failures.len());
        for w in &result.failures[..result.failures.len().min(10)] {
            println!("  {}", w);
        }
    }

    // 結果保存
    let filename = format!("verify_w{}-{}_{}.txt", start, end, timestamp());
    let path = output_dir().join(&filename);
    if let Ok(mut f) = File::create(&path) {
        writeln!(f, "# pairtree verify").ok();
        writeln!(f, "range = [{}, {}]", start, end).ok();
        writeln!(f, "threads = {}", num_threads).ok();
        writeln!(f, "total_checked = {}", result.total_checked).ok();
        writeln!(f, "all_passed = {}", result.all_passed).ok();
        writeln!(f, "max_packed_bits = {}", result.max_packed_bits).ok();
        writeln!(f, "max_packed_bits_width = {}", result.max_packed_bits_width).ok();
        writeln!(f, "failures = {}", result.failures.len()).ok();
        if !result.failures.is_empty() {
            writeln!(f).ok();
            writeln!(f, "# 失敗した幅:").ok();
            for w in &result.failures {
                writeln!(f, "{}", w).ok();
            }
        }
        writeln!(f).ok();
        writeln!(f, "elapsed = {:?}", elapsed).ok();
        println!("\n保存: {}", path.display());
    }

    if !result.all_passed {
        std::process::exit(1);
    }
}
