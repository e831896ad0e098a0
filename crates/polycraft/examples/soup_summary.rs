//! Decompose a few random soups and print the longest polylines.
//!
//! Usage:
//!   cargo run -p polycraft --example soup_summary -- [seed]
//!
//! Prints per mode: segment count, polyline count, closed count and the top 3.

use polycraft::api::{audit, craft, kept_segments, random_walk_soup, ClassifyMode, DecomposeCfg, SoupCfg};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(7);
    let segments = random_walk_soup(SoupCfg::default(), seed);
    println!("seed={seed} segments={}", segments.len());

    for mode in [ClassifyMode::IncludeBranches, ClassifyMode::ExcludeThenReclassify] {
        let cfg = DecomposeCfg::with_mode(mode);
        let set = match craft(&segments, cfg) {
            Ok(set) => set,
            Err(e) => {
                eprintln!("{mode:?}: {e}");
                continue;
            }
        };
        let consistent = audit(&kept_segments(&segments, cfg), &set).is_consistent();
        println!(
            "{mode:?}: polylines={} closed={} total={:.3} consistent={consistent}",
            set.len(),
            set.closed_count(),
            set.total_length()
        );
        for line in set.iter().take(3) {
            println!("  {line}");
        }
    }
}
