//! 重叠分类：判断同一条 read 上的两条比对记录暗示哪种 contig 邻接。
//!
//! 三个纯谓词，分别对应 end→start、end→end、start→start 三种邻接。
//! 全部只读、无副作用；同一 contig 的两条比对一律判否。
//! 坐标运算使用 i64，比例运算使用 f64，越界输入只会判否，不会回绕。

use crate::io::paf::{Overlap, Strand};

/// 比对锚点到 read 两端的最大相对距离
pub const READ_THRESHOLD: f64 = 0.1;
/// 比对到 contig 端点的最大相对距离
pub const CONTIG_THRESHOLD: f64 = 0.4;
/// end→end 要求的最小合计匹配长度比例
pub const MATCH_THRESHOLD: f64 = 0.7;

#[inline]
fn frac(num: u32, den: u32) -> f64 {
    f64::from(num) / f64::from(den)
}

/// 左 contig 的终点接右 contig 的起点：同向、read 坐标顺序一致、
/// 缺口能被 read 覆盖、两端各自贴近对应的 contig 边界和 read 边界。
pub fn is_end_to_start(left: &Overlap, right: &Overlap) -> bool {
    if left.contig_id == right.contig_id {
        return false;
    }
    if left.strand != right.strand {
        return false;
    }

    match left.strand {
        Strand::Forward => {
            if left.read_start > right.read_start || left.read_end > right.read_end {
                return false;
            }
            // 左 contig 尾部未覆盖段加右 contig 头部偏移要装进这条 read
            if i64::from(right.contig_start) + i64::from(left.contig_len)
                - i64::from(left.contig_end)
                > i64::from(left.read_len)
            {
                return false;
            }
        }
        Strand::Reverse => {
            if right.read_start > left.read_start || right.read_end > left.read_end {
                return false;
            }
            if i64::from(left.contig_start) + i64::from(right.contig_len)
                - i64::from(right.contig_end)
                > i64::from(left.read_len)
            {
                return false;
            }
        }
    }

    if frac(left.contig_end, left.contig_len) < 1.0 - CONTIG_THRESHOLD {
        return false;
    }
    if frac(right.contig_start, right.contig_len) > CONTIG_THRESHOLD {
        return false;
    }

    match left.strand {
        Strand::Forward => {
            frac(left.read_start, left.read_len) <= READ_THRESHOLD
                && frac(right.read_end, right.read_len) >= 1.0 - READ_THRESHOLD
        }
        Strand::Reverse => {
            frac(right.read_start, right.read_len) <= READ_THRESHOLD
                && frac(left.read_end, left.read_len) >= 1.0 - READ_THRESHOLD
        }
    }
}

/// 两条比对在 read 上必须整体错开（一条的区间严格在另一条之前）。
#[inline]
fn read_intervals_shifted(a: &Overlap, b: &Overlap) -> bool {
    (a.read_start < b.read_start && a.read_end < b.read_end)
        || (b.read_start < a.read_start && b.read_end < a.read_end)
}

/// 一条比对贴近 read 起点、另一条贴近 read 终点。
#[inline]
fn anchored_at_opposite_read_ends(a: &Overlap, b: &Overlap) -> bool {
    (frac(a.read_start, a.read_len) <= READ_THRESHOLD
        && frac(b.read_end, b.read_len) > 1.0 - READ_THRESHOLD)
        || (frac(b.read_start, b.read_len) <= READ_THRESHOLD
            && frac(a.read_end, a.read_len) > 1.0 - READ_THRESHOLD)
}

/// 两个 contig 的终点相接：异向、read 区间错开、两侧尾部合计能被 read
/// 覆盖、都贴近各自 contig 终点，且合计匹配长度达到阈值。
/// 三个谓词中唯一带匹配长度约束的一个，作为这种较弱构型的更强证据要求。
pub fn is_end_to_end(left: &Overlap, right: &Overlap) -> bool {
    if left.contig_id == right.contig_id {
        return false;
    }
    if left.strand == right.strand {
        return false;
    }
    if !read_intervals_shifted(left, right) {
        return false;
    }

    if i64::from(left.contig_len) - i64::from(left.contig_end) + i64::from(right.contig_len)
        - i64::from(right.contig_end)
        > i64::from(left.read_len)
    {
        return false;
    }

    if frac(left.contig_end, left.contig_len) < 1.0 - CONTIG_THRESHOLD {
        return false;
    }
    if frac(right.contig_end, right.contig_len) < 1.0 - CONTIG_THRESHOLD {
        return false;
    }

    if !anchored_at_opposite_read_ends(left, right) {
        return false;
    }

    (f64::from(left.match_len) + f64::from(right.match_len)) / f64::from(left.read_len)
        >= MATCH_THRESHOLD
}

/// 两个 contig 的起点相接：end→end 的镜像，锚在 contig 起点，
/// 无匹配长度约束。
pub fn is_start_to_start(left: &Overlap, right: &Overlap) -> bool {
    if left.contig_id == right.contig_id {
        return false;
    }
    if left.strand == right.strand {
        return false;
    }
    if !read_intervals_shifted(left, right) {
        return false;
    }

    if i64::from(left.contig_start) + i64::from(right.contig_start) > i64::from(left.read_len) {
        return false;
    }

    if frac(left.contig_start, left.contig_len) > CONTIG_THRESHOLD {
        return false;
    }
    if frac(right.contig_start, right.contig_len) > CONTIG_THRESHOLD {
        return false;
    }

    anchored_at_opposite_read_ends(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ov(
        read: &str,
        read_len: u32,
        read_start: u32,
        read_end: u32,
        strand: Strand,
        contig: &str,
        contig_len: u32,
        contig_start: u32,
        contig_end: u32,
        match_len: u32,
    ) -> Overlap {
        Overlap {
            read_id: read.to_string(),
            read_len,
            read_start,
            read_end,
            strand,
            contig_id: contig.to_string(),
            contig_len,
            contig_start,
            contig_end,
            num_matches: match_len,
            match_len,
        }
    }

    // read r1 跨过 c1 尾部与 c2 头部的典型 end→start 构型
    fn end_start_pair() -> (Overlap, Overlap) {
        let left = ov("r1", 1000, 0, 480, Strand::Forward, "c1", 5000, 4520, 5000, 480);
        let right = ov("r1", 1000, 520, 1000, Strand::Forward, "c2", 4000, 0, 480, 480);
        (left, right)
    }

    #[test]
    fn end_to_start_accepts_spanning_read() {
        let (left, right) = end_start_pair();
        assert!(is_end_to_start(&left, &right));
        // 反过来两端锚点都不满足
        assert!(!is_end_to_start(&right, &left));
    }

    #[test]
    fn end_to_start_reverse_strand_mirror() {
        // 负链构型：read 坐标次序对调，缺口检查换用左 contig 的起点偏移
        let left = ov("r1", 1000, 600, 1000, Strand::Reverse, "c1", 500, 20, 500, 400);
        let right = ov("r1", 1000, 0, 380, Strand::Reverse, "c2", 400, 0, 380, 380);
        assert!(is_end_to_start(&left, &right));
    }

    #[test]
    fn end_to_start_rejects_same_contig() {
        let (left, mut right) = end_start_pair();
        right.contig_id = "c1".to_string();
        assert!(!is_end_to_start(&left, &right));
    }

    #[test]
    fn end_to_start_rejects_mixed_strands() {
        let (left, mut right) = end_start_pair();
        right.strand = Strand::Reverse;
        assert!(!is_end_to_start(&left, &right));
    }

    #[test]
    fn end_to_start_rejects_gap_longer_than_read() {
        let (mut left, right) = end_start_pair();
        // 左比对远离 contig 尾部，缺口超过 read 长度
        left.contig_end = 3200;
        left.contig_len = 5000;
        assert!(!is_end_to_start(&left, &right));
    }

    #[test]
    fn end_to_start_rejects_interior_alignment() {
        let (left, mut right) = end_start_pair();
        // 右比对落在 contig 中部而不是头部
        right.contig_start = 2000;
        right.contig_end = 2480;
        assert!(!is_end_to_start(&left, &right));
    }

    #[test]
    fn end_to_start_rejects_unanchored_read_ends() {
        let (mut left, right) = end_start_pair();
        // 左比对从 read 中部才开始
        left.read_start = 300;
        assert!(!is_end_to_start(&left, &right));
    }

    fn end_end_pair() -> (Overlap, Overlap) {
        let left = ov("r1", 1000, 0, 480, Strand::Forward, "c1", 5000, 4520, 5000, 480);
        let right = ov("r1", 1000, 520, 1000, Strand::Reverse, "c2", 4000, 3520, 4000, 480);
        (left, right)
    }

    #[test]
    fn end_to_end_accepts_opposite_strand_tails() {
        let (left, right) = end_end_pair();
        assert!(is_end_to_end(&left, &right));
        // 对称构型：换序仍然成立
        assert!(is_end_to_end(&right, &left));
    }

    #[test]
    fn end_to_end_requires_opposite_strands() {
        let (left, mut right) = end_end_pair();
        right.strand = Strand::Forward;
        assert!(!is_end_to_end(&left, &right));
    }

    #[test]
    fn end_to_end_requires_match_length() {
        let (mut left, mut right) = end_end_pair();
        left.match_len = 200;
        right.match_len = 200;
        // 合计 400/1000 < 0.7
        assert!(!is_end_to_end(&left, &right));
    }

    #[test]
    fn end_to_end_rejects_overlapping_read_intervals() {
        let (mut left, right) = end_end_pair();
        left.read_start = 520;
        left.read_end = 1000;
        assert!(!is_end_to_end(&left, &right));
    }

    fn start_start_pair() -> (Overlap, Overlap) {
        let left = ov("r1", 1000, 0, 480, Strand::Forward, "c1", 5000, 0, 480, 480);
        let right = ov("r1", 1000, 520, 1000, Strand::Reverse, "c2", 4000, 0, 480, 480);
        (left, right)
    }

    #[test]
    fn start_to_start_accepts_opposite_strand_heads() {
        let (left, right) = start_start_pair();
        assert!(is_start_to_start(&left, &right));
        assert!(is_start_to_start(&right, &left));
    }

    #[test]
    fn start_to_start_has_no_match_constraint() {
        let (mut left, mut right) = start_start_pair();
        left.match_len = 10;
        right.match_len = 10;
        assert!(is_start_to_start(&left, &right));
    }

    #[test]
    fn start_to_start_rejects_deep_contig_offsets() {
        let (mut left, right) = start_start_pair();
        // 比对起点离 contig 起点太远
        left.contig_start = 2500;
        left.contig_end = 2980;
        assert!(!is_start_to_start(&left, &right));
    }

    #[test]
    fn start_to_start_rejects_heads_longer_than_read() {
        let (mut left, mut right) = start_start_pair();
        // 600/5000 仍在 contig 阈值内，但 600+600 > 1000 装不进 read
        left.contig_start = 600;
        right.contig_start = 600;
        left.contig_len = 5000;
        right.contig_len = 5000;
        assert!(!is_start_to_start(&left, &right));
    }
}
