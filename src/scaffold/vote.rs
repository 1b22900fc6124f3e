//! 计票：把按 read 分组的比对记录两两送进分类器，
//! 按邻接类型累计 (左 contig, 右 contig) 的票数。
//!
//! 每组大小 n 产生 n·(n-1)/2 次分类，总代价为各组大小的平方和，
//! 是整条流水线的热点；组间互不共享状态，可并行。

use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::classify;
use crate::io::paf::Overlap;

pub type VoteKey = (String, String);

/// 三张票表，按 (左 id, 右 id) 有序键存储，展开顺序因此确定。
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTables {
    pub end_start: BTreeMap<VoteKey, u32>,
    pub end_end: BTreeMap<VoteKey, u32>,
    pub start_start: BTreeMap<VoteKey, u32>,
}

impl VoteTables {
    /// 三张表合计的条目数
    pub fn num_entries(&self) -> usize {
        self.end_start.len() + self.end_end.len() + self.start_start.len()
    }

    /// 把另一份票表按键相加并入，用于并行分组后的归并。
    pub fn merge(&mut self, other: VoteTables) {
        for (k, v) in other.end_start {
            *self.end_start.entry(k).or_insert(0) += v;
        }
        for (k, v) in other.end_end {
            *self.end_end.entry(k).or_insert(0) += v;
        }
        for (k, v) in other.start_start {
            *self.start_start.entry(k).or_insert(0) += v;
        }
    }

    /// 对一对比对按严格优先级分类，至多投出一票：
    /// end→start(a,b)、end→start(b,a)、end→end(a,b)、start→start(a,b)。
    fn vote_pair(&mut self, a: &Overlap, b: &Overlap) {
        if classify::is_end_to_start(a, b) {
            *self
                .end_start
                .entry((a.contig_id.clone(), b.contig_id.clone()))
                .or_insert(0) += 1;
        } else if classify::is_end_to_start(b, a) {
            *self
                .end_start
                .entry((b.contig_id.clone(), a.contig_id.clone()))
                .or_insert(0) += 1;
        } else if classify::is_end_to_end(a, b) {
            *self
                .end_end
                .entry((a.contig_id.clone(), b.contig_id.clone()))
                .or_insert(0) += 1;
        } else if classify::is_start_to_start(a, b) {
            *self
                .start_start
                .entry((a.contig_id.clone(), b.contig_id.clone()))
                .or_insert(0) += 1;
        }
    }
}

/// 同一 read 的记录必须在输入中连续（由上游排序或产出时保证）。
/// 返回每组的 [start, end) 范围。
fn group_ranges(overlaps: &[Overlap]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0usize;
    for i in 1..=overlaps.len() {
        if i < overlaps.len() && overlaps[i].read_id == overlaps[i - 1].read_id {
            continue;
        }
        ranges.push((start, i));
        start = i;
    }
    ranges
}

fn rate_group(tables: &mut VoteTables, group: &[Overlap]) {
    for j in 0..group.len() {
        for k in (j + 1)..group.len() {
            tables.vote_pair(&group[j], &group[k]);
        }
    }
}

/// 顺序计票。
pub fn rate_overlaps(overlaps: &[Overlap]) -> VoteTables {
    let mut tables = VoteTables::default();
    for (start, end) in group_ranges(overlaps) {
        rate_group(&mut tables, &overlaps[start..end]);
    }
    tables
}

/// 并行计票：各组在任务本地累计，最后按键归并，票数与顺序版完全一致。
/// threads <= 1 时退化为顺序版。合并阶段与此无关，始终串行。
pub fn rate_overlaps_parallel(overlaps: &[Overlap], threads: usize) -> Result<VoteTables> {
    if threads <= 1 {
        return Ok(rate_overlaps(overlaps));
    }
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let ranges = group_ranges(overlaps);
    let tables = pool.install(|| {
        ranges
            .par_iter()
            .fold(VoteTables::default, |mut acc, &(start, end)| {
                rate_group(&mut acc, &overlaps[start..end]);
                acc
            })
            .reduce(VoteTables::default, |mut a, b| {
                a.merge(b);
                a
            })
    });
    Ok(tables)
}

/// 计票结果的构建信息，随票表一起落盘。
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RateMeta {
    pub overlaps_file: Option<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

/// 落盘的计票结果：三张票表加构建信息，bincode 序列化。
/// rate 子命令产出；scaffold --votes 读回，跳过重复计票。
#[derive(Debug, Serialize, Deserialize)]
pub struct RatedVotes {
    pub tables: VoteTables,
    pub meta: RateMeta,
}

impl RatedVotes {
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let mut f = std::fs::File::create(path)?;
        bincode::serialize_into(&mut f, self)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let rated: Self = bincode::deserialize_from(f)?;
        Ok(rated)
    }
}
