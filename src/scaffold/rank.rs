//! 候选连接排序：把三张票表摊平成一个列表，
//! 按票数降序、左 id 升序、右 id 升序排序。
//! 这个顺序决定合并的优先级，必须完全可复现。

use super::vote::VoteTables;

/// 邻接类型：投票支持连接两个 contig 的哪一对物理端点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    EndStart,
    EndEnd,
    StartStart,
}

/// 一条候选连接，票表上的只读视图。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointOverlap {
    pub left: String,
    pub right: String,
    pub kind: JoinKind,
    pub votes: u32,
}

/// 摊平并排序。(votes, left, right) 完全相同的跨表并列项
/// 按 end→start、end→end、start→start 的摊平顺序保持稳定。
pub fn rank_candidates(tables: &VoteTables) -> Vec<JointOverlap> {
    let mut out: Vec<JointOverlap> = Vec::with_capacity(tables.num_entries());

    for ((left, right), &votes) in &tables.end_start {
        out.push(JointOverlap {
            left: left.clone(),
            right: right.clone(),
            kind: JoinKind::EndStart,
            votes,
        });
    }
    for ((left, right), &votes) in &tables.end_end {
        out.push(JointOverlap {
            left: left.clone(),
            right: right.clone(),
            kind: JoinKind::EndEnd,
            votes,
        });
    }
    for ((left, right), &votes) in &tables.start_start {
        out.push(JointOverlap {
            left: left.clone(),
            right: right.clone(),
            kind: JoinKind::StartStart,
            votes,
        });
    }

    out.sort_by(|a, b| {
        b.votes
            .cmp(&a.votes)
            .then_with(|| a.left.cmp(&b.left))
            .then_with(|| a.right.cmp(&b.right))
    });
    out
}
