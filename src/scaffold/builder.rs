//! 贪心合并：按排名顺序单趟消费候选连接，不回溯。
//!
//! 每个 contig 端点只能被消费一次（free → consumed，单向不可逆）；
//! 同一 scaffold 内部的候选一律跳过，保证不成环。
//! 此阶段读写共享的 contig/scaffold 状态，依赖候选的严格顺序，不可并行。

use super::rank::{JoinKind, JointOverlap};
use crate::model::assembly::Assembly;

/// 依次应用候选连接。活跃 scaffold 只剩一条时提前结束。
pub fn build_scaffolds(asm: &mut Assembly, candidates: &[JointOverlap]) {
    for cand in candidates {
        if asm.active_count() <= 1 {
            break;
        }

        // 票表里可能出现 contig 集合之外的 id（overlaps 与 contigs 不配套）
        let (Some(l_ix), Some(r_ix)) = (asm.lookup(&cand.left), asm.lookup(&cand.right)) else {
            continue;
        };

        let l_sid = asm.contig(l_ix).scaffold;
        let r_sid = asm.contig(r_ix).scaffold;
        if l_sid == r_sid {
            continue;
        }

        // 先把两个命名 contig 归正到各自 scaffold 的正方向；
        // 端点可用标志描述物理端点，不随翻转交换。
        // 即使随后的可用性检查失败，这两次翻转也保留。
        if asm.contig(l_ix).reversed {
            asm.reverse_scaffold(l_sid);
        }
        if asm.contig(r_ix).reversed {
            asm.reverse_scaffold(r_sid);
        }

        match cand.kind {
            JoinKind::EndStart => {
                if !asm.contig(l_ix).end_free || !asm.contig(r_ix).start_free {
                    continue;
                }
                asm.contig_mut(l_ix).end_free = false;
                asm.contig_mut(r_ix).start_free = false;
            }
            JoinKind::EndEnd => {
                if !asm.contig(l_ix).end_free || !asm.contig(r_ix).end_free {
                    continue;
                }
                asm.contig_mut(l_ix).end_free = false;
                asm.contig_mut(r_ix).end_free = false;
                // 右链整体调头，让它的终点朝向接缝
                asm.reverse_scaffold(r_sid);
            }
            JoinKind::StartStart => {
                if !asm.contig(l_ix).start_free || !asm.contig(r_ix).start_free {
                    continue;
                }
                asm.contig_mut(l_ix).start_free = false;
                asm.contig_mut(r_ix).start_free = false;
                // 左链调头，让它的起点变成接缝端
                asm.reverse_scaffold(l_sid);
            }
        }

        asm.merge_scaffolds(l_sid, r_sid);
    }
}
