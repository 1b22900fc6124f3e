use std::collections::HashMap;

use super::contig::Contig;

/// 一条 scaffold：contig 的有序链，id 为创始 contig 的 id。
/// 不持有 contig 本体，只持有 arena 槽位编号。
#[derive(Debug, Clone)]
pub struct Scaffold {
    pub id: String,
    pub contigs: Vec<usize>,
}

/// contig/scaffold 的 arena 注册表，也是流水线各阶段共享的上下文对象。
///
/// - `contigs[i]` 创建后永不移除；scaffold 槽位 `scaffolds[i]` 与之平行，
///   槽位 i 的 scaffold 以 contig i 为创始成员，被并掉后置 None。
/// - 不变式：活跃 scaffold 恰好划分全部 contig（每个 contig 任意时刻
///   属于且只属于一个活跃 scaffold）。
/// - 活跃 scaffold 按槽位序（即 contig 输入序）迭代，输出顺序因此确定。
#[derive(Debug, Default)]
pub struct Assembly {
    contigs: Vec<Contig>,
    by_id: HashMap<String, usize>,
    scaffolds: Vec<Option<Scaffold>>,
    active: usize,
}

impl Assembly {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一条 contig，同时为它创建单成员 scaffold。
    /// 重复 id 静默覆盖查找表中的旧条目；旧 contig 及其 scaffold 保留。
    pub fn push_contig(&mut self, id: String, seq: Vec<u8>) -> usize {
        let ix = self.contigs.len();
        self.by_id.insert(id.clone(), ix);
        self.contigs.push(Contig::new(id.clone(), seq, ix));
        self.scaffolds.push(Some(Scaffold {
            id,
            contigs: vec![ix],
        }));
        self.active += 1;
        ix
    }

    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    pub fn lookup(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    #[inline]
    pub fn contig(&self, ix: usize) -> &Contig {
        &self.contigs[ix]
    }

    #[inline]
    pub fn contig_mut(&mut self, ix: usize) -> &mut Contig {
        &mut self.contigs[ix]
    }

    pub fn scaffold(&self, sid: usize) -> Option<&Scaffold> {
        self.scaffolds[sid].as_ref()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    /// 活跃 scaffold，按创始 contig 的输入顺序。
    pub fn active_scaffolds(&self) -> impl Iterator<Item = &Scaffold> {
        self.scaffolds.iter().filter_map(|s| s.as_ref())
    }

    /// 整条 scaffold 翻转：成员顺序反转，每个成员的方向标志取反。
    pub fn reverse_scaffold(&mut self, sid: usize) {
        if let Some(mut sc) = self.scaffolds[sid].take() {
            sc.contigs.reverse();
            for &ix in &sc.contigs {
                self.contigs[ix].reverse();
            }
            self.scaffolds[sid] = Some(sc);
        }
    }

    /// 把 right 的 contig 链拼接到 left 尾部，改写成员归属，注销 right。
    pub fn merge_scaffolds(&mut self, left: usize, right: usize) {
        debug_assert_ne!(left, right);
        if let Some(rs) = self.scaffolds[right].take() {
            for &ix in &rs.contigs {
                self.contigs[ix].scaffold = left;
            }
            if let Some(ls) = self.scaffolds[left].as_mut() {
                ls.contigs.extend(rs.contigs);
            }
            self.active -= 1;
        }
    }

    /// 按链序拼出 scaffold 的最终序列，反向成员取反向互补。
    pub fn merged_seq(&self, sc: &Scaffold) -> Vec<u8> {
        let mut out = Vec::new();
        for &ix in &sc.contigs {
            out.extend(self.contigs[ix].oriented_seq());
        }
        out
    }
}
