//! 流水线驱动：读入 contig 与 overlap，计票、排序、贪心合并，
//! 最后按创始 contig 的输入顺序写出 scaffold 序列。

use anyhow::Result;
use std::io::Write;

pub mod builder;
pub mod classify;
pub mod rank;
pub mod vote;

use crate::io::fasta::{self, FastaReader};
use crate::io::paf::PafReader;
use crate::model::assembly::Assembly;
use crate::util::dna;

pub use rank::{JoinKind, JointOverlap};
pub use vote::{RateMeta, RatedVotes, VoteTables};

#[derive(Debug, Clone, Default)]
pub struct ScaffoldOpt {
    /// 计票阶段线程数；1 为顺序执行
    pub threads: usize,
    /// 已落盘的票表路径；给出时跳过计票
    pub votes: Option<String>,
}

/// 把 contig 记录装进 arena；重复 id 静默覆盖查找表中的旧条目。
pub fn read_contigs<R: std::io::BufRead>(reader: R) -> Result<Assembly> {
    let mut fa = FastaReader::new(reader);
    let mut asm = Assembly::new();
    while let Some(rec) = fa.next_record()? {
        asm.push_contig(rec.id, dna::normalize_seq(&rec.seq));
    }
    Ok(asm)
}

/// 完整流水线入口。
pub fn run(contigs_path: &str, overlaps_path: &str, out_path: &str, opt: &ScaffoldOpt) -> Result<()> {
    let fh = std::fs::File::open(contigs_path)
        .map_err(|e| anyhow::anyhow!("cannot open contigs FASTA '{}': {}", contigs_path, e))?;
    let mut asm = read_contigs(std::io::BufReader::new(fh))?;
    if asm.is_empty() {
        anyhow::bail!("contigs FASTA '{}' contains no sequences", contigs_path);
    }
    println!("contigs: {}", asm.len());

    let tables = if let Some(votes_path) = &opt.votes {
        let rated = RatedVotes::load_from_file(votes_path)
            .map_err(|e| anyhow::anyhow!("cannot load vote tables from '{}': {}", votes_path, e))?;
        rated.tables
    } else {
        let fh = std::fs::File::open(overlaps_path)
            .map_err(|e| anyhow::anyhow!("cannot open overlaps file '{}': {}", overlaps_path, e))?;
        let overlaps = PafReader::new(std::io::BufReader::new(fh)).read_all()?;
        println!("overlaps: {}", overlaps.len());
        vote::rate_overlaps_parallel(&overlaps, opt.threads)?
    };

    let candidates = rank::rank_candidates(&tables);
    println!("candidates: {}", candidates.len());

    builder::build_scaffolds(&mut asm, &candidates);
    println!("scaffolds: {}", asm.active_count());

    let mut out: Box<dyn Write> = Box::new(std::io::BufWriter::new(
        std::fs::File::create(out_path)
            .map_err(|e| anyhow::anyhow!("cannot create output file '{}': {}", out_path, e))?,
    ));
    for sc in asm.active_scaffolds() {
        fasta::write_record(&mut out, &sc.id, &asm.merged_seq(sc))?;
    }
    out.flush()?;
    println!("output written: {}", out_path);
    Ok(())
}
