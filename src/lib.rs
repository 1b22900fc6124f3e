//! # scaffold-rust
//!
//! 基于 read 重叠证据的贪心 contig 拼接器（scaffolder）。
//!
//! 本 crate 从预先算好的 read-to-contig 比对（PAF 前 11 列）出发，
//! 把 contig 连接成更长的 scaffold：
//!
//! - **重叠分类**：同一 read 上的两条比对按几何关系判定
//!   end→start / end→end / start→start 三种邻接
//! - **计票**：按 read 分组，对组内每一对比对按严格优先级至多投一票
//! - **排序**：票数降序、id 升序，产生确定的合并优先级
//! - **贪心合并**：按序消费候选连接，传播方向翻转，端点只用一次
//!
//! ## 快速示例
//!
//! ```rust,no_run
//! use scaffold_rust::io::paf::PafReader;
//! use scaffold_rust::scaffold::{builder, rank, vote};
//!
//! let mut asm = scaffold_rust::scaffold::read_contigs(
//!     std::io::Cursor::new(&b">c1\nAAAACCCCGG\n>c2\nGGTTTTACGT\n"[..]),
//! )?;
//!
//! let overlaps = PafReader::new(std::io::Cursor::new(
//!     &b"r1 10 0 4 + c1 10 6 10 4 4\nr1 10 6 10 + c2 10 0 4 4 4\n"[..],
//! ))
//! .read_all()?;
//!
//! let tables = vote::rate_overlaps(&overlaps);
//! let candidates = rank::rank_candidates(&tables);
//! builder::build_scaffolds(&mut asm, &candidates);
//!
//! for sc in asm.active_scaffolds() {
//!     println!(">{} ({} bp)", sc.id, asm.merged_seq(sc).len());
//! }
//! # anyhow::Ok(())
//! ```
//!
//! ## 模块说明
//!
//! - [`io`] — contig FASTA 与 overlap（PAF）文件解析、scaffold 输出
//! - [`model`] — contig/scaffold 的 arena 数据模型
//! - [`scaffold`] — 分类、计票、排序、贪心合并与流水线驱动
//! - [`util`] — 序列归一化 / 反向互补等工具函数

pub mod io;
pub mod model;
pub mod scaffold;
pub mod util;
