use anyhow::{anyhow, Result};
use std::io::BufRead;
use std::str::FromStr;

/// Alignment strand of the read against the contig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl FromStr for Strand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            other => Err(anyhow!("invalid strand '{}' (expected '+' or '-')", other)),
        }
    }
}

/// 一条 read 对一条 contig 的局部比对记录（PAF 前 11 个必选列）。
/// 解析后不可变。
#[derive(Debug, Clone)]
pub struct Overlap {
    pub read_id: String,
    pub read_len: u32,
    pub read_start: u32,
    pub read_end: u32,
    pub strand: Strand,
    pub contig_id: String,
    pub contig_len: u32,
    pub contig_start: u32,
    pub contig_end: u32,
    pub num_matches: u32,
    pub match_len: u32,
}

pub struct PafReader<R: BufRead> {
    reader: R,
    buf: String,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> PafReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_no: 0,
            done: false,
        }
    }

    /// 读取下一条记录。空行跳过；字段数不足 11、数值或 strand 字段非法
    /// 都会报出带行号的错误。第 11 列之后的内容（PAF 第 12 列及 tag）忽略。
    pub fn next_record(&mut self) -> Result<Option<Overlap>> {
        if self.done {
            return Ok(None);
        }

        loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 {
                self.done = true;
                return Ok(None);
            }
            self.line_no += 1;
            if self.buf.trim().is_empty() {
                continue;
            }
            return parse_line(self.buf.trim_end(), self.line_no).map(Some);
        }
    }

    /// Drain the remaining records into a vector.
    pub fn read_all(&mut self) -> Result<Vec<Overlap>> {
        let mut out = Vec::new();
        while let Some(rec) = self.next_record()? {
            out.push(rec);
        }
        Ok(out)
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<Overlap> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 11 {
        return Err(anyhow!(
            "overlap line {}: expected 11 fields, found {}",
            line_no,
            fields.len()
        ));
    }

    let int = |idx: usize, name: &str| -> Result<u32> {
        fields[idx]
            .parse::<u32>()
            .map_err(|_| anyhow!("overlap line {}: invalid {} '{}'", line_no, name, fields[idx]))
    };

    let strand: Strand = fields[4]
        .parse()
        .map_err(|e| anyhow!("overlap line {}: {}", line_no, e))?;

    Ok(Overlap {
        read_id: fields[0].to_string(),
        read_len: int(1, "read_len")?,
        read_start: int(2, "read_start")?,
        read_end: int(3, "read_end")?,
        strand,
        contig_id: fields[5].to_string(),
        contig_len: int(6, "contig_len")?,
        contig_start: int(7, "contig_start")?,
        contig_end: int(8, "contig_end")?,
        num_matches: int(9, "num_matches")?,
        match_len: int(10, "match_len")?,
    })
}
