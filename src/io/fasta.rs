use anyhow::Result;
use std::io::{BufRead, Write};

/// 一条 contig 记录：identifier 行取 '>' 后的第一个空白分隔 token，
/// 序列行去空白、转大写。
#[derive(Debug, Clone)]
pub struct ContigRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    pending_id: Option<String>,
    done: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            pending_id: None,
            done: false,
        }
    }

    fn next_line(&mut self) -> Result<bool> {
        self.buf.clear();
        Ok(self.reader.read_line(&mut self.buf)? > 0)
    }

    pub fn next_record(&mut self) -> Result<Option<ContigRecord>> {
        if self.done {
            return Ok(None);
        }

        // identifier 行：上一条记录越过的表头，或继续向下找 '>'
        let id = loop {
            if let Some(id) = self.pending_id.take() {
                break id;
            }
            if !self.next_line()? {
                self.done = true;
                return Ok(None);
            }
            if let Some(header) = self.buf.strip_prefix('>') {
                break header
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string();
            }
        };

        let mut seq: Vec<u8> = Vec::new();
        loop {
            if !self.next_line()? {
                self.done = true;
                break;
            }
            if let Some(header) = self.buf.strip_prefix('>') {
                self.pending_id = Some(
                    header
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_string(),
                );
                break;
            }
            seq.extend(
                self.buf
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .map(|b| b.to_ascii_uppercase()),
            );
        }

        Ok(Some(ContigRecord { id, seq }))
    }
}

/// Write one two-line record: identifier line, then the full sequence.
pub fn write_record<W: Write>(out: &mut W, id: &str, seq: &[u8]) -> Result<()> {
    writeln!(out, ">{}", id)?;
    out.write_all(seq)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_two_line_records() {
        let data = b">c1\nACgTNN\n>c2\nAAA\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "c1");
        assert_eq!(r1.seq, b"ACGTNN");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "c2");
        assert_eq!(r2.seq, b"AAA");

        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn id_is_first_token_of_header() {
        let data = b">c1 length=9 cov=12\nACGT\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        let rec = r.next_record().unwrap().unwrap();
        assert_eq!(rec.id, "c1");
    }

    #[test]
    fn tolerates_crlf_wrapped_and_spaced_sequence() {
        let data = b">c1 desc\r\nAC g t n\r\n acgt\r\n>c2 \r\n N N N \r\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "c1");
        assert_eq!(r1.seq, b"ACGTNACGT");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "c2");
        assert_eq!(r2.seq, b"NNN");

        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn skips_leading_junk_before_first_header() {
        let data = b"\n\n>c1\nACGT\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        let rec = r.next_record().unwrap().unwrap();
        assert_eq!(rec.id, "c1");
        assert_eq!(rec.seq, b"ACGT");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn write_record_two_lines() {
        let mut out: Vec<u8> = Vec::new();
        write_record(&mut out, "s1", b"ACGT").unwrap();
        assert_eq!(out, b">s1\nACGT\n");
    }
}
