//! 逐行解码器
//!
//! 惰性读取：每次 `next()` 只消费到下一个非空行。

use super::event::{Event, RawRecord};
use crate::error::{Result, VizError};
use std::io::BufRead;
use tracing::trace;

/// 从行分隔的 JSON 流中依次产出 [`Event`]。
///
/// 空行被跳过且不占用时间戳；遇到解码错误后迭代器结束。
pub struct EventReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    next_n: u64,
    failed: bool,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
            next_n: 0,
            failed: false,
        }
    }

    fn malformed(&self, msg: impl std::fmt::Display) -> VizError {
        VizError::MalformedRecord {
            line: self.line_no,
            source: serde::de::Error::custom(msg),
        }
    }

    fn decode(&mut self, line: &str) -> Result<Event> {
        let raw: RawRecord =
            serde_json::from_str(line).map_err(|source| VizError::MalformedRecord {
                line: self.line_no,
                source,
            })?;
        if raw.frames.is_empty() {
            return Err(self.malformed("frames must not be empty"));
        }
        let n = self.next_n;
        self.next_n += 1;
        trace!(n, gid = raw.gid, tag = ?raw.tag, frames = raw.frames.len(), "解码事件");
        Ok(Event {
            tag: raw.tag,
            n,
            gid: raw.gid,
            frames: raw.frames,
        })
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            }
            self.line_no += 1;

            // 逐行校验 UTF-8
            let buf = std::mem::take(&mut self.buf);
            let ev = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) => Some(self.decode(line.trim_end())),
                Err(e) => Some(Err(self.malformed(format!("invalid UTF-8: {e}")))),
            };
            self.buf = buf;

            if let Some(ev) = ev {
                self.failed = ev.is_err();
                return Some(ev);
            }
        }
    }
}
