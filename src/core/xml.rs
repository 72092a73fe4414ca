// src/core/xml.rs
//! Response parsing for the Checkbook XML API.
//!
//! Only two things matter in a response: the first `<record_count>` and every
//! `<transaction>` element, wherever they sit in the tree. Tag names are
//! matched case-insensitively and field names come out lower-cased.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{Error, Result};

const SNIPPET_LEN: usize = 200;

/// One `<transaction>`: field name → text, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transaction {
    fields: Vec<(String, String)>,
}

impl Transaction {
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Repeated names are joined with `;` instead of overwriting.
    pub fn insert(&mut self, name: String, value: String) {
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => {
                existing.push(';');
                existing.push_str(&value);
            }
            None => self.fields.push((name, value)),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Response {
    record_count: Option<String>,
    transactions: Vec<Transaction>,
    head: String,
}

impl Response {
    /// Total matching records as reported by the server (not the page size).
    pub fn record_count(&self) -> Result<u64> {
        let raw = self.record_count.as_deref().ok_or_else(|| Error::MissingRecordCount {
            snippet: self.head.clone(),
        })?;
        raw.parse().map_err(|_| Error::InvalidRecordCount(raw.to_string()))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

struct Frame {
    name: String,
    text: String,
    has_children: bool,
}

/// Collects one transaction; nested elements become dotted paths.
#[derive(Default)]
struct TransactionBuilder {
    stack: Vec<Frame>,
    record: Transaction,
}

impl TransactionBuilder {
    fn open(&mut self, name: String) {
        if let Some(parent) = self.stack.last_mut() {
            parent.has_children = true;
        }
        self.stack.push(Frame { name, text: String::new(), has_children: false });
    }

    fn text(&mut self, s: &str) {
        if let Some(top) = self.stack.last_mut() {
            top.text.push_str(s);
        }
    }

    /// Returns true once the `<transaction>` element itself has closed.
    fn close(&mut self) -> bool {
        let Some(frame) = self.stack.pop() else {
            return true;
        };
        if !frame.has_children {
            let mut key = String::new();
            for f in &self.stack {
                key.push_str(&f.name);
                key.push('.');
            }
            key.push_str(&frame.name);
            self.record.insert(key, frame.text.trim().to_string());
        }
        false
    }
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn snippet(body: &str) -> String {
    body.trim_start().chars().take(SNIPPET_LEN).collect()
}

fn tail(body: &str) -> String {
    let body = body.trim_end();
    let skip = body.chars().count().saturating_sub(SNIPPET_LEN);
    body.chars().skip(skip).collect()
}

pub fn parse_response(body: &str) -> Result<Response> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut out = Response { head: snippet(body), ..Response::default() };
    let mut current: Option<TransactionBuilder> = None;
    let mut count_buf: Option<String> = None;
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                let name = tag_name(e.local_name().as_ref());
                if let Some(b) = current.as_mut() {
                    b.open(name);
                } else if name == "transaction" {
                    current = Some(TransactionBuilder::default());
                } else if name == "record_count" && out.record_count.is_none() {
                    count_buf = Some(String::new());
                }
            }
            Event::Empty(e) => {
                let name = tag_name(e.local_name().as_ref());
                if let Some(b) = current.as_mut() {
                    b.open(name);
                    b.close();
                } else if name == "transaction" {
                    out.transactions.push(Transaction::default());
                } else if name == "record_count" && out.record_count.is_none() {
                    out.record_count = Some(String::new());
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                push_text(&mut current, &mut count_buf, &text);
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                push_text(&mut current, &mut count_buf, &String::from_utf8_lossy(&raw));
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                match current.as_mut() {
                    Some(b) => {
                        if b.close() {
                            if let Some(done) = current.take() {
                                out.transactions.push(done.record);
                            }
                        }
                    }
                    None => {
                        if let Some(buf) = count_buf.take() {
                            out.record_count = Some(buf.trim().to_string());
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // A cut-off body would otherwise yield a short last record
    if depth > 0 || current.is_some() || count_buf.is_some() {
        return Err(Error::Truncated { open: depth, snippet: tail(body) });
    }

    Ok(out)
}

fn push_text(current: &mut Option<TransactionBuilder>, count_buf: &mut Option<String>, text: &str) {
    if let Some(b) = current.as_mut() {
        b.text(text);
    } else if let Some(buf) = count_buf.as_mut() {
        buf.push_str(text);
    }
}
