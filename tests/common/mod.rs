// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use checkbook_scrape::core::Transport;
use checkbook_scrape::{Error, Result};

/// Text between the first `open` and the following `close`.
pub fn between<'a>(s: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = s.find(open)? + open.len();
    let len = s[start..].find(close)?;
    Some(&s[start..start + len])
}

pub fn records_from(body: &str) -> u64 {
    between(body, "<records_from>", "</records_from>").unwrap().parse().unwrap()
}

pub fn max_records(body: &str) -> u64 {
    between(body, "<max_records>", "</max_records>").unwrap().parse().unwrap()
}

pub fn agency_of(body: &str) -> Option<&str> {
    between(body, "<name>agency_code</name><type>value</type><value>", "</value>")
}

/// Checkbook-shaped response with `n` transactions numbered from `first_id`.
pub fn response_xml(record_count: u64, first_id: u64, n: u64, agency: &str) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\"?><response><status><result>success</result></status>\
         <result_records><record_count>{record_count}</record_count><budget_transactions>"
    );
    for id in first_id..first_id + n {
        xml.push_str(&format!(
            "<transaction><id>{id}</id><agency>{agency}</agency><adopted>{id}.00</adopted></transaction>"
        ));
    }
    xml.push_str("</budget_transactions></result_records></response>");
    xml
}

/// In-memory API: serves the window each request asks for, per agency.
pub struct FakeApi {
    pub counts: HashMap<String, u64>,
    /// Fail the page request starting at this offset (probes unaffected).
    pub fail_at: Option<u64>,
    /// Serve the page starting at this offset with its body cut off halfway.
    pub cut_at: Option<u64>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn new(counts: &[(&str, u64)]) -> Self {
        Self {
            counts: counts.iter().map(|(a, c)| (a.to_string(), *c)).collect(),
            fail_at: None,
            cut_at: None,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeApi {
    fn post_xml(&self, body: &str) -> Result<String> {
        self.requests.borrow_mut().push(body.to_string());

        let from = records_from(body);
        let max = max_records(body);
        if max > 5 && self.fail_at == Some(from) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            )));
        }

        let agency = agency_of(body).unwrap_or("");
        let total = self.counts.get(agency).copied().unwrap_or(0);
        let n = total.saturating_sub(from - 1).min(max);
        let xml = response_xml(total, from, n, agency);
        if max > 5 && self.cut_at == Some(from) {
            // End on a tag boundary so only the missing close tags are wrong
            let cut = xml[..xml.len() / 2].rfind('>').map_or(0, |i| i + 1);
            return Ok(xml[..cut].to_string());
        }
        Ok(xml)
    }
}
