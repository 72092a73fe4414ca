// src/query.rs
//! Request payloads for the Checkbook XML API.
//!
//! A [`Query`] describes one fetch: which category, which window of the
//! result set, and which criteria. Nothing is validated here; unsupported
//! categories or filter names come back from the server as an empty or
//! error response.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::config::{DataCategory, Filter};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    category: DataCategory,
    records_from: u64,
    max_records: u64,
    criteria: Vec<Filter>,
}

impl Query {
    /// `records_from` is 1-based.
    pub fn new(category: DataCategory, records_from: u64, max_records: u64) -> Self {
        Self { category, records_from, max_records, criteria: Vec::new() }
    }

    pub fn with_criteria<I>(mut self, criteria: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        self.criteria.extend(criteria);
        self
    }

    /// Render the `<request>` document.
    pub fn to_xml(&self) -> Result<String> {
        let mut w = Writer::new(Vec::new());

        w.write_event(Event::Start(BytesStart::new("request")))?;
        text_element(&mut w, "type_of_data", self.category.as_str())?;
        text_element(&mut w, "records_from", &self.records_from.to_string())?;
        text_element(&mut w, "max_records", &self.max_records.to_string())?;

        w.write_event(Event::Start(BytesStart::new("search_criteria")))?;
        for c in &self.criteria {
            w.write_event(Event::Start(BytesStart::new("criteria")))?;
            text_element(&mut w, "name", &c.name)?;
            text_element(&mut w, "type", "value")?;
            text_element(&mut w, "value", &c.value)?;
            w.write_event(Event::End(BytesEnd::new("criteria")))?;
        }
        w.write_event(Event::End(BytesEnd::new("search_criteria")))?;
        w.write_event(Event::End(BytesEnd::new("request")))?;

        Ok(String::from_utf8_lossy(&w.into_inner()).into_owned())
    }
}

fn text_element(w: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
