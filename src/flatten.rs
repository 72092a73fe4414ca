// src/flatten.rs
//! Transactions → one page table.
//!
//! The header is whatever the page's transactions contain, in first-seen
//! order, followed by the metadata columns (`TYPE_OF_DATA`, then one column
//! per active filter). A transaction missing a field gets an empty cell.
//! Pages are independent: two pages of the same agency may have different
//! columns.

use crate::core::xml::Transaction;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// `tags` are (column, value) pairs stamped onto every row. A tag whose
    /// column already came from the data overwrites that column.
    pub fn from_transactions(transactions: &[Transaction], tags: &[(String, String)]) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for t in transactions {
            for (name, _) in t.fields() {
                if !headers.contains(name) {
                    headers.push(name.clone());
                }
            }
        }
        for (name, _) in tags {
            if !headers.contains(name) {
                headers.push(name.clone());
            }
        }

        let rows = transactions
            .iter()
            .map(|t| {
                headers
                    .iter()
                    .map(|h| match tags.iter().find(|(k, _)| k == h) {
                        Some((_, v)) => v.clone(),
                        None => t.get(h).unwrap_or_default().to_string(),
                    })
                    .collect()
            })
            .collect();

        Table { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell by column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let ix = self.headers.iter().position(|h| h == column)?;
        self.rows.get(row)?.get(ix).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(fields: &[(&str, &str)]) -> Transaction {
        let mut t = Transaction::default();
        for (k, v) in fields {
            t.insert(s!(*k), s!(*v));
        }
        t
    }

    fn tags() -> Vec<(String, String)> {
        vec![(s!("TYPE_OF_DATA"), s!("Contracts")), (s!("status"), s!("active"))]
    }

    #[test]
    fn every_field_survives_with_metadata_appended() {
        let txs = vec![tx(&[("vendor", "Acme"), ("amount", "10.00")])];
        let table = Table::from_transactions(&txs, &tags());

        assert_eq!(table.headers, row!["vendor", "amount", "TYPE_OF_DATA", "status"]);
        assert_eq!(table.rows, vec![row!["Acme", "10.00", "Contracts", "active"]]);
    }

    #[test]
    fn header_is_union_in_first_seen_order() {
        let txs = vec![
            tx(&[("a", "1"), ("b", "2")]),
            tx(&[("c", "3"), ("a", "4")]),
        ];
        let table = Table::from_transactions(&txs, &[(s!("TYPE_OF_DATA"), s!("Budget"))]);

        assert_eq!(table.headers, row!["a", "b", "c", "TYPE_OF_DATA"]);
        assert_eq!(table.rows[1], row!["4", "", "3", "Budget"]);
        assert_eq!(table.cell(0, "c"), Some(""));
    }

    #[test]
    fn tag_overrides_same_named_field() {
        let txs = vec![tx(&[("status", "registered"), ("id", "9")])];
        let table = Table::from_transactions(&txs, &tags());

        assert_eq!(table.headers, row!["status", "id", "TYPE_OF_DATA"]);
        assert_eq!(table.cell(0, "status"), Some("active"));
    }

    #[test]
    fn empty_page_keeps_metadata_header() {
        let table = Table::from_transactions(&[], &tags());
        assert!(table.is_empty());
        assert_eq!(table.headers, row!["TYPE_OF_DATA", "status"]);
    }
}
