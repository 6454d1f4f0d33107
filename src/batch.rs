//! Streaming CSV batch payload generation.
//!
//! Reads charge requests one row at a time and writes one payload per row.
//! Invalid rows are logged at warn level and skipped so a single bad charge
//! never aborts the batch.

use crate::amount::Amount;
use crate::error::Result;
use crate::payload::Merchant;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Deserialize;
use std::io::{Read, Write};
use std::str::FromStr;

/// Raw charge record as read from CSV.
///
/// `id` is an opaque caller-side label echoed into the output (the row
/// number is used when absent). `txid` overrides the `***` wildcard
/// transaction reference when present.
#[derive(Debug, Deserialize)]
pub struct ChargeRecord {
    /// Caller-side charge label
    pub id: Option<String>,

    /// Amount in BRL (decimal string)
    pub amount: String,

    /// Optional transaction reference (alphanumeric, max 25 chars)
    pub txid: Option<String>,
}

/// Batch payload generator for a single merchant.
///
/// Processes charges in streaming fashion: each row is read, encoded, and
/// written before the next row is touched, so memory use is independent of
/// batch size.
pub struct BatchGenerator {
    merchant: Merchant,
}

impl BatchGenerator {
    /// Creates a generator for the given merchant.
    pub fn new(merchant: Merchant) -> Self {
        BatchGenerator { merchant }
    }

    /// Processes charges from a CSV reader, writing `id,amount,payload`
    /// rows to `writer`.
    ///
    /// Rows with an unparseable or non-positive amount, or an invalid txid,
    /// are logged at warn level and skipped.
    pub fn process_csv<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "amount", "payload"])?;

        for (row_idx, result) in csv_reader.deserialize::<ChargeRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                    continue;
                }
            };

            let amount = match Amount::from_str(&record.amount) {
                Ok(amount) => amount,
                Err(e) => {
                    warn!("Row {}: {}", row_num, e);
                    continue;
                }
            };

            let payload = match record.txid.as_deref().filter(|t| !t.is_empty()) {
                Some(txid) => self.merchant.payload_with_txid(amount, txid),
                None => self.merchant.payload(amount),
            };
            let payload = match payload {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Row {}: {}", row_num, e);
                    continue;
                }
            };

            let id = record
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| row_num.to_string());

            debug!("Row {}: Generated payload for charge {}", row_num, id);
            csv_writer.write_record([id, amount.to_string(), payload])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_payload;
    use std::io::Cursor;

    fn run_batch(csv: &str) -> String {
        let merchant = Merchant::new("12345678900", "Fulano de Tal", "São Paulo").unwrap();
        let generator = BatchGenerator::new(merchant);

        let mut output = Vec::new();
        generator.process_csv(Cursor::new(csv), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn payload_column(line: &str) -> &str {
        line.rsplit(',').next().unwrap()
    }

    #[test]
    fn test_generates_one_payload_per_row() {
        let csv = "id,amount,txid\nA,10.00,\nB,0.10,\n";
        let output = run_batch(csv);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "id,amount,payload");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("A,10.00,000201"));
        assert!(lines[2].starts_with("B,0.10,000201"));
    }

    #[test]
    fn test_emitted_payloads_round_trip() {
        let csv = "id,amount,txid\nA,12.50,\nB,3.99,PED42\n";
        let output = run_batch(csv);

        for line in output.lines().skip(1) {
            let decoded = decode_payload(payload_column(line)).unwrap();
            assert!(decoded.checksum_valid);
        }
    }

    #[test]
    fn test_txid_column_overrides_wildcard() {
        let csv = "id,amount,txid\nA,5.00,PED42\n";
        let output = run_batch(csv);
        let payload = payload_column(output.lines().nth(1).unwrap());

        let decoded = decode_payload(payload).unwrap();
        let additional = decoded.get("62").unwrap().as_template().unwrap();
        assert_eq!(additional[0].value.as_text(), Some("PED42"));
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let csv = "id,amount,txid\nA,not-a-number,\nB,-4.00,\nC,0,\nD,7.77,\n";
        let output = run_batch(csv);
        let lines: Vec<&str> = output.lines().collect();

        // Header plus the single valid row.
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("D,7.77,"));
    }

    #[test]
    fn test_missing_id_falls_back_to_row_number() {
        let csv = "id,amount,txid\n,4.20,\n";
        let output = run_batch(csv);
        assert!(output.lines().nth(1).unwrap().starts_with("2,4.20,"));
    }

    #[test]
    fn test_amount_echoed_canonically() {
        let csv = "id,amount,txid\nA,12.5,\n";
        let output = run_batch(csv);
        let decoded = decode_payload(payload_column(output.lines().nth(1).unwrap())).unwrap();

        assert!(output.lines().nth(1).unwrap().starts_with("A,12.50,"));
        assert_eq!(decoded.get("54").unwrap().as_text(), Some("12.50"));
    }

    #[test]
    fn test_whitespace_handling() {
        let csv = "id, amount, txid\nA, 10.0 ,\n";
        let output = run_batch(csv);
        assert!(output.lines().nth(1).unwrap().starts_with("A,10.00,"));
    }
}
