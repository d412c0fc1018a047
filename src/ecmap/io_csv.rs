// Primitives for reading the vote database.

use std::fs::File;

use log::debug;
use snafu::prelude::*;

use crate::ecmap::election::ListRecord;
use crate::ecmap::*;

/// Reads the rows of the database: year, state, candidate, party, votes.
///
/// Header rows are skipped wherever they appear, since databases are often
/// built by concatenating several files.
pub fn read_csv_lists(path: &str) -> EcmapResult<Vec<ListRecord>> {
    let records = get_records(path)?;
    let mut res: Vec<ListRecord> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let field = |i: usize| -> EcmapResult<String> {
            Ok(line
                .get(i)
                .context(CsvLineTooShortSnafu { lineno })?
                .trim()
                .to_string())
        };
        let year = field(0)?;
        if is_header(&year) {
            debug!("read_csv_lists: skipping header at line {}", lineno);
            continue;
        }
        let content = field(4)?;
        let votes = content
            .parse::<u64>()
            .ok()
            .context(ParsingNumberSnafu { lineno, content })?;
        res.push(ListRecord {
            year,
            state: field(1)?,
            candidate: field(2)?,
            party: field(3)?,
            votes,
        });
    }
    debug!("read_csv_lists: {} rows read from {}", res.len(), path);
    Ok(res)
}

fn is_header(year: &str) -> bool {
    year.contains("Header") || year.eq_ignore_ascii_case("year")
}

fn get_records(path: &str) -> EcmapResult<csv::StringRecordsIntoIter<File>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    Ok(rdr.into_records())
}
