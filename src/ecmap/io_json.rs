// Reading back the per-state result files.

use std::fs;
use std::path::{Path, PathBuf};

use apportionment::Party;
use log::{debug, info};
use serde::Deserialize;
use snafu::prelude::*;

use crate::ecmap::election::Election;
use crate::ecmap::*;

#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
struct PartyInput {
    name: String,
    votes: i64,
    seats: Option<u32>,
}

#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
struct StatsInput {
    name: Option<String>,
    total_seats: u32,
}

#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
struct ResultInput {
    parties: Vec<PartyInput>,
    stats: StatsInput,
}

/// Reads a single result file, or all the result files under a directory.
///
/// Directories are walked in name order. The summary files are skipped.
pub fn read_json_results(path: &str) -> EcmapResult<Vec<Election>> {
    let p = Path::new(path);
    let files = if p.is_dir() {
        let mut files: Vec<PathBuf> = Vec::new();
        collect_result_files(p, &mut files)?;
        files
    } else {
        vec![p.to_path_buf()]
    };
    info!("read_json_results: {} result files under {}", files.len(), path);
    let mut res: Vec<Election> = Vec::new();
    for f in files.iter() {
        res.push(read_result_file(f)?);
    }
    Ok(res)
}

fn collect_result_files(dir: &Path, files: &mut Vec<PathBuf>) -> EcmapResult<()> {
    let path = dir.display().to_string();
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .context(ReadingDirectorySnafu { path: path.clone() })?
        .map(|e| e.map(|e| e.path()))
        .collect::<Result<Vec<PathBuf>, std::io::Error>>()
        .context(ReadingDirectorySnafu { path })?;
    entries.sort();
    for e in entries {
        if e.is_dir() {
            collect_result_files(&e, files)?;
        } else if e.extension().map_or(false, |x| x == "json")
            && e.file_name().map_or(false, |x| x != SUMMARY_FILE)
        {
            files.push(e);
        }
    }
    Ok(())
}

fn read_result_file(p: &Path) -> EcmapResult<Election> {
    let path = p.display().to_string();
    let contents = fs::read_to_string(p).context(OpeningJsonSnafu { path: path.clone() })?;
    let input: ResultInput =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path: path.clone() })?;
    debug!("read_result_file: {}: {:?}", path, input);

    let (state, year) = match input.stats.name.as_deref().and_then(split_name) {
        Some(x) => x,
        None => names_from_path(p),
    };

    let mut parties: Vec<Party> = Vec::new();
    for pi in input.parties.iter() {
        let party = Party::try_new(&pi.name, pi.votes).context(ApportionmentSnafu {
            entity: format!("{} {}", state, year),
        })?;
        parties.push(party);
    }
    let stored_seats: Option<Vec<u32>> = input.parties.iter().map(|pi| pi.seats).collect();

    Ok(Election {
        year,
        state,
        total_seats: input.stats.total_seats,
        parties,
        stored_seats,
    })
}

// "New York 2016" -> ("New York", "2016")
fn split_name(name: &str) -> Option<(String, String)> {
    let (state, year) = name.rsplit_once(' ')?;
    if state.is_empty() || year.parse::<i32>().is_err() {
        return None;
    }
    Some((state.to_string(), year.to_string()))
}

// <year>/<state>.json
fn names_from_path(p: &Path) -> (String, String) {
    let state = p
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let year = p
        .parent()
        .and_then(|d| d.file_name())
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    (state, year)
}
