mod config_reader;
mod election;
mod electors;
mod io_csv;
mod io_json;

use log::{debug, info, warn};

use apportionment::hemicycle::{assign_slots, hemicycle};
use apportionment::layout::layout_with_policy;
use apportionment::summary::NationalSummary;
use apportionment::*;
use snafu::prelude::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::ecmap::config_reader::*;
use crate::ecmap::election::{build_elections, Election};

pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Snafu)]
pub enum EcmapError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the results"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error reading the directory {path}"))]
    ReadingDirectory {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening the CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("CSV line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Line {lineno}: cannot read the vote count {content:?}"))]
    ParsingNumber { lineno: usize, content: String },
    #[snafu(display("Apportionment failed for {entity}"))]
    Apportionment {
        source: AllocationError,
        entity: String,
    },
    #[snafu(display("Marker layout failed for {entity}"))]
    Layout {
        source: AllocationError,
        entity: String,
    },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("No input: pass --input or set source.filePath in the configuration"))]
    MissingInput {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type EcmapResult<T> = Result<T, EcmapError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Json,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum LayoutMode {
    NoMarkers,
    Grid,
    Hemicycle,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct PartyRecord {
    pub name: String,
    pub seats: u32,
    pub votes: u64,
    pub extra_votes: u64,
    pub extra_seat: bool,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct StatsRecord {
    pub name: String,
    pub total_seats: u32,
    pub total_votes: u64,
    pub gallagher_index: f64,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct MarkerRecord {
    pub party: String,
    pub x: f64,
    pub y: f64,
}

/// The content of a per-state result file.
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct StateResult {
    pub parties: Vec<PartyRecord>,
    pub stats: StatsRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<MarkerRecord>,
}

/// The apportionment of one state.
#[derive(PartialEq, Debug, Clone)]
pub struct StateOutcome {
    pub year: String,
    pub state: String,
    pub total_seats: u32,
    pub allocation: Vec<Party>,
    pub markers: Vec<MarkerRecord>,
}

impl StateOutcome {
    pub fn name(&self) -> String {
        format!("{} {}", self.state, self.year)
    }

    pub fn to_result(&self) -> StateResult {
        StateResult {
            parties: self
                .allocation
                .iter()
                .map(|p| PartyRecord {
                    name: p.name.clone(),
                    seats: p.seats,
                    votes: p.votes,
                    extra_votes: p.remainder,
                    extra_seat: p.extra_seat(),
                })
                .collect(),
            stats: StatsRecord {
                name: self.name(),
                total_seats: self.total_seats,
                total_votes: self.allocation.iter().map(|p| p.votes).sum(),
                gallagher_index: gallagher_index(&self.allocation),
            },
            markers: self.markers.clone(),
        }
    }
}

/// Runs the pipeline described by the command line, on top of the
/// configuration file if one is given.
pub fn run_from_args(args: &Args) -> EcmapResult<()> {
    let (mut config, root) = match &args.config {
        Some(p) => {
            let config = read_config(p)?;
            let root = Path::new(p)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, root)
        }
        None => (EcmapConfig::default(), PathBuf::new()),
    };
    info!("config: {:?}", config);

    if let Some(x) = &args.input_type {
        config.source.provider = Some(x.clone());
    }
    if let Some(x) = &args.layout {
        config.output_settings.layout = Some(x.clone());
    }
    if let Some(x) = &args.method {
        config.rules.method = Some(x.clone());
    }

    // Paths from the command line are taken as they are, paths from the
    // configuration are relative to it.
    let input = match (&args.input, &config.source.file_path) {
        (Some(x), _) => x.clone(),
        (None, Some(x)) => root.join(x).display().to_string(),
        (None, None) => return MissingInputSnafu {}.fail(),
    };
    let output = match (&args.out, &config.output_settings.output_directory) {
        (Some(x), _) => Some(x.clone()),
        (None, Some(x)) if x == "stdout" => Some(x.clone()),
        (None, Some(x)) => Some(root.join(x).display().to_string()),
        (None, None) => None,
    };

    run_election(&config, &input, output.as_deref(), args.reference.as_deref())?;
    Ok(())
}

/// Apportions every state found in the input and writes the results.
///
/// Returns the national summary that was written.
pub fn run_election(
    config: &EcmapConfig,
    input: &str,
    output: Option<&str>,
    reference: Option<&str>,
) -> EcmapResult<JSValue> {
    let rules = config.rules.apportionment_rules()?;
    let layout_mode = config.layout_mode()?;

    info!("Attempting to read {:?}", input);
    let elections: Vec<Election> = match config.source.input_type()? {
        InputType::Csv => {
            let lists = io_csv::read_csv_lists(input)?;
            build_elections(&lists, &config.source, config.rules.default_electors())
        }
        InputType::Json => io_json::read_json_results(input)?,
    };
    info!("{} elections to apportion", elections.len());

    let mut outcomes: Vec<StateOutcome> = Vec::new();
    for e in elections.iter() {
        outcomes.push(run_state(e, &rules, layout_mode, &config.layout)?);
    }

    let summary_js = build_summary_js(config, &outcomes);
    let pretty_js_summary =
        serde_json::to_string_pretty(&summary_js).context(SerializingJsonSnafu {})?;

    match output {
        None | Some("stdout") | Some("") => println!("{}", pretty_js_summary),
        Some(dir) => write_outputs(Path::new(dir), &outcomes, &pretty_js_summary)?,
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_summary {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_summary.as_str(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(summary_js)
}

fn run_state(
    election: &Election,
    rules: &ApportionmentRules,
    layout_mode: LayoutMode,
    layout: &LayoutSettings,
) -> EcmapResult<StateOutcome> {
    let entity = election.name();
    let allocation = apportion_with_rules(&election.parties, election.total_seats, rules)
        .context(ApportionmentSnafu {
            entity: entity.clone(),
        })?;

    if let Some(stored) = &election.stored_seats {
        let computed: Vec<u32> = allocation.iter().map(|p| p.seats).collect();
        if *stored != computed {
            warn!(
                "{}: stored seats {:?} differ from the computed seats {:?}",
                entity, stored, computed
            );
        }
    }

    let markers = compute_markers(&allocation, election.total_seats, layout_mode, layout)
        .context(LayoutSnafu { entity })?;

    Ok(StateOutcome {
        year: election.year.clone(),
        state: election.state.clone(),
        total_seats: election.total_seats,
        allocation,
        markers,
    })
}

fn compute_markers(
    allocation: &[Party],
    total_seats: u32,
    layout_mode: LayoutMode,
    layout: &LayoutSettings,
) -> Result<Vec<MarkerRecord>, AllocationError> {
    let count = total_seats as usize;
    let points = match layout_mode {
        LayoutMode::NoMarkers => return Ok(Vec::new()),
        LayoutMode::Grid => layout_with_policy(
            count,
            &layout.bounding_box(),
            layout.marker_radius(),
            &layout.policy(),
        )?,
        LayoutMode::Hemicycle => {
            hemicycle(count, &layout.hemicycle_center(), layout.hemicycle_radius())?
        }
    };
    let slots = assign_slots(allocation, points.len())?;
    Ok(points
        .iter()
        .zip(slots)
        .filter_map(|(pt, slot)| {
            slot.map(|party| MarkerRecord {
                party,
                x: pt.x,
                y: pt.y,
            })
        })
        .collect())
}

fn build_summary_js(config: &EcmapConfig, outcomes: &[StateOutcome]) -> JSValue {
    let national = NationalSummary::from_results(outcomes.iter().map(|o| o.allocation.as_slice()));
    let national_js: Vec<JSValue> = national
        .parties()
        .iter()
        .map(|p| json!({"name": p.name, "votes": p.votes, "seats": p.seats}))
        .collect();
    let results_js: Vec<JSValue> = outcomes
        .iter()
        .map(|o| {
            let r = o.to_result();
            let seats: Vec<JSValue> = r
                .parties
                .iter()
                .map(|p| json!({"name": p.name, "seats": p.seats}))
                .collect();
            json!({
                "name": r.stats.name,
                "total_seats": r.stats.total_seats,
                "total_votes": r.stats.total_votes,
                "gallagher_index": r.stats.gallagher_index,
                "seats": seats,
            })
        })
        .collect();
    json!({
        "config": {
            "method": config.rules.method.as_deref().unwrap_or("largestRemainder"),
            "tiebreakMode": config.rules.tiebreak_mode.as_deref().unwrap_or("useInputOrder"),
            "layout": config.output_settings.layout.as_deref().unwrap_or("none"),
        },
        "national": {
            "total_votes": national.total_votes(),
            "total_seats": national.total_seats(),
            "parties": national_js,
        },
        "results": results_js,
    })
}

fn write_outputs(dir: &Path, outcomes: &[StateOutcome], pretty_summary: &str) -> EcmapResult<()> {
    for o in outcomes.iter() {
        let year_dir = dir.join(&o.year);
        fs::create_dir_all(&year_dir).context(WritingOutputSnafu {
            path: year_dir.display().to_string(),
        })?;
        let p = year_dir.join(format!("{}.json", o.state));
        let path = p.display().to_string();
        let js = serde_json::to_string_pretty(&o.to_result()).context(SerializingJsonSnafu {})?;
        debug!("write_outputs: writing {}", path);
        fs::write(&p, js).context(WritingOutputSnafu { path })?;
    }
    fs::create_dir_all(dir).context(WritingOutputSnafu {
        path: dir.display().to_string(),
    })?;
    let p = dir.join(SUMMARY_FILE);
    fs::write(&p, pretty_summary).context(WritingOutputSnafu {
        path: p.display().to_string(),
    })?;
    info!("Results written to {}", dir.display());
    Ok(())
}
