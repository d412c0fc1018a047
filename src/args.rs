use clap::Parser;

/// This program computes the proportional apportionment of Electoral College delegations.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file. See the manual of the `apportionment`
    /// crate for the format. The paths in this file are relative to its directory.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing a summary in JSON format. If provided, ecmap will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (directory path, 'stdout' or empty) If a directory is specified, one result file per state
    /// is written to <out>/<year>/<state>.json, together with a summary.json file. Setting this
    /// option overrides the directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file or directory path) The vote database (csv) or the result files (json). Setting this
    /// option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or json.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default none) The markers to compute for every state: none, grid or hemicycle.
    #[clap(long, value_parser)]
    pub layout: Option<String>,

    /// (default largestRemainder) The apportionment method: largestRemainder or hagenbachBischoff.
    #[clap(long, value_parser)]
    pub method: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
