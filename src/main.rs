use std::io::{self, Write};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;

use chargemeup::area::{self, RawAreaInput};
use chargemeup::config::Credentials;
use chargemeup::geocode::NominatimGeocoder;
use chargemeup::ocm::{OcmClient, QueryDispatcher};
use chargemeup::{logging, Error};

const EXAMPLES: &str = "\
Examples:
  Around Newark:
    chargemeup -b \"(40.63010790372053,-74.2775717248681),(40.7356464076158,-74.09370618215354)\"

  chargemeup -a \"Newark, NJ\" -r 10

  chargemeup --lat 40.7356464076158 --lon -74.09370618215354 --radius 5

Environment:
  OCM_SERVER  API server, used when --server is not given
  OCM_KEY     API key, used when --key is not given";

/// Query OpenChargeMap for charge points.
///
/// The search area is, in order of priority: a bounding box, an address
/// plus radius, or a latitude/longitude plus radius. Matching points of
/// interest are printed to stdout as a JSON array.
#[derive(Parser, Debug)]
#[command(name = "chargemeup", version, about, after_help = EXAMPLES)]
struct Cli {
    /// Bounding box for the query, "(lat1,lon1),(lat2,lon2)".
    #[arg(long, short = 'b', allow_hyphen_values = true)]
    bbox: Option<String>,

    /// Address to query (requires --radius).
    #[arg(long, short = 'a')]
    address: Option<String>,

    /// Radial distance to query, in kilometres (requires --address or --lat/--lon).
    #[arg(long, short = 'r', allow_hyphen_values = true)]
    radius: Option<f64>,

    /// Latitude to query (requires --lon and --radius).
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude to query (requires --lat and --radius).
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// OpenChargeMap API server [env: OCM_SERVER].
    #[arg(long, short = 's')]
    server: Option<String>,

    /// OpenChargeMap API key [env: OCM_KEY].
    #[arg(long, short = 'k')]
    key: Option<String>,

    /// Report the number of results on stderr.
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    fn area_input(&self) -> RawAreaInput {
        RawAreaInput {
            bounding_box: self.bbox.clone(),
            address: self.address.clone(),
            latitude: self.lat,
            longitude: self.lon,
            radius: self.radius,
        }
    }
}

fn main() -> ExitCode {
    // Help and usage go to stderr; stdout carries only results.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return ExitCode::from(report_parse_error(&e, &mut io::stderr())),
    };

    if let Err(e) = logging::init() {
        eprintln!("warning: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Help and version requests exit 0; every other parse error exits 1.
fn parse_exit_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn report_parse_error<W: Write + ?Sized>(e: &clap::Error, w: &mut W) -> u8 {
    let _ = write!(w, "{}", e.render());
    parse_exit_status(e.kind())
}

fn run(cli: &Cli) -> Result<(), Error> {
    // ── Configuration ───────────────────────────────────────────

    let creds = Credentials::from_env(cli.server.as_deref(), cli.key.as_deref())?;
    let client = OcmClient::new(&creds)?;

    // ── Resolve search area ─────────────────────────────────────

    let area = area::resolve(&cli.area_input(), &NominatimGeocoder::new())?;

    // ── Query OpenChargeMap ─────────────────────────────────────

    let dispatcher = QueryDispatcher::new(client).verbose(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut diag = io::stderr();
    let count = dispatcher.dispatch(&area, &mut out, &mut diag)?;

    debug!(count, "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("chargemeup").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_goes_to_writer_and_exits_zero() {
        let err = parse(&["-h"]).unwrap_err();
        let mut buf = Vec::new();
        assert_eq!(report_parse_error(&err, &mut buf), 0);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("--bbox"));
        assert!(text.contains("Examples:"));
    }

    #[test]
    fn test_version_exits_zero() {
        let err = parse(&["--version"]).unwrap_err();
        assert_eq!(parse_exit_status(err.kind()), 0);
    }

    #[test]
    fn test_usage_errors_exit_one() {
        let cases: [&[&str]; 3] = [&["--bogus"], &["--radius", "ten"], &["--lat"]];
        for args in cases {
            let err = parse(args).unwrap_err();
            let mut buf = Vec::new();
            assert_eq!(report_parse_error(&err, &mut buf), 1, "args: {args:?}");
            assert!(!buf.is_empty());
        }
    }

    #[test]
    fn test_negative_coordinates_parse() {
        let cli = parse(&["--lat", "40.7356", "--lon", "-74.09", "-r", "5"]).unwrap();
        assert_eq!(cli.lat, Some(40.7356));
        assert_eq!(cli.lon, Some(-74.09));
        assert_eq!(cli.radius, Some(5.0));
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&[
            "-b", "(40.63,-74.27),(40.73,-74.09)",
            "-a", "Newark, NJ",
            "-r", "10",
            "-s", "http://localhost:8080/v3",
            "-k", "abc",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.bbox.as_deref(), Some("(40.63,-74.27),(40.73,-74.09)"));
        assert_eq!(cli.address.as_deref(), Some("Newark, NJ"));
        assert_eq!(cli.radius, Some(10.0));
        assert_eq!(cli.server.as_deref(), Some("http://localhost:8080/v3"));
        assert_eq!(cli.key.as_deref(), Some("abc"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_area_input_mapping() {
        let cli = parse(&["-a", "Newark, NJ", "-r", "10", "--lat", "1.5", "--lon", "-2.5"]).unwrap();
        assert_eq!(
            cli.area_input(),
            RawAreaInput {
                bounding_box: None,
                address: Some("Newark, NJ".into()),
                latitude: Some(1.5),
                longitude: Some(-2.5),
                radius: Some(10.0),
            }
        );
    }

    #[test]
    fn test_no_flags_parses_to_empty_input() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.area_input(), RawAreaInput::default());
        assert!(!cli.verbose);
    }
}
