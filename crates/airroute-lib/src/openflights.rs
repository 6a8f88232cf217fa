//! Parsers for the OpenFlights `airports.dat` and `routes.dat` files.
//!
//! Both files are headerless CSV. Airports are keyed by their IATA code;
//! rows without one (OpenFlights writes `\N`) or without numeric coordinates
//! are skipped. Routes keep whatever codes the file carries, including ICAO
//! codes, and are resolved later when the graph is built.
//!
//! Fields are decoded lossily: invalid UTF-8 becomes U+FFFD and the row is
//! still considered. Only reader-level failures surface as [`Error::Csv`].
//!
//! [`Error::Csv`]: crate::Error::Csv

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use tracing::debug;

use crate::airport::{Airport, Route};
use crate::dataset::DatasetPaths;
use crate::error::Result;
use crate::graph::GraphStore;

const AIRPORT_NAME: usize = 1;
const AIRPORT_IATA: usize = 4;
const AIRPORT_LATITUDE: usize = 6;
const AIRPORT_LONGITUDE: usize = 7;

const ROUTE_SOURCE: usize = 2;
const ROUTE_DESTINATION: usize = 4;

/// Parse airports, keeping the first record seen for each IATA code.
pub fn parse_airports<R: Read>(reader: R) -> Result<Vec<Airport>> {
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut seen = HashSet::new();
    let mut airports = Vec::new();
    let mut skipped = 0usize;

    for record in csv.byte_records() {
        let record = record?;
        let Some(airport) = airport_from_record(&record) else {
            skipped += 1;
            continue;
        };

        if seen.insert(airport.code.clone()) {
            airports.push(airport);
        } else {
            skipped += 1;
        }
    }

    debug!(airports = airports.len(), skipped, "parsed airports");
    Ok(airports)
}

/// Parse routes as `(source, destination)` code pairs.
pub fn parse_routes<R: Read>(reader: R) -> Result<Vec<Route>> {
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut routes = Vec::new();
    let mut skipped = 0usize;

    for record in csv.byte_records() {
        let record = record?;
        let source = field(&record, ROUTE_SOURCE).unwrap_or_default();
        let destination = field(&record, ROUTE_DESTINATION).unwrap_or_default();

        let (source, destination) = (source.trim(), destination.trim());
        if source.is_empty() || destination.is_empty() {
            skipped += 1;
            continue;
        }

        routes.push(Route::new(source, destination));
    }

    debug!(routes = routes.len(), skipped, "parsed routes");
    Ok(routes)
}

pub fn load_airports(path: &Path) -> Result<Vec<Airport>> {
    parse_airports(BufReader::new(File::open(path)?))
}

pub fn load_routes(path: &Path) -> Result<Vec<Route>> {
    parse_routes(BufReader::new(File::open(path)?))
}

/// Parse both dataset files and build the route graph.
pub fn load_network(paths: &DatasetPaths) -> Result<GraphStore> {
    debug!(
        airports = %paths.airports.display(),
        routes = %paths.routes.display(),
        "loading airport network"
    );
    let airports = load_airports(&paths.airports)?;
    let routes = load_routes(&paths.routes)?;
    GraphStore::build(airports, &routes)
}

fn airport_from_record(record: &ByteRecord) -> Option<Airport> {
    let code = field(record, AIRPORT_IATA)?;
    let code = code.trim();
    if !is_iata_code(code) {
        return None;
    }

    let latitude = parse_coordinate(&field(record, AIRPORT_LATITUDE)?)?;
    let longitude = parse_coordinate(&field(record, AIRPORT_LONGITUDE)?)?;
    let name = field(record, AIRPORT_NAME).unwrap_or_default();

    Some(Airport::new(code, name.trim(), latitude, longitude))
}

fn field(record: &ByteRecord, index: usize) -> Option<Cow<'_, str>> {
    record.get(index).map(String::from_utf8_lossy)
}

fn is_iata_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphanumeric())
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|coordinate| coordinate.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AIRPORTS: &str = r#"1,"Goroka Airport","Goroka","Papua New Guinea","GKA","AYGA",-6.081689834590001,145.391998291,5282,10,"U","Pacific/Port_Moresby","airport","OurAirports"
2,"Madang Airport","Madang","Papua New Guinea","MAG","AYMD",-5.20707988739,145.789001465,20,10,"U","Pacific/Port_Moresby","airport","OurAirports"
3,"Second Goroka","Goroka","Papua New Guinea","GKA","AYGX",0,0,0,10,"U","Pacific/Port_Moresby","airport","OurAirports"
4,"No Code Field","Nowhere","Nowhere",\N,"XXXX",1.0,2.0,0,0,"U","Etc/UTC","airport","OurAirports"
5,"Bad Coordinates","Nowhere","Nowhere","BAD","XBAD",north,east,0,0,"U","Etc/UTC","airport","OurAirports"
"#;

    #[test]
    fn parses_airport_columns() {
        let airports = parse_airports(AIRPORTS.as_bytes()).expect("parse airports");
        let codes: Vec<_> = airports.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["GKA", "MAG"]);

        let goroka = &airports[0];
        assert_eq!(goroka.name, "Goroka Airport");
        assert_eq!(goroka.latitude, -6.081689834590001);
        assert_eq!(goroka.longitude, 145.391998291);
    }

    #[test]
    fn parses_route_columns() {
        let data = "2B,410,AER,2965,KZN,2990,,0,CR2\n2B,410,ASF,2966,MRV,2962,,0,CR2\nshort,row\n";
        let routes = parse_routes(data.as_bytes()).expect("parse routes");
        assert_eq!(
            routes,
            vec![Route::new("AER", "KZN"), Route::new("ASF", "MRV")]
        );
    }

    #[test]
    fn invalid_utf8_does_not_abort_airport_parsing() {
        let mut data = Vec::new();
        data.extend_from_slice(
            b"1,\"Good Airport\",\"Town\",\"Land\",\"GDA\",\"XGDA\",1.0,2.0,0,0,\"U\",\"Etc/UTC\"\n",
        );
        data.extend_from_slice(
            b"2,\"Bad \xff Name\",\"Town\",\"Land\",\"BDA\",\"XBDA\",3.0,4.0,0,0,\"U\",\"Etc/UTC\"\n",
        );
        data.extend_from_slice(
            b"3,\"Last Airport\",\"Town\",\"Land\",\"LSA\",\"XLSA\",5.0,6.0,0,0,\"U\",\"Etc/UTC\"\n",
        );

        let airports = parse_airports(data.as_slice()).expect("parse airports");
        let codes: Vec<_> = airports.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["GDA", "BDA", "LSA"]);
        assert_eq!(airports[1].name, "Bad \u{FFFD} Name");
        assert_eq!(airports[1].latitude, 3.0);
    }

    #[test]
    fn invalid_utf8_does_not_abort_route_parsing() {
        let data: &[u8] = b"2B,410,AER,2965,KZN,2990,,0,CR2\n\xff\xfe,410,ASF,2966,MRV,2962,,0,CR2\n2B,410,KZN,2990,AER,2965,,0,CR2\n";

        let routes = parse_routes(data).expect("parse routes");
        assert_eq!(
            routes,
            vec![
                Route::new("AER", "KZN"),
                Route::new("ASF", "MRV"),
                Route::new("KZN", "AER"),
            ]
        );
    }

    #[test]
    fn iata_codes_are_three_alphanumerics() {
        assert!(is_iata_code("TLL"));
        assert!(is_iata_code("7A1"));
        assert!(!is_iata_code("\\N"));
        assert!(!is_iata_code("EETN"));
        assert!(!is_iata_code(""));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        assert_eq!(parse_coordinate(" 12.5 "), Some(12.5));
        assert_eq!(parse_coordinate("NaN"), None);
        assert_eq!(parse_coordinate("inf"), None);
        assert_eq!(parse_coordinate("\\N"), None);
    }
}
