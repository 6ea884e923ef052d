/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::str::FromStr;
use uom::si::{f64::{Length,Velocity}, length::{foot,nautical_mile}, velocity::knot};
use vnet_common::{datetime::parse_compact_utc, geo::GeoPoint};

use crate::{
    config::FeedFormat,
    errors::{parse_error, Result},
    records::{AircraftRecord, AtcRecord, FacilityType, ServerRecord, StatusDocument, WhazzupDocument}
};

/// the text parsers for status and whazzup documents. Input is already decoded
pub trait FeedParser: Send + 'static {
    fn parse_status (&self, text: &str)->Result<StatusDocument>;
    fn parse_whazzup (&self, text: &str, format: FeedFormat)->Result<WhazzupDocument>;
    fn parse_servers (&self, text: &str, format: FeedFormat)->Result<Vec<ServerRecord>>;
}

/// parser for the legacy `status.txt` and `whazzup.txt` formats
#[derive(Debug,Default,Clone)]
pub struct WhazzupParser;

impl FeedParser for WhazzupParser {

    fn parse_status (&self, text: &str)->Result<StatusDocument> {
        let mut doc = StatusDocument::default();
        let mut msgs: Vec<&str> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') { continue }

            if let Some((key,value)) = line.split_once('=') {
                let value = value.trim();
                match key.trim() {
                    "url0" => doc.urls.push( value.to_string()),
                    "gzurl0" => doc.gz_urls.push( value.to_string()),
                    "url1" => doc.server_urls.push( value.to_string()),
                    "voice0" => doc.voice_urls.push( value.to_string()),
                    "metar0" => doc.metar_urls.push( value.to_string()),
                    "moveto0" => doc.moved_to.push( value.to_string()),
                    "msg0" => msgs.push( value),
                    _ => {} // ignore unknown keys
                }
            }
        }

        if !msgs.is_empty() {
            doc.message = Some( msgs.join("\n"))
        }
        Ok(doc)
    }

    fn parse_whazzup (&self, text: &str, format: FeedFormat)->Result<WhazzupDocument> {
        let mut doc = WhazzupDocument::default();
        let mut section = Section::None;
        let mut n_sections = 0;

        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with(';') { continue }

            if line.starts_with('!') {
                section = Section::from_header( line);
                if section != Section::Unknown { n_sections += 1 }
                if section == Section::Servers { doc.has_servers = true }
                continue
            }

            match section {
                Section::General => parse_general_line( &mut doc, line),
                Section::Clients => parse_client_line( &mut doc, line, format),
                Section::Servers => {
                    if let Some(server) = parse_server_line( line) { doc.servers.push( server) }
                }
                _ => {} // prefiles and airports are not used
            }
        }

        if n_sections == 0 {
            Err( parse_error!("no whazzup sections found"))
        } else {
            Ok(doc)
        }
    }

    fn parse_servers (&self, text: &str, format: FeedFormat)->Result<Vec<ServerRecord>> {
        let doc = self.parse_whazzup( text, format)?;
        Ok( doc.servers )
    }
}

#[derive(Debug,Clone,Copy,PartialEq)]
enum Section { None, General, Clients, Servers, Prefile, Airports, Unknown }

impl Section {
    fn from_header (line: &str)->Self {
        match line.trim().trim_end_matches(':') {
            "!GENERAL" => Section::General,
            "!CLIENTS" => Section::Clients,
            "!SERVERS" | "!VOICE SERVERS" => Section::Servers,
            "!PREFILE" => Section::Prefile,
            "!AIRPORTS" => Section::Airports,
            _ => Section::Unknown
        }
    }
}

fn parse_general_line (doc: &mut WhazzupDocument, line: &str) {
    if let Some((key,value)) = line.split_once('=') {
        let value = value.trim();
        match key.trim().to_uppercase().as_str() {
            "VERSION" => doc.version = value.parse().ok(),
            "RELOAD" => doc.reload_minutes = value.parse().ok(),
            "UPDATE" => doc.update = parse_compact_utc( value),
            "CONNECTED CLIENTS" => doc.connected_clients = value.parse().ok(),
            "ATIS ALLOW MIN" => doc.atis_allow_min = value.parse().ok(),
            _ => {}
        }
    }
}

// client line field indices
const CALLSIGN: usize = 0;
const VID: usize = 1;
const NAME: usize = 2;
const CLIENT_TYPE: usize = 3;
const FREQUENCY: usize = 4;
const LATITUDE: usize = 5;
const LONGITUDE: usize = 6;
const ALTITUDE: usize = 7;
const GROUNDSPEED: usize = 8;
const AIRCRAFT: usize = 9;
const DEPARTURE: usize = 11;
const DESTINATION: usize = 13;
const SERVER: usize = 14;
const TRANSPONDER: usize = 17;
const FACILITY: usize = 18;
const VISUAL_RANGE: usize = 19;
const ATIS: usize = 35;
const LOGON_TIME: usize = 37;
const HEADING_VATSIM: usize = 38;
const HEADING_IVAO: usize = 45;

#[inline]
fn field<'a> (fields: &[&'a str], idx: usize)->&'a str {
    fields.get(idx).map( |s| s.trim()).unwrap_or("")
}

fn parse_opt<T: FromStr> (fields: &[&str], idx: usize)->Option<T> {
    field( fields, idx).parse::<T>().ok()
}

fn parse_position (fields: &[&str])->Option<GeoPoint> {
    let lat: f64 = parse_opt( fields, LATITUDE)?;
    let lon: f64 = parse_opt( fields, LONGITUDE)?;
    let pos = GeoPoint::from_lon_lat_degrees( lon, lat);
    if pos.is_valid() { Some(pos) } else { None }
}

fn parse_client_line (doc: &mut WhazzupDocument, line: &str, format: FeedFormat) {
    let fields: Vec<&str> = line.split(':').collect();

    let callsign = field( &fields, CALLSIGN);
    if callsign.is_empty() { return }

    let Some(position) = parse_position( &fields) else { return }; // can't show clients without position

    match field( &fields, CLIENT_TYPE) {
        "PILOT" => {
            let heading_idx = if format == FeedFormat::Ivao { HEADING_IVAO } else { HEADING_VATSIM };
            doc.clients.push( AircraftRecord {
                id: 0,
                callsign: callsign.to_string(),
                vid: field( &fields, VID).to_string(),
                name: field( &fields, NAME).to_string(),
                aircraft_type: field( &fields, AIRCRAFT).to_string(),
                position,
                altitude: Length::new::<foot>( parse_opt( &fields, ALTITUDE).unwrap_or(0.0)),
                groundspeed: Velocity::new::<knot>( parse_opt( &fields, GROUNDSPEED).unwrap_or(0.0)),
                heading: parse_opt( &fields, heading_idx),
                transponder: field( &fields, TRANSPONDER).to_string(),
                departure: field( &fields, DEPARTURE).to_string(),
                destination: field( &fields, DESTINATION).to_string(),
                server: field( &fields, SERVER).to_string(),
                logon_time: parse_compact_utc( field( &fields, LOGON_TIME)),
            });
        }
        "ATC" => {
            let visual_range = Length::new::<nautical_mile>( parse_opt( &fields, VISUAL_RANGE).unwrap_or(0.0));
            doc.atcs.push( AtcRecord {
                id: 0,
                callsign: callsign.to_string(),
                vid: field( &fields, VID).to_string(),
                name: field( &fields, NAME).to_string(),
                facility: parse_opt( &fields, FACILITY).map( FacilityType::from_code).unwrap_or( FacilityType::Unknown),
                frequency: field( &fields, FREQUENCY).to_string(),
                position,
                visual_range,
                radius: visual_range, // overridden by the store
                atis: field( &fields, ATIS).replace( "^§", "\n"),
                logon_time: parse_compact_utc( field( &fields, LOGON_TIME)),
            });
        }
        _ => {}
    }
}

fn parse_server_line (line: &str)->Option<ServerRecord> {
    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() < 2 { return None }

    Some( ServerRecord {
        ident: field( &fields, 0).to_string(),
        host: field( &fields, 1).to_string(),
        location: field( &fields, 2).to_string(),
        name: field( &fields, 3).to_string(),
        clients_allowed: field( &fields, 4) == "1",
    })
}
