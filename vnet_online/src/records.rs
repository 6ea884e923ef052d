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

use std::fmt;
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use rand::seq::IndexedRandom;
use uom::si::{f64::{Length,Velocity}, length::{foot,nautical_mile}, velocity::knot};
use vnet_common::geo::GeoPoint;

/* #region facilities and servers *********************************************************************/

/// ATC facility types as reported in the client lines of whazzup feeds
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum FacilityType {
    Observer,
    FlightServiceStation,
    Delivery,
    Ground,
    Tower,
    Approach,
    Center,
    Unknown
}

impl FacilityType {
    pub fn from_code (code: i64)->Self {
        match code {
            0 => FacilityType::Observer,
            1 => FacilityType::FlightServiceStation,
            2 => FacilityType::Delivery,
            3 => FacilityType::Ground,
            4 => FacilityType::Tower,
            5 => FacilityType::Approach,
            6 => FacilityType::Center,
            _ => FacilityType::Unknown
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct ServerRecord {
    pub ident: String,
    pub host: String, // host name or IP address
    pub location: String,
    pub name: String,
    pub clients_allowed: bool
}

/* #endregion facilities and servers */

/* #region clients ************************************************************************************/

/// an online pilot. The online callsign is what we match against simulator aircraft registrations
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct AircraftRecord {
    pub id: u64, // assigned by the store, 0 if not stored yet
    pub callsign: String,
    pub vid: String,
    pub name: String,
    pub aircraft_type: String,
    pub position: GeoPoint,
    pub altitude: Length,
    pub groundspeed: Velocity,
    #[serde(skip_serializing_if = "vnet_common::is_none")]
    pub heading: Option<f64>,
    pub transponder: String,
    pub departure: String,
    pub destination: String,
    pub server: String,
    #[serde(skip_serializing_if = "vnet_common::is_none")]
    pub logon_time: Option<DateTime<Utc>>,
}

impl AircraftRecord {
    /// create a record with only identity and position set
    pub fn new (callsign: impl ToString, lon: f64, lat: f64, altitude_ft: f64)->Self {
        AircraftRecord {
            id: 0,
            callsign: callsign.to_string(),
            vid: String::new(),
            name: String::new(),
            aircraft_type: String::new(),
            position: GeoPoint::from_lon_lat_degrees( lon, lat),
            altitude: Length::new::<foot>( altitude_ft),
            groundspeed: Velocity::new::<knot>( 0.0),
            heading: None,
            transponder: String::new(),
            departure: String::new(),
            destination: String::new(),
            server: String::new(),
            logon_time: None
        }
    }

    #[inline] pub fn registration (&self)->&str { &self.callsign }
}

impl fmt::Display for AircraftRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{} ({}) at {} {:.0}ft {:.0}kn",
            self.callsign, self.aircraft_type, self.position, self.altitude.get::<foot>(), self.groundspeed.get::<knot>())
    }
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct AtcRecord {
    pub id: u64,
    pub callsign: String,
    pub vid: String,
    pub name: String,
    pub facility: FacilityType,
    pub frequency: String,
    pub position: GeoPoint,
    pub visual_range: Length,
    pub radius: Length, // display radius, configured override or visual range
    pub atis: String,
    #[serde(skip_serializing_if = "vnet_common::is_none")]
    pub logon_time: Option<DateTime<Utc>>,
}

impl AtcRecord {
    pub fn radius_nm (&self)->f64 { self.radius.get::<nautical_mile>() }
}

/* #endregion clients */

/* #region documents **********************************************************************************/

/// the bootstrap document that tells us where to find the feeds. Each key can have several mirror entries
#[derive(Debug,Clone,Default,PartialEq)]
pub struct StatusDocument {
    pub urls: Vec<String>,        // url0: plain whazzup feed
    pub gz_urls: Vec<String>,     // gzurl0: gzipped whazzup feed
    pub server_urls: Vec<String>, // url1: server list
    pub voice_urls: Vec<String>,  // voice0: voice server list
    pub metar_urls: Vec<String>,  // metar0
    pub moved_to: Vec<String>,    // moveto0: new status document location
    pub message: Option<String>,  // msg0 lines joined by newlines
}

impl StatusDocument {
    /// pick a whazzup feed mirror, preferring gzipped ones. Returns the URL and if it is gzipped
    pub fn whazzup_url (&self)->Option<(String,bool)> {
        if let Some(url) = choose(&self.gz_urls) {
            Some( (url, true) )
        } else {
            choose(&self.urls).map( |url| (url, false))
        }
    }

    /// the auxiliary server feed, preferring the voice server list
    pub fn servers_url (&self)->Option<String> {
        choose(&self.voice_urls).or_else( || choose(&self.server_urls))
    }

    pub fn message (&self)->Option<&str> {
        self.message.as_deref().filter( |m| !m.trim().is_empty())
    }
}

fn choose (list: &[String])->Option<String> {
    let mut rng = rand::rng();
    list.choose(&mut rng).cloned()
}

/// the parsed contents of a whazzup feed
#[derive(Debug,Clone,Default)]
pub struct WhazzupDocument {
    pub version: Option<u32>,
    pub reload_minutes: Option<u32>,
    pub update: Option<DateTime<Utc>>,
    pub connected_clients: Option<u32>,
    pub atis_allow_min: Option<u32>,

    pub clients: Vec<AircraftRecord>,
    pub atcs: Vec<AtcRecord>,
    pub servers: Vec<ServerRecord>,
    pub has_servers: bool, // did the feed have a server section at all
}

impl WhazzupDocument {
    /// feeds are fresh if they are newer than what we know, or if we can't tell
    pub fn is_newer_than (&self, last_update: &Option<DateTime<Utc>>)->bool {
        match (&self.update, last_update) {
            (Some(update), Some(last)) => update > last,
            _ => true
        }
    }
}

/* #endregion documents */
