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
#![allow(unused)]

// feed text fixtures shared by the integration tests

use std::io::Write;
use chrono::{DateTime,Utc};
use flate2::{Compression, write::GzEncoder};
use vnet_online::{FeedFormat, NetworkConfig, OnlineNetwork, ReloadInterval, config::default_atc_radii};

pub const STATUS_URL: &str = "http://status.test/status.txt";
pub const FEED_URL: &str = "http://data.test/whazzup.txt";
pub const GZ_FEED_URL: &str = "http://data.test/whazzup.txt.gz";
pub const SERVERS_URL: &str = "http://data.test/servers.txt";

pub const HEADING_VATSIM: usize = 38;
pub const HEADING_IVAO: usize = 45;

pub fn vatsim_config ()->NetworkConfig {
    NetworkConfig {
        network: OnlineNetwork::Vatsim,
        format: FeedFormat::Vatsim,
        status_url: Some(STATUS_URL.to_string()),
        whazzup_url: None,
        custom_reload_secs: 180,
        reload_override: ReloadInterval::Auto,
        atc_radii: default_atc_radii(),
        use_user_agent: true
    }
}

pub fn custom_config (whazzup_url: &str, reload_secs: u64)->NetworkConfig {
    NetworkConfig {
        network: OnlineNetwork::Custom,
        format: FeedFormat::Vatsim,
        status_url: None,
        whazzup_url: Some(whazzup_url.to_string()),
        custom_reload_secs: reload_secs,
        reload_override: ReloadInterval::Auto,
        atc_radii: default_atc_radii(),
        use_user_agent: false
    }
}

pub fn status_text (feed_url: Option<&str>, gz_feed_url: Option<&str>, servers_url: Option<&str>, msg: Option<&str>)->String {
    let mut s = String::from("; status document\n");
    if let Some(url) = feed_url { s.push_str( &format!("url0={url}\n")) }
    if let Some(url) = gz_feed_url { s.push_str( &format!("gzurl0={url}\n")) }
    if let Some(url) = servers_url { s.push_str( &format!("voice0={url}\n")) }
    s.push_str("metar0=http://metar.test/metar.php\n");
    if let Some(msg) = msg { s.push_str( &format!("msg0={msg}\n")) }
    s
}

fn client_fields ()->Vec<String> { vec![String::new(); 49] }

pub fn pilot_line (callsign: &str, lon: f64, lat: f64, alt_ft: f64, gs_kn: f64, heading_idx: usize, heading: f64)->String {
    let mut f = client_fields();
    f[0] = callsign.to_string();
    f[1] = "1234567".to_string();
    f[2] = "Jane Doe KSFO".to_string();
    f[3] = "PILOT".to_string();
    f[5] = lat.to_string();
    f[6] = lon.to_string();
    f[7] = alt_ft.to_string();
    f[8] = gs_kn.to_string();
    f[9] = "B738".to_string();
    f[11] = "KSFO".to_string();
    f[13] = "KLAX".to_string();
    f[14] = "USA-W".to_string();
    f[17] = "1200".to_string();
    f[37] = "20240115120000".to_string();
    f[heading_idx] = heading.to_string();
    f.join(":")
}

pub fn atc_line (callsign: &str, lon: f64, lat: f64, facility: i32, range_nm: f64, atis: &str)->String {
    let mut f = client_fields();
    f[0] = callsign.to_string();
    f[1] = "7654321".to_string();
    f[2] = "John Doe".to_string();
    f[3] = "ATC".to_string();
    f[4] = "118.700".to_string();
    f[5] = lat.to_string();
    f[6] = lon.to_string();
    f[18] = facility.to_string();
    f[19] = range_nm.to_string();
    f[35] = atis.to_string();
    f[37] = "20240115110000".to_string();
    f.join(":")
}

pub fn compact_utc (dt: &DateTime<Utc>)->String {
    dt.format("%Y%m%d%H%M%S").to_string()
}

pub fn whazzup_text (update: &DateTime<Utc>, reload_minutes: u32, lines: &[String])->String {
    let mut s = String::from("; created by test\n!GENERAL:\n");
    s.push_str( "VERSION = 8\n");
    s.push_str( &format!("RELOAD = {reload_minutes}\n"));
    s.push_str( &format!("UPDATE = {}\n", compact_utc(update)));
    s.push_str( &format!("CONNECTED CLIENTS = {}\n", lines.len()));
    s.push_str( "ATIS ALLOW MIN = 5\n");
    s.push_str( "!CLIENTS:\n");
    for line in lines {
        s.push_str( line);
        s.push('\n');
    }
    s.push_str( "!SERVERS:\n");
    s.push_str( "USA-W:1.2.3.4:San Francisco:USA West:1\n");
    s.push_str( "!PREFILE:\n");
    s.push_str( "!AIRPORTS:\n");
    s
}

pub fn servers_text ()->String {
    String::from("!GENERAL:\nVERSION = 8\n!VOICE SERVERS:\nrw.liveatc.net:rw.liveatc.net:USA:LiveATC:1\nvoice2.test:5.6.7.8:Germany:Voice Two:0\n")
}

pub fn gzip (data: &[u8])->Vec<u8> {
    let mut enc = GzEncoder::new( Vec::new(), Compression::default());
    enc.write_all( data).unwrap();
    enc.finish().unwrap()
}
