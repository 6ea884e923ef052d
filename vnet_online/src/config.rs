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

use std::{collections::HashMap, path::Path, time::Duration};
use serde::{Serialize,Deserialize};
use vnet_common::geo::GeoRect;

use crate::{records::FacilityType, errors::Result};

/// the online network the user has selected
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum OnlineNetwork {
    None,
    Vatsim,
    Ivao,
    Custom,        // a whazzup feed URL without status document
    CustomStatus   // a status document URL that points to the whazzup feed
}

impl OnlineNetwork {
    pub fn is_custom (&self)->bool {
        matches!( self, OnlineNetwork::Custom | OnlineNetwork::CustomStatus)
    }

    /// user facing network name, empty for `None`
    pub fn name (&self)->&'static str {
        match self {
            OnlineNetwork::None => "",
            OnlineNetwork::Vatsim => "VATSIM",
            OnlineNetwork::Ivao => "IVAO",
            OnlineNetwork::Custom | OnlineNetwork::CustomStatus => "Custom Network"
        }
    }
}

/// the field layout of client lines in whazzup feeds
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum FeedFormat {
    Vatsim,
    Ivao,
    Unknown
}

/// reload interval override for known networks
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum ReloadInterval {
    /// use what the most recent feed advertises
    Auto,
    /// fixed number of seconds
    Fixed(u64)
}

impl ReloadInterval {
    /// map the external option value, which uses -1 for "auto"
    pub fn from_option_value (v: i64)->Self {
        if v < 0 { ReloadInterval::Auto } else { ReloadInterval::Fixed(v as u64) }
    }
}

/// the minimum reload interval for known networks
pub const MIN_RELOAD_SECS: u64 = 60;

/// per facility type display radius overrides in nautical miles. Types without entry use the visual range
/// reported by the feed
pub fn default_atc_radii ()->HashMap<FacilityType,f64> {
    HashMap::from([
        (FacilityType::Ground, 5.0),
        (FacilityType::Tower, 10.0),
        (FacilityType::Approach, 20.0)
    ])
}

fn default_true()->bool { true }

fn default_custom_reload_secs()->u64 { 180 }

/// immutable snapshot of the network related options. Changing any of these has to go through
/// `OnlineDataController::options_changed()`
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct NetworkConfig {
    pub network: OnlineNetwork,
    pub format: FeedFormat,

    #[serde(default)]
    pub status_url: Option<String>,

    #[serde(default)]
    pub whazzup_url: Option<String>,

    /// reload interval for custom networks, used as is
    #[serde(default = "default_custom_reload_secs")]
    pub custom_reload_secs: u64,

    /// reload interval for known networks, floored at MIN_RELOAD_SECS
    pub reload_override: ReloadInterval,

    #[serde(default = "default_atc_radii")]
    pub atc_radii: HashMap<FacilityType,f64>,

    #[serde(default = "default_true")]
    pub use_user_agent: bool,
}

impl NetworkConfig {
    pub fn none ()->Self {
        NetworkConfig {
            network: OnlineNetwork::None,
            format: FeedFormat::Unknown,
            status_url: None,
            whazzup_url: None,
            custom_reload_secs: default_custom_reload_secs(),
            reload_override: ReloadInterval::Auto,
            atc_radii: default_atc_radii(),
            use_user_agent: true
        }
    }

    pub fn status_url (&self)->Option<&str> { non_empty(&self.status_url) }
    pub fn whazzup_url (&self)->Option<&str> { non_empty(&self.whazzup_url) }

    pub fn user_agent (&self)->Option<String> {
        if self.use_user_agent {
            Some( format!("vnet/{} Config/{}", env!("CARGO_PKG_VERSION"), self.network.name()))
        } else {
            None
        }
    }
}

fn non_empty (s: &Option<String>)->Option<&str> {
    s.as_deref().filter( |s| !s.is_empty())
}

/// parameters of the spatial aircraft query cache
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// relative growth of query rectangles
    pub inflation_factor: f64,
    /// absolute growth of query rectangles in degrees
    pub inflation_increment: f64,
    /// maximum number of records per query
    pub max_rows: usize,
    /// online aircraft closer than this to a simulator aircraft with the same registration are hidden
    pub duplicate_distance_nm: f64,
}

impl Default for CacheConfig {
    fn default()->Self {
        CacheConfig {
            inflation_factor: 0.2,
            inflation_increment: 0.1,
            max_rows: 5000,
            duplicate_distance_nm: 30.0
        }
    }
}

fn default_timeout()->Duration { Duration::from_secs(30) }

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct OnlineConfig {
    pub network: NetworkConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    /// HTTP request timeout
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// optional region the monitor periodically queries
    #[serde(default)]
    pub query_rect: Option<GeoRect>,
}

pub fn load_config_path<C,P> (path: P)->Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = std::fs::read( path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

pub fn parse_config<C> (src: &str)->Result<C> where C: for <'a> Deserialize<'a> {
    Ok( ron::de::from_str( src)? )
}
