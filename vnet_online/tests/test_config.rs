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

use std::{path::PathBuf, time::Duration};
use vnet_online::{
    AircraftRecord, FacilityType, FeedFormat, OnlineConfig, OnlineNetwork, ReloadInterval,
    config::parse_config, load_config_path
};

fn config_path (name: &str)->PathBuf {
    PathBuf::from( env!("CARGO_MANIFEST_DIR")).join( "configs").join( name)
}

#[test]
fn test_vatsim_config() {
    let config: OnlineConfig = load_config_path( config_path( "vatsim.ron")).unwrap();
    println!("{config:#?}");

    let net = &config.network;
    assert_eq!( net.network, OnlineNetwork::Vatsim);
    assert_eq!( net.status_url(), Some("https://status.vatsim.net/status.txt"));
    assert!( net.whazzup_url().is_none());
    assert_eq!( net.atc_radii.get( &FacilityType::Tower), Some(&10.0));
    assert_eq!( config.timeout, Duration::from_secs(30));
    assert!( config.query_rect.is_some());
}

#[test]
fn test_custom_config() {
    let config: OnlineConfig = load_config_path( config_path( "custom.ron")).unwrap();
    assert!( config.network.network.is_custom());
    assert_eq!( config.network.custom_reload_secs, 30);
    assert!( config.network.status_url().is_none());
    assert_eq!( config.cache.max_rows, 5000); // default
    assert_eq!( config.timeout, Duration::from_secs(10));
}

#[test]
fn test_defaults() {
    let config: OnlineConfig = parse_config( r#"OnlineConfig(
        network: NetworkConfig( network: Ivao, format: Ivao, status_url: Some(""), reload_override: Fixed(120) )
    )"#).unwrap();

    let net = &config.network;
    assert_eq!( net.format, FeedFormat::Ivao);
    assert_eq!( net.reload_override, ReloadInterval::Fixed(120));
    assert!( net.status_url().is_none()); // empty URLs count as not configured
    assert_eq!( net.custom_reload_secs, 180);
    assert!( net.use_user_agent);
    assert_eq!( net.user_agent().unwrap(), format!("vnet/{} Config/IVAO", env!("CARGO_PKG_VERSION")));
    assert_eq!( config.timeout, Duration::from_secs(30));

    assert!( parse_config::<OnlineConfig>( "OnlineConfig( network: 42 )").is_err());
    assert!( load_config_path::<OnlineConfig,_>( config_path( "does_not_exist.ron")).is_err());
}

#[test]
fn test_record_json() {
    let ac = AircraftRecord::new( "N12345", -122.0, 37.5, 4500.0);
    let json = serde_json::to_string( &ac).unwrap();
    println!("{json}");
    assert!( json.contains( "\"callsign\":\"N12345\""));
}
