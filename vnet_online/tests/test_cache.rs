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

use vnet_common::geo::GeoRect;
use vnet_online::{
    cache::OnlineAircraftCache, AircraftRecord, CacheConfig, DetailLevel, MemoryStore, OnlineStore,
    SimAircraft, SimulatorSnapshot, WhazzupDocument
};

fn store_with (aircraft: Vec<AircraftRecord>)->MemoryStore {
    let mut store = MemoryStore::new();
    store.write_data_feed( &WhazzupDocument { clients: aircraft, ..Default::default() });
    store
}

fn user_at (registration: &str, lon: f64, lat: f64)->SimulatorSnapshot {
    SimulatorSnapshot { user_aircraft: Some( SimAircraft::new( registration, lon, lat)), ..Default::default() }
}

fn callsigns (list: &[AircraftRecord])->Vec<String> {
    let mut cs: Vec<String> = list.iter().map( |ac| ac.callsign.clone()).collect();
    cs.sort();
    cs
}

#[test]
fn test_dedup() {
    let store = store_with( vec![
        AircraftRecord::new( "N12345", 10.0, 50.0, 5000.0),
        AircraftRecord::new( "D-ABCD", 10.2, 50.2, 8000.0),
    ]);
    let rect = GeoRect::from_wsen_degrees( 9.0, 49.0, 11.0, 51.0);

    // simulator aircraft with the same registration 0.4deg (~24nm) away -> hidden
    let mut cache = OnlineAircraftCache::new( CacheConfig::default());
    let list = cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &user_at( "N12345", 10.0, 50.4));
    println!("close: {:?}", callsigns(list));
    assert_eq!( callsigns(list), vec!["D-ABCD"]);

    // 0.6deg (~36nm) away -> shown
    let mut cache = OnlineAircraftCache::new( CacheConfig::default());
    let list = cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &user_at( "N12345", 10.0, 50.6));
    println!("far: {:?}", callsigns(list));
    assert_eq!( callsigns(list), vec!["D-ABCD", "N12345"]);
}

#[test]
fn test_ai_registrations() {
    let snapshot = SimulatorSnapshot {
        user_aircraft: Some( SimAircraft::new( "", 0.0, 0.0)), // empty registrations are ignored
        ai_aircraft: vec![ SimAircraft::new( "N12345", 10.0, 50.0) ],
        connected: false,
        debug: false
    };
    assert!( snapshot.registrations().is_empty());

    let connected = SimulatorSnapshot { connected: true, ..snapshot.clone() };
    assert_eq!( connected.registrations().len(), 1);

    let debug = SimulatorSnapshot { debug: true, ..snapshot.clone() };
    assert!( debug.registrations().get( "N12345").is_some());

    let store = store_with( vec![ AircraftRecord::new( "N12345", 10.0, 50.0, 5000.0) ]);
    let rect = GeoRect::from_wsen_degrees( 9.0, 49.0, 11.0, 51.0);

    let mut cache = OnlineAircraftCache::new( CacheConfig::default());
    assert_eq!( cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &snapshot).len(), 1);
    assert_eq!( cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &connected).len(), 0);
}

#[test]
fn test_antimeridian() {
    let store = store_with( vec![
        AircraftRecord::new( "EAST", 179.5, 0.0, 30000.0),
        AircraftRecord::new( "WEST", -179.5, 1.0, 30000.0),
        AircraftRecord::new( "FAR", 0.0, 0.0, 30000.0),
    ]);
    let rect = GeoRect::from_wsen_degrees( 179.0, -10.0, -179.0, 10.0);

    let mut cache = OnlineAircraftCache::new( CacheConfig::default());
    let list = cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &SimulatorSnapshot::default());
    println!("across anti-meridian: {:?}", callsigns(list));
    assert_eq!( callsigns(list), vec!["EAST", "WEST"]);
}

#[test]
fn test_region_cache() {
    let mut store = store_with( vec![ AircraftRecord::new( "ONE", 0.5, 0.5, 1000.0) ]);
    let rect = GeoRect::from_wsen_degrees( 0.0, 0.0, 1.0, 1.0);
    let sim = SimulatorSnapshot::default();

    let mut cache = OnlineAircraftCache::new( CacheConfig::default());
    assert_eq!( callsigns( cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &sim)), vec!["ONE"]);

    store.write_data_feed( &WhazzupDocument { clients: vec![
        AircraftRecord::new( "ONE", 0.5, 0.5, 1000.0),
        AircraftRecord::new( "TWO", 0.6, 0.6, 1000.0),
    ], ..Default::default() });

    // a small pan stays within the inflated rect, we keep what we have
    let panned = GeoRect::from_wsen_degrees( 0.05, 0.05, 1.05, 1.05);
    assert_eq!( callsigns( cache.get_aircraft( &store, &panned, DetailLevel::Normal, false, &sim)), vec!["ONE"]);

    // lazy calls never query
    let far = GeoRect::from_wsen_degrees( 20.0, 20.0, 21.0, 21.0);
    assert_eq!( cache.get_aircraft( &store, &far, DetailLevel::Normal, true, &sim).len(), 1);

    // detail level changes invalidate
    assert_eq!( cache.get_aircraft( &store, &panned, DetailLevel::High, false, &sim).len(), 2);

    // growing beyond the inflated rect invalidates
    store.write_data_feed( &WhazzupDocument { clients: vec![
        AircraftRecord::new( "THREE", 0.5, 0.5, 1000.0),
    ], ..Default::default() });
    let zoomed_out = GeoRect::from_wsen_degrees( -5.0, -5.0, 6.0, 6.0);
    assert_eq!( callsigns( cache.get_aircraft( &store, &zoomed_out, DetailLevel::High, false, &sim)), vec!["THREE"]);
}

#[test]
fn test_registration_change() {
    let mut store = store_with( vec![ AircraftRecord::new( "ONE", 0.5, 0.5, 1000.0) ]);
    let rect = GeoRect::from_wsen_degrees( 0.0, 0.0, 1.0, 1.0);

    let mut cache = OnlineAircraftCache::new( CacheConfig::default());
    assert_eq!( cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &SimulatorSnapshot::default()).len(), 1);

    store.write_data_feed( &WhazzupDocument { clients: vec![
        AircraftRecord::new( "ONE", 0.5, 0.5, 1000.0),
        AircraftRecord::new( "TWO", 0.6, 0.6, 1000.0),
    ], ..Default::default() });

    // same (empty) registrations: cached
    assert_eq!( cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &SimulatorSnapshot::default()).len(), 1);

    // a new simulator aircraft shows up: re-query
    let sim = user_at( "N1", 40.0, 40.0);
    assert_eq!( cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &sim).len(), 2);
    assert_eq!( cache.registrations().len(), 1);

    // positions don't matter, only keys
    let moved = user_at( "N1", 41.0, 41.0);
    assert!( cache.registrations().same_keys( &moved.registrations()));
}

#[test]
fn test_registration_change_region() {
    let store = store_with( vec![
        AircraftRecord::new( "ONE", 0.5, 0.5, 1000.0),
        AircraftRecord::new( "TWO", 8.0, 8.0, 1000.0),
    ]);
    let mut cache = OnlineAircraftCache::new( CacheConfig::default());

    let large = GeoRect::from_wsen_degrees( 0.0, 0.0, 10.0, 10.0);
    assert_eq!( callsigns( cache.get_aircraft( &store, &large, DetailLevel::Normal, false, &SimulatorSnapshot::default())), vec!["ONE", "TWO"]);

    // the registration change re-queries for the small rect, which becomes the cached region
    let sim = user_at( "N1", 40.0, 40.0);
    let small = GeoRect::from_wsen_degrees( 0.0, 0.0, 1.0, 1.0);
    assert_eq!( callsigns( cache.get_aircraft( &store, &small, DetailLevel::Normal, false, &sim)), vec!["ONE"]);
    assert_eq!( cache.registrations().len(), 1);

    // inside the old large region but outside the small one
    let other = GeoRect::from_wsen_degrees( 7.0, 7.0, 9.0, 9.0);
    let list = cache.get_aircraft( &store, &other, DetailLevel::Normal, false, &sim);
    println!("other region: {:?}", callsigns(list));
    assert_eq!( callsigns(list), vec!["TWO"]);
}

#[test]
fn test_row_cap() {
    let store = store_with( vec![
        AircraftRecord::new( "A", 0.1, 0.1, 1000.0),
        AircraftRecord::new( "B", 0.2, 0.2, 1000.0),
        AircraftRecord::new( "C", 0.3, 0.3, 1000.0),
    ]);
    let rect = GeoRect::from_wsen_degrees( 0.0, 0.0, 1.0, 1.0);
    let sim = SimulatorSnapshot::default();

    let config = CacheConfig { max_rows: 2, ..CacheConfig::default() };
    let mut cache = OnlineAircraftCache::new( config);

    assert_eq!( cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &sim).len(), 2);
    assert_eq!( cache.aircraft().len(), 2);

    // the capped result is not trusted for the region, the next call re-queries (with the same cap)
    assert_eq!( cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &sim).len(), 2);
}

#[test]
fn test_clear() {
    let store = store_with( vec![ AircraftRecord::new( "A", 0.1, 0.1, 1000.0) ]);
    let rect = GeoRect::from_wsen_degrees( 0.0, 0.0, 1.0, 1.0);

    let mut cache = OnlineAircraftCache::new( CacheConfig::default());
    cache.get_aircraft( &store, &rect, DetailLevel::Normal, false, &user_at( "N1", 40.0, 40.0));
    assert_eq!( cache.aircraft().len(), 1);
    assert_eq!( cache.registrations().len(), 1);

    cache.clear();
    assert!( cache.aircraft().is_empty());
    assert!( cache.registrations().is_empty());

    // lazy calls on a cleared cache don't query
    assert!( cache.get_aircraft( &store, &rect, DetailLevel::Normal, true, &SimulatorSnapshot::default()).is_empty());
}
