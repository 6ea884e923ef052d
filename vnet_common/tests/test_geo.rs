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

use uom::si::length::{meter, nautical_mile};
use vnet_common::geo::*;

// run with "cargo test test_haversine -- --nocapture"

#[test]
fn test_haversine() {
    let p1 = GeoPoint::from_lon_lat_degrees( 0.0, 0.0);
    let p2 = GeoPoint::from_lon_lat_degrees( 0.0, 1.0);
    let d = p1.haversine_distance(&p2);
    println!("distance {} -> {} = {}m", p1, p2, d.get::<meter>());
    assert!( (d.get::<meter>() - 111195.08).abs() < 1.0); // mean earth radius 6371008.8m

    // 0.4deg latitude is less than 30nm, 0.6deg is more
    let p3 = GeoPoint::from_lon_lat_degrees( 0.0, 0.4);
    let p4 = GeoPoint::from_lon_lat_degrees( 0.0, 0.6);
    assert!( p1.haversine_distance(&p3).get::<nautical_mile>() < 30.0);
    assert!( p1.haversine_distance(&p4).get::<nautical_mile>() > 30.0);

    // distance across the anti-meridian is short
    let p5 = GeoPoint::from_lon_lat_degrees( 179.9, 0.0);
    let p6 = GeoPoint::from_lon_lat_degrees( -179.9, 0.0);
    let d = p5.haversine_distance(&p6);
    println!("anti-meridian distance = {}nm", d.get::<nautical_mile>());
    assert!( d.get::<nautical_mile>() < 13.0);
}

#[test]
fn test_geo_point_normalization() {
    let p = GeoPoint::from_lon_lat_degrees( 200.0, 45.0);
    assert_eq!( p.longitude_degrees(), -160.0);
    assert_eq!( p.latitude_degrees(), 45.0);
    assert!( p.is_valid());

    let s = serde_json::to_string(&p).unwrap();
    println!("serialized: {s}");
    assert_eq!( s, r#"{"lon":-160.0,"lat":45.0}"#);
}

#[test]
fn test_rect_basics() {
    let r = GeoRect::from_wsen_degrees( -10.0, 40.0, 30.0, 20.0); // south/north swapped
    println!("rect: {r}");
    assert_eq!( r.south, 20.0);
    assert_eq!( r.north, 40.0);
    assert!( !r.crosses_antimeridian());
    assert_eq!( r.width_degrees(), 40.0);
    assert_eq!( r.height_degrees(), 20.0);

    assert!( r.contains_point( &GeoPoint::from_lon_lat_degrees( 0.0, 30.0)));
    assert!( r.contains_point( &GeoPoint::from_lon_lat_degrees( 30.0, 40.0))); // inclusive
    assert!( !r.contains_point( &GeoPoint::from_lon_lat_degrees( 31.0, 30.0)));

    let r1 = GeoRect::parse_wsen( "-10, 20, 30, 40").unwrap();
    assert_eq!( r, r1);
    assert!( GeoRect::parse_wsen( "-10,20,30").is_none());
    assert!( GeoRect::parse_wsen( "a,b,c,d").is_none());

    let r2: GeoRect = ron::from_str( "(west: 179.0, south: -10.0, east: -179.0, north: 10.0)").unwrap();
    assert!( r2.crosses_antimeridian());
}

#[test]
fn test_antimeridian_split() {
    let r = GeoRect::from_wsen_degrees( 179.0, -10.0, -179.0, 10.0);
    println!("rect: {r}");
    assert!( r.crosses_antimeridian());
    assert_eq!( r.width_degrees(), 2.0);

    assert!( r.contains_point( &GeoPoint::from_lon_lat_degrees( 179.5, 0.0)));
    assert!( r.contains_point( &GeoPoint::from_lon_lat_degrees( -179.5, 0.0)));
    assert!( !r.contains_point( &GeoPoint::from_lon_lat_degrees( 0.0, 0.0)));

    let parts = r.split();
    println!("parts: {parts:?}");
    assert_eq!( parts.len(), 2);
    assert_eq!( parts[0], GeoRect{ west: 179.0, south: -10.0, east: 180.0, north: 10.0});
    assert_eq!( parts[1], GeoRect{ west: -180.0, south: -10.0, east: -179.0, north: 10.0});

    for p in r.split_inflated( 0.2, 0.1) {
        println!("inflated part: {p}");
        assert!( !p.crosses_antimeridian());
        assert!( p.west >= -180.0 && p.east <= 180.0);
    }
}

#[test]
fn test_inflation() {
    let r = GeoRect::from_wsen_degrees( 0.0, 0.0, 10.0, 10.0);
    let ri = r.inflated( 0.2, 0.1);
    println!("inflated: {ri}");
    assert!( (ri.west + 1.1).abs() < 1e-9);
    assert!( (ri.east - 11.1).abs() < 1e-9);
    assert!( (ri.south + 1.1).abs() < 1e-9);
    assert!( (ri.north - 11.1).abs() < 1e-9);

    assert!( ri.contains_rect( &r));
    assert!( !r.contains_rect( &ri));
    assert!( ri.contains_rect( &GeoRect::from_wsen_degrees( -1.0, -1.0, 11.0, 11.0)));
    assert!( !ri.contains_rect( &GeoRect::from_wsen_degrees( -2.0, 0.0, 10.0, 10.0)));

    // growing over the anti-meridian produces a wrapping rectangle
    let r = GeoRect::from_wsen_degrees( 170.0, 0.0, 179.0, 10.0);
    let ri = r.inflated( 0.0, 2.0);
    println!("inflated over anti-meridian: {ri}");
    assert!( ri.crosses_antimeridian());
    assert!( ri.contains_rect( &r));
    assert!( ri.contains_rect( &GeoRect::from_wsen_degrees( 179.0, 0.0, -179.5, 10.0)));

    // latitudes are clamped, huge rects become full span
    let r = GeoRect::from_wsen_degrees( -170.0, -89.0, 170.0, 89.0);
    let ri = r.inflated( 0.2, 0.1);
    assert_eq!( ri.south, -90.0);
    assert_eq!( ri.north, 90.0);
    assert!( ri.is_full_lon_span());
    assert!( ri.contains_rect( &GeoRect::from_wsen_degrees( 100.0, 0.0, -100.0, 10.0)));
}
