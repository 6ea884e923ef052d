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
//! this module provides the geodetic types we need for map queries: points on the WGS84 surface
//! (wrapping `geo::Point` in geodetic degrees) and longitude/latitude rectangles that can cross
//! the anti-meridian, which `geo::Rect` cannot represent since it normalizes min/max corners.
//! Lengths are returned as `uom` quantities.

use std::fmt;
use serde::{Serialize,Deserialize};
use serde::ser::{Serializer, SerializeStruct};
use geo::{Distance, Haversine, Point};
use uom::si::f64::Length;
use uom::si::length::meter;

use crate::geo_constants::FULL_LON_SPAN;

#[inline]
pub fn normalize_90 (d:f64) -> f64 {
    let x = d % 360.0;

    if x < -90.0 { -180.0 - x }
    else if x > 90.0 { 180.0 - x }
    else { x }
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( normalize_180(lon), normalize_90(lat)))
    }

    #[inline] pub fn longitude_degrees(&self) -> f64 { self.0.x() }
    #[inline] pub fn latitude_degrees(&self) -> f64 { self.0.y() }

    pub fn point (&self) -> &Point { &self.0 }

    pub fn is_valid (&self)->bool { self.0.x().is_finite() && self.0.y().is_finite() }

    /// great circle distance on a sphere with mean earth radius
    pub fn haversine_distance (&self, other: &GeoPoint) -> Length {
        let dist = Haversine.distance( self.0, other.0);
        Length::new::<meter>(dist)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0.x(),self.0.y())
    }
}

impl Serialize for GeoPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoPoint", 2)?;
        state.serialize_field("lon", &self.longitude_degrees())?;
        state.serialize_field("lat", &self.latitude_degrees())?;
        state.end()
    }
}

/* #endregion GeoPoint */

/* #region GeoRect ***********************************************************************************************/

/// a longitude/latitude rectangle in degrees.
/// If `west > east` the rectangle crosses the anti-meridian (e.g. west=179, east=-179 is a 2deg wide box).
/// A rectangle with `west == -180` and `east == 180` covers all longitudes
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoRect {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64
}

impl GeoRect {
    pub fn from_wsen_degrees (west: f64, south: f64, east: f64, north: f64) -> Self {
        let (south,north) = if south <= north { (south,north) } else { (north,south) };
        GeoRect {
            west: normalize_180(west),
            south: south.clamp(-90.0, 90.0),
            east: normalize_180(east),
            north: north.clamp(-90.0, 90.0)
        }
    }

    /// parse "west,south,east,north" degrees
    pub fn parse_wsen (s: &str) -> Option<Self> {
        let vs: Vec<f64> = s.split(',').map( |p| p.trim().parse::<f64>()).collect::<Result<Vec<_>,_>>().ok()?;
        if vs.len() == 4 {
            Some( GeoRect::from_wsen_degrees( vs[0], vs[1], vs[2], vs[3]))
        } else {
            None
        }
    }

    #[inline] pub fn crosses_antimeridian (&self)->bool { self.west > self.east }

    pub fn is_full_lon_span (&self)->bool { self.width_degrees() >= FULL_LON_SPAN }

    pub fn width_degrees (&self)->f64 {
        if self.crosses_antimeridian() { self.east - self.west + FULL_LON_SPAN } else { self.east - self.west }
    }

    pub fn height_degrees (&self)->f64 { self.north - self.south }

    pub fn contains_lon (&self, lon: f64)->bool {
        if self.crosses_antimeridian() {
            lon >= self.west || lon <= self.east
        } else {
            lon >= self.west && lon <= self.east
        }
    }

    pub fn contains_point (&self, p: &GeoPoint)->bool {
        let lat = p.latitude_degrees();
        lat >= self.south && lat <= self.north && self.contains_lon( p.longitude_degrees())
    }

    /// do all parts of `other` lie within the receiver
    pub fn contains_rect (&self, other: &GeoRect)->bool {
        if other.south < self.south || other.north > self.north { return false }
        if self.is_full_lon_span() { return true }

        let own_parts = self.split();
        other.split().iter().all( |o| {
            own_parts.iter().any( |s| s.west <= o.west && o.east <= s.east)
        })
    }

    /// split into one or two rectangles that don't cross the anti-meridian
    pub fn split (&self)->Vec<GeoRect> {
        if self.crosses_antimeridian() {
            vec![
                GeoRect { west: self.west, south: self.south, east: 180.0, north: self.north },
                GeoRect { west: -180.0, south: self.south, east: self.east, north: self.north },
            ]
        } else {
            vec![ *self ]
        }
    }

    /// scale the extent by `1 + factor` (half of the growth going to each side) and add a constant
    /// `increment` (in degrees) to each side.
    /// Latitudes are clamped to the poles. If the result covers the whole globe in longitude we
    /// return a full span rectangle, otherwise longitudes are normalized (which can make the result
    /// cross the anti-meridian)
    pub fn inflated (&self, factor: f64, increment: f64)->GeoRect {
        let dx = self.width_degrees() * factor / 2.0 + increment;
        let dy = self.height_degrees() * factor / 2.0 + increment;

        let south = (self.south - dy).max(-90.0);
        let north = (self.north + dy).min(90.0);

        if self.width_degrees() + 2.0 * dx >= FULL_LON_SPAN {
            GeoRect { west: -180.0, south, east: 180.0, north }
        } else {
            GeoRect { west: normalize_180(self.west - dx), south, east: normalize_180(self.east + dx), north }
        }
    }

    /// the query rectangles for this region: split at the anti-meridian, then inflate each part.
    /// Parts are clamped to [-180,180] so that none of the results crosses the anti-meridian
    pub fn split_inflated (&self, factor: f64, increment: f64)->Vec<GeoRect> {
        self.split().iter().map( |r| {
            let dx = r.width_degrees() * factor / 2.0 + increment;
            let dy = r.height_degrees() * factor / 2.0 + increment;
            GeoRect {
                west: (r.west - dx).max(-180.0),
                south: (r.south - dy).max(-90.0),
                east: (r.east + dx).min(180.0),
                north: (r.north + dy).min(90.0)
            }
        }).collect()
    }
}

impl fmt::Display for GeoRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[w:{},s:{},e:{},n:{}]", self.west, self.south, self.east, self.north)
    }
}

/* #endregion GeoRect */
