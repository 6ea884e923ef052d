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

use std::collections::HashMap;
use uom::si::length::nautical_mile;
use vnet_common::geo::{GeoPoint, GeoRect};
use vnet_common::trace;

use crate::{config::CacheConfig, records::AircraftRecord, store::OnlineStore};

/* #region simulator input ****************************************************************************/

/// an aircraft the simulator knows about (user or AI)
#[derive(Debug,Clone,PartialEq)]
pub struct SimAircraft {
    pub registration: String,
    pub position: GeoPoint,
}

impl SimAircraft {
    pub fn new (registration: impl ToString, lon: f64, lat: f64)->Self {
        SimAircraft { registration: registration.to_string(), position: GeoPoint::from_lon_lat_degrees( lon, lat) }
    }
}

/// what the simulator connection currently reports. This is supplied by the caller of each query
#[derive(Debug,Clone,Default)]
pub struct SimulatorSnapshot {
    pub user_aircraft: Option<SimAircraft>,
    pub ai_aircraft: Vec<SimAircraft>,
    pub connected: bool,
    pub debug: bool,
}

impl SimulatorSnapshot {
    /// the user aircraft is always included, AI aircraft only if we are connected (or in debug mode).
    /// Empty registrations are dropped
    pub fn registrations (&self)->RegistrationSnapshot {
        let mut map: HashMap<String,GeoPoint> = HashMap::new();

        if let Some(user) = &self.user_aircraft {
            map.insert( user.registration.clone(), user.position);
        }

        if self.connected || self.debug {
            for ac in &self.ai_aircraft {
                map.insert( ac.registration.clone(), ac.position);
            }
        }

        map.remove("");
        RegistrationSnapshot(map)
    }
}

/// registration -> position of simulator aircraft at the time of a query
#[derive(Debug,Clone,Default,PartialEq)]
pub struct RegistrationSnapshot( HashMap<String,GeoPoint>);

impl RegistrationSnapshot {
    pub fn get (&self, registration: &str)->Option<&GeoPoint> { self.0.get(registration) }

    pub fn len (&self)->usize { self.0.len() }
    pub fn is_empty (&self)->bool { self.0.is_empty() }
    pub fn clear (&mut self) { self.0.clear() }

    /// positions don't matter, only the set of registrations
    pub fn same_keys (&self, other: &RegistrationSnapshot)->bool {
        self.0.len() == other.0.len() && self.0.keys().all( |k| other.0.contains_key(k))
    }
}

/* #endregion simulator input */

/* #region rect cache *********************************************************************************/

/// map detail level of a query. Results for different levels are not interchangeable
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum DetailLevel {
    Low,
    Normal,
    High
}

/// list of records that is valid for the rectangle (and detail level) it was retrieved for
#[derive(Debug,Default)]
pub struct AircraftCache {
    pub list: Vec<AircraftRecord>,
    rect: Option<GeoRect>,
    detail: Option<DetailLevel>,
}

impl AircraftCache {
    /// clear the list if there is no previous rect, if the inflated previous rect does not contain `rect`
    /// or if the detail level changed. Lazy updates never clear.
    /// Returns true if the cache was cleared
    pub fn update (&mut self, rect: &GeoRect, detail: DetailLevel, factor: f64, increment: f64, lazy: bool)->bool {
        if lazy { return false }

        let is_covered = match &self.rect {
            Some(cur) => cur.inflated( factor, increment).contains_rect( rect),
            None => false
        };

        if !is_covered || self.detail != Some(detail) {
            self.list.clear();
            self.rect = Some(*rect);
            self.detail = Some(detail);
            true
        } else {
            false
        }
    }

    /// truncate to `max_rows`. If we hit the limit the list is incomplete and the next update has to re-query
    pub fn validate (&mut self, max_rows: usize) {
        if self.list.len() >= max_rows {
            self.list.truncate( max_rows);
            self.rect = None;
        }
    }

    pub fn clear (&mut self) {
        self.list.clear();
        self.rect = None;
        self.detail = None;
    }

    pub fn rect (&self)->Option<&GeoRect> { self.rect.as_ref() }
}

/* #endregion rect cache */

/// the aircraft query cache of the map view: an AircraftCache plus the registrations of simulator
/// aircraft the cached list was de-duplicated against
#[derive(Debug)]
pub struct OnlineAircraftCache {
    config: CacheConfig,
    cache: AircraftCache,
    registrations: RegistrationSnapshot,
}

impl OnlineAircraftCache {
    pub fn new (config: CacheConfig)->Self {
        OnlineAircraftCache { config, cache: AircraftCache::default(), registrations: RegistrationSnapshot::default() }
    }

    pub fn get_aircraft<S: OnlineStore> (&mut self, store: &S, rect: &GeoRect, detail: DetailLevel, lazy: bool,
                                         simulator: &SimulatorSnapshot)->&[AircraftRecord] {
        let factor = self.config.inflation_factor;
        let increment = self.config.inflation_increment;
        let max_rows = self.config.max_rows;

        let cur_registrations = simulator.registrations();
        if !self.registrations.same_keys( &cur_registrations) {
            self.cache.clear(); // online aircraft might now collide with simulator aircraft
        }

        self.cache.update( rect, detail, factor, increment, lazy);

        if self.cache.list.is_empty() && !lazy {
            for r in rect.split_inflated( factor, increment) {
                for ac in store.query_aircraft_by_rect( &r, max_rows) {
                    if !self.is_duplicate( &ac, &cur_registrations) {
                        self.cache.list.push( ac);
                    }
                }
            }
            trace!("queried {} aircraft for {}", self.cache.list.len(), rect);
            self.registrations = cur_registrations;
        }

        self.cache.validate( max_rows);
        &self.cache.list
    }

    fn is_duplicate (&self, ac: &AircraftRecord, registrations: &RegistrationSnapshot)->bool {
        match registrations.get( ac.registration()) {
            Some(pos) => ac.position.haversine_distance( pos).get::<nautical_mile>() <= self.config.duplicate_distance_nm,
            None => false
        }
    }

    /// clear the cached list and the registrations it was built for
    pub fn clear (&mut self) {
        self.cache.clear();
        self.registrations.clear();
    }

    pub fn clear_registrations (&mut self) {
        self.registrations.clear();
    }

    pub fn aircraft (&self)->&[AircraftRecord] { &self.cache.list }

    pub fn registrations (&self)->&RegistrationSnapshot { &self.registrations }

    pub fn config (&self)->&CacheConfig { &self.config }
}
