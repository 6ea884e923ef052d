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
use uom::si::{f64::Length, length::nautical_mile};
use vnet_common::geo::GeoRect;

use crate::records::{AircraftRecord, AtcRecord, FacilityType, ServerRecord, StatusDocument, WhazzupDocument};

/// the record storage the download controller writes to and the aircraft cache queries from
pub trait OnlineStore: Send + 'static {
    fn write_status_feed (&mut self, status: &StatusDocument);

    /// replace all clients and ATC facilities. Servers are only replaced if the feed has a server section
    fn write_data_feed (&mut self, feed: &WhazzupDocument);

    fn write_server_feed (&mut self, servers: Vec<ServerRecord>);

    /// all aircraft within a (non anti-meridian crossing) rectangle, bounds inclusive
    fn query_aircraft_by_rect (&self, rect: &GeoRect, max_rows: usize)->Vec<AircraftRecord>;

    fn clear_all (&mut self);

    fn aircraft_by_id (&self, id: u64)->Option<AircraftRecord>;
    fn num_clients (&self)->usize;
    fn has_data (&self)->bool;

    fn atc (&self)->&[AtcRecord];
    fn servers (&self)->&[ServerRecord];
    fn status (&self)->Option<&StatusDocument>;

    /// display radius overrides in nautical miles, applied to subsequently written ATC records
    fn set_atc_radii (&mut self, radii: HashMap<FacilityType,f64>);
}

/// a simple in-memory OnlineStore
#[derive(Debug,Default)]
pub struct MemoryStore {
    status: Option<StatusDocument>,
    clients: Vec<AircraftRecord>,
    atcs: Vec<AtcRecord>,
    servers: Vec<ServerRecord>,
    atc_radii: HashMap<FacilityType,f64>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new ()->Self {
        MemoryStore { next_id: 1, ..Default::default() }
    }

    fn next_id (&mut self)->u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    fn display_radius (&self, atc: &AtcRecord)->Length {
        match self.atc_radii.get( &atc.facility) {
            Some(r) if *r > 0.0 => Length::new::<nautical_mile>( *r),
            _ => atc.visual_range
        }
    }

    pub fn clients (&self)->&[AircraftRecord] { &self.clients }
}

impl OnlineStore for MemoryStore {

    fn write_status_feed (&mut self, status: &StatusDocument) {
        self.status = Some( status.clone());
    }

    fn write_data_feed (&mut self, feed: &WhazzupDocument) {
        self.clients.clear();
        for c in &feed.clients {
            let mut rec = c.clone();
            rec.id = self.next_id();
            self.clients.push( rec);
        }

        self.atcs.clear();
        for a in &feed.atcs {
            let mut rec = a.clone();
            rec.id = self.next_id();
            rec.radius = self.display_radius( &rec);
            self.atcs.push( rec);
        }

        if feed.has_servers {
            self.servers = feed.servers.clone();
        }
    }

    fn write_server_feed (&mut self, servers: Vec<ServerRecord>) {
        self.servers = servers;
    }

    fn query_aircraft_by_rect (&self, rect: &GeoRect, max_rows: usize)->Vec<AircraftRecord> {
        self.clients.iter()
            .filter( |c| {
                let lon = c.position.longitude_degrees();
                let lat = c.position.latitude_degrees();
                lon >= rect.west && lon <= rect.east && lat >= rect.south && lat <= rect.north
            })
            .take( max_rows)
            .cloned()
            .collect()
    }

    fn clear_all (&mut self) {
        self.status = None;
        self.clients.clear();
        self.atcs.clear();
        self.servers.clear();
    }

    fn aircraft_by_id (&self, id: u64)->Option<AircraftRecord> {
        self.clients.iter().find( |c| c.id == id).cloned()
    }

    fn num_clients (&self)->usize { self.clients.len() }

    fn has_data (&self)->bool {
        !self.clients.is_empty() || !self.atcs.is_empty() || !self.servers.is_empty()
    }

    fn atc (&self)->&[AtcRecord] { &self.atcs }
    fn servers (&self)->&[ServerRecord] { &self.servers }
    fn status (&self)->Option<&StatusDocument> { self.status.as_ref() }

    fn set_atc_radii (&mut self, radii: HashMap<FacilityType,f64>) {
        self.atc_radii = radii;
    }
}
