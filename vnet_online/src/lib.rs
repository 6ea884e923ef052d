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

//! acquisition and caching of online network (VATSIM, IVAO and custom) traffic data.
//!
//! Data is retrieved in download cycles: an optional status document that tells us where to find the
//! (possibly gzipped) whazzup feed, the feed itself and a rate limited auxiliary server feed. The
//! [`controller::OnlineDataController`] is the synchronous state machine for these cycles, the
//! [`actor`] module drives it from a tokio task, performing the downloads through a [`transport::Transport`].
//! Map views query aircraft through a rectangle based cache that hides online aircraft which are also
//! known to the simulator.

pub mod errors;
pub mod config;
pub mod records;
pub mod codec;
pub mod parser;
pub mod store;
pub mod transport;
pub mod state;
pub mod cache;
pub mod controller;
pub mod actor;

pub use config::{OnlineConfig, NetworkConfig, CacheConfig, OnlineNetwork, FeedFormat, ReloadInterval, load_config_path};
pub use records::{AircraftRecord, AtcRecord, ServerRecord, FacilityType, StatusDocument, WhazzupDocument};
pub use parser::{FeedParser, WhazzupParser};
pub use store::{OnlineStore, MemoryStore};
pub use transport::{Transport, HttpTransport, DownloadRequest, TransportEvent, TransportReporter};
pub use state::{DownloadState, CycleTimestamps};
pub use cache::{DetailLevel, SimAircraft, SimulatorSnapshot, RegistrationSnapshot};
pub use controller::{OnlineDataController, Effect, Notification, reload_interval};
pub use actor::{OnlineHandle, OnlineStatus, spawn_online_actor};
