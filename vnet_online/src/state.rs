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
use vnet_common::datetime::{ZERO, short_utc_datetime_string};

use crate::transport::DownloadRequest;

/// the stage of the download cycle. Each downloading stage owns its in-flight request
#[derive(Debug,Clone,PartialEq)]
pub enum DownloadState {
    None,
    DownloadingStatus { request: DownloadRequest },
    DownloadingWhazzup { request: DownloadRequest, gzipped: bool },
    DownloadingWhazzupServers { request: DownloadRequest },
}

impl DownloadState {
    pub fn request (&self)->Option<&DownloadRequest> {
        match self {
            DownloadState::None => None,
            DownloadState::DownloadingStatus{request} => Some(request),
            DownloadState::DownloadingWhazzup{request,..} => Some(request),
            DownloadState::DownloadingWhazzupServers{request} => Some(request),
        }
    }

    #[inline] pub fn is_none (&self)->bool { matches!( self, DownloadState::None) }

    /// is this the state of the in-flight request with the given id
    pub fn is_current (&self, id: u64)->bool {
        self.request().map( |r| r.id == id).unwrap_or(false)
    }

    pub fn name (&self)->&'static str {
        match self {
            DownloadState::None => "None",
            DownloadState::DownloadingStatus{..} => "DownloadingStatus",
            DownloadState::DownloadingWhazzup{..} => "DownloadingWhazzup",
            DownloadState::DownloadingWhazzupServers{..} => "DownloadingWhazzupServers",
        }
    }
}

impl fmt::Display for DownloadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.request() {
            Some(req) => write!( f, "{}({})", self.name(), req.url),
            None => write!( f, "{}", self.name())
        }
    }
}

/// completion times of the last cycle and of the last auxiliary server feed download.
/// Both are the Unix epoch if there was none yet
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct CycleTimestamps {
    pub last_update: DateTime<Utc>,
    pub last_server_download: DateTime<Utc>,
}

impl CycleTimestamps {
    pub fn reset (&mut self) {
        *self = CycleTimestamps::default()
    }
}

impl Default for CycleTimestamps {
    fn default()->Self {
        CycleTimestamps { last_update: ZERO, last_server_download: ZERO }
    }
}

impl fmt::Display for CycleTimestamps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "last update: {}, last server download: {}",
            short_utc_datetime_string( &self.last_update), short_utc_datetime_string( &self.last_server_download))
    }
}
