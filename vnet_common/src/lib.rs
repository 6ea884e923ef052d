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

//! common utilities shared by vnet crates: time helpers, geodetic points and rectangles,
//! HTTP retrieval and the logging macros all vnet code goes through

pub mod macros;
pub mod datetime;
pub mod geo_constants;
pub mod geo;
pub mod net;

// the logging macros expand to `$crate::tracing::..` so that clients don't need their own tracing dependency
#[doc(hidden)]
pub use tracing;

/// a global fn that can be used with serde(skip_serializing_if="vnet_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }
