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

/// payload decoding for network feeds: gzip decompression and the legacy text encoding, which is
/// Windows-1252 with embedded UTF-8 (some clients report names in UTF-8)

use std::io::Read;
use flate2::read::GzDecoder;

use crate::errors::Result;

pub fn gz_decompress_vec (v_in: &[u8]) -> Result<Vec<u8>> {
    let mut v_out = Vec::with_capacity( v_in.len() * 5);
    let mut decoder = GzDecoder::new(v_in);
    decoder.read_to_end( &mut v_out)?;
    Ok( v_out )
}

// Windows-1252 code points for 0x80..0x9f. Unassigned bytes map to the respective C1 control
const CP1252_HIGH: [char; 32] = [
    '\u{20ac}', '\u{0081}', '\u{201a}', '\u{0192}', '\u{201e}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02c6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008d}', '\u{017d}', '\u{008f}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201c}', '\u{201d}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02dc}', '\u{2122}', '\u{0161}', '\u{203a}', '\u{0153}', '\u{009d}', '\u{017e}', '\u{0178}',
];

#[inline]
pub fn cp1252_char (b: u8)->char {
    if (0x80..0xa0).contains(&b) { CP1252_HIGH[(b - 0x80) as usize] } else { b as char }
}

/// decode feed text line by line. Lines that are valid UTF-8 are taken as such, all others are
/// decoded as Windows-1252
pub fn decode_text (data: &[u8])->String {
    let mut s = String::with_capacity( data.len());

    for (i,line) in data.split( |b| *b == b'\n').enumerate() {
        if i > 0 { s.push('\n') }

        match std::str::from_utf8(line) {
            Ok(utf8) => s.push_str(utf8),
            Err(_) => s.extend( line.iter().map( |b| cp1252_char(*b)))
        }
    }
    s
}
