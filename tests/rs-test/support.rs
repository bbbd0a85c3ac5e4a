#![allow(dead_code)]
//! Hand-assembled synthetic XDB buffers for the integration tests below.
//!
//! The teacher crate's integration tests depend on a licensed, externally
//! provided `.czdb` fixture file gated behind a `CZDB_SECRET` environment
//! variable. The XDB format this crate reads has no such fixture, so
//! these tests build minimal but format-correct files by hand instead.

use std::collections::BTreeMap;

use xdb::IpVersion;

pub const HEADER_SIZE: usize = 256;
pub const VECTOR_INDEX_SIZE: usize = 256 * 256 * 8;

/// One `[low, high] -> payload` range to bake into a synthetic file.
/// `low` and `high` must share the same first two bytes (one vector-index
/// cell) to keep the builder simple.
pub struct Region {
    pub low: Vec<u8>,
    pub high: Vec<u8>,
    pub payload: Vec<u8>,
}

fn key_bytes(version: IpVersion) -> usize {
    match version {
        IpVersion::V4 => 4,
        IpVersion::V6 => 16,
    }
}

/// Write `key` into `buf` at `off`, in the version's on-disk endpoint
/// order: natural for v6, reversed for v4 (`spec.md` §4.6).
fn write_field(buf: &mut [u8], off: usize, key: &[u8], version: IpVersion) {
    match version {
        IpVersion::V6 => buf[off..off + key.len()].copy_from_slice(key),
        IpVersion::V4 => {
            for (i, &b) in key.iter().enumerate() {
                buf[off + (key.len() - 1 - i)] = b;
            }
        }
    }
}

/// Assemble a structurally valid XDB file containing exactly `regions`,
/// grouped into vector-index cells by their first two key bytes. Cells
/// with no region map to an empty `[ptr, ptr)` range (property 4 in
/// `spec.md` §8). A sentinel record with an all-0xFF key follows the
/// real records so that the binary search's one-past-the-end probe
/// (`spec.md` §4.6 / DESIGN.md open question 4) always lands on
/// something well-formed.
pub fn build_xdb(version: IpVersion, regions: &[Region]) -> Vec<u8> {
    let n = key_bytes(version);
    let record_size = 2 * n + 2 + 4;

    let mut groups: BTreeMap<(u8, u8), Vec<&Region>> = BTreeMap::new();
    for r in regions {
        assert_eq!(r.low.len(), n);
        assert_eq!(r.high.len(), n);
        groups.entry((r.low[0], r.low[1])).or_default().push(r);
    }
    for recs in groups.values_mut() {
        recs.sort_by(|a, b| a.low.cmp(&b.low));
    }

    let start_index_ptr = (HEADER_SIZE + VECTOR_INDEX_SIZE) as u32;

    let mut cell_ranges: BTreeMap<(u8, u8), (u32, u32)> = BTreeMap::new();
    let mut cursor = start_index_ptr;
    for (&key, recs) in &groups {
        let s = cursor;
        cursor += (recs.len() * record_size) as u32;
        cell_ranges.insert(key, (s, cursor));
    }
    let sentinel_ptr = cursor;
    cursor += record_size as u32;
    let end_index_ptr = cursor;

    let mut payload_cursor = end_index_ptr;
    let mut payload_offsets: Vec<u32> = Vec::new();
    for recs in groups.values() {
        for r in recs {
            payload_offsets.push(payload_cursor);
            payload_cursor += r.payload.len() as u32;
        }
    }

    let mut buf = vec![0u8; payload_cursor as usize];

    let structure_version: u16 = 3;
    let ip_version_raw: u16 = match version {
        IpVersion::V4 => 4,
        IpVersion::V6 => 6,
    };
    buf[0..2].copy_from_slice(&structure_version.to_le_bytes());
    buf[2..4].copy_from_slice(&0u16.to_le_bytes());
    buf[4..8].copy_from_slice(&0u32.to_le_bytes());
    buf[8..12].copy_from_slice(&start_index_ptr.to_le_bytes());
    buf[12..16].copy_from_slice(&end_index_ptr.to_le_bytes());
    buf[16..18].copy_from_slice(&ip_version_raw.to_le_bytes());
    buf[18..20].copy_from_slice(&4u16.to_le_bytes());

    for i in 0..256u32 {
        for j in 0..256u32 {
            let off = (HEADER_SIZE as u32 + i * 256 * 8 + j * 8) as usize;
            buf[off..off + 4].copy_from_slice(&end_index_ptr.to_le_bytes());
            buf[off + 4..off + 8].copy_from_slice(&end_index_ptr.to_le_bytes());
        }
    }
    for (&(i, j), &(s, e)) in &cell_ranges {
        let off = (HEADER_SIZE as u32 + (i as u32) * 256 * 8 + (j as u32) * 8) as usize;
        buf[off..off + 4].copy_from_slice(&s.to_le_bytes());
        buf[off + 4..off + 8].copy_from_slice(&e.to_le_bytes());
    }

    let mut idx = 0usize;
    for recs in groups.values() {
        let (mut cursor, _) = cell_ranges[&(recs[0].low[0], recs[0].low[1])];
        for r in recs {
            let off = cursor as usize;
            write_field(&mut buf, off, &r.low, version);
            write_field(&mut buf, off + n, &r.high, version);
            let data_len = r.payload.len() as u16;
            buf[off + 2 * n..off + 2 * n + 2].copy_from_slice(&data_len.to_le_bytes());
            buf[off + 2 * n + 2..off + 2 * n + 6]
                .copy_from_slice(&payload_offsets[idx].to_le_bytes());
            idx += 1;
            cursor += record_size as u32;
        }
    }

    let soff = sentinel_ptr as usize;
    let sentinel_key = vec![0xFFu8; n];
    write_field(&mut buf, soff, &sentinel_key, version);
    write_field(&mut buf, soff + n, &sentinel_key, version);

    let mut idx2 = 0usize;
    for recs in groups.values() {
        for r in recs {
            let off = payload_offsets[idx2] as usize;
            buf[off..off + r.payload.len()].copy_from_slice(&r.payload);
            idx2 += 1;
        }
    }

    buf
}
