//! DDP header assembly and frame chunking (§4.5, §6.1).

/// Maximum payload bytes per datagram.
pub const MAX_CHUNK_BYTES: usize = 1440;

const VERSION_BITS: u8 = 0b0100_0000;
const PUSH_BIT: u8 = 0b0000_0001;

/// One assembled datagram: the 14-byte header followed by its payload slice.
#[derive(Debug, Clone)]
pub struct Chunk<'a> {
    pub flags: u8,
    pub sequence: u8,
    pub channel: u32,
    pub offset: u32,
    pub payload: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// Serializes the 14-byte header plus payload into a single datagram buffer.
    pub fn to_datagram(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(14 + self.payload.len());
        buf.push(self.flags);
        buf.push(self.sequence);
        buf.extend_from_slice(&0u16.to_be_bytes()); // data type: raw RGB/RGBW
        buf.extend_from_slice(&self.channel.to_be_bytes());
        buf.extend_from_slice(&self.offset.to_be_bytes());
        buf.extend_from_slice(&(self.payload.len() as u16).to_be_bytes());
        buf.extend_from_slice(self.payload);
        buf
    }

    pub fn is_push(&self) -> bool {
        self.flags & PUSH_BIT != 0
    }
}

/// Splits `frame` into push-terminated chunks of at most [`MAX_CHUNK_BYTES`]
/// bytes, cycling sequence numbers `1..=15` (0 is reserved) and stamping the
/// given `channel`.
pub fn chunk_frame(frame: &[u8], channel: u32, start_sequence: u8) -> Vec<Chunk<'_>> {
    if frame.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut seq = if start_sequence == 0 { 1 } else { start_sequence };
    let mut offset = 0usize;

    while offset < frame.len() {
        let end = (offset + MAX_CHUNK_BYTES).min(frame.len());
        let is_last = end == frame.len();
        let flags = VERSION_BITS | if is_last { PUSH_BIT } else { 0 };
        chunks.push(Chunk {
            flags,
            sequence: seq,
            channel,
            offset: offset as u32,
            payload: &frame[offset..end],
        });
        offset = end;
        seq = if seq >= 15 { 1 } else { seq + 1 };
    }

    chunks
}

/// A small rolling sequence counter, `1..=15` wrapping, shared across frames
/// so consecutive frames don't restart at 1 (purely cosmetic; the protocol
/// only requires contiguity within one frame's chunk group).
#[derive(Debug, Default)]
pub struct SequenceCounter(u8);

impl SequenceCounter {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn next(&mut self) -> u8 {
        self.0 = if self.0 >= 15 { 1 } else { self.0 + 1 };
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_chunk_sets_push_and_matches_scenario_s1() {
        let payload = vec![0u8; 720];
        let chunks = chunk_frame(&payload, 0, 1);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].flags, 0x41);
        assert_eq!(chunks[0].sequence, 1);
        assert_eq!(chunks[0].offset, 0);
        assert_eq!(chunks[0].payload.len(), 720);
    }

    #[test]
    fn two_chunks_match_scenario_s2() {
        let payload = vec![0u8; 2400];
        let chunks = chunk_frame(&payload, 0, 1);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].flags, 0x40);
        assert_eq!(chunks[0].sequence, 1);
        assert_eq!(chunks[0].offset, 0);
        assert_eq!(chunks[0].payload.len(), 1440);
        assert_eq!(chunks[1].flags, 0x41);
        assert_eq!(chunks[1].sequence, 2);
        assert_eq!(chunks[1].offset, 1440);
        assert_eq!(chunks[1].payload.len(), 960);
    }

    #[test]
    fn chunks_tile_the_payload_with_no_gaps_or_overlap() {
        let payload: Vec<u8> = (0..5000u32).map(|i| i as u8).collect();
        let chunks = chunk_frame(&payload, 0, 1);
        let mut covered = 0usize;
        for c in &chunks {
            assert_eq!(c.offset as usize, covered);
            covered += c.payload.len();
        }
        assert_eq!(covered, payload.len());
        assert!(chunks.last().unwrap().is_push());
        assert!(chunks[..chunks.len() - 1].iter().all(|c| !c.is_push()));
    }

    #[test]
    fn sequence_wraps_at_fifteen_never_emitting_zero() {
        let payload = vec![0u8; MAX_CHUNK_BYTES * 20];
        let chunks = chunk_frame(&payload, 0, 14);
        for c in &chunks {
            assert_ne!(c.sequence, 0);
        }
        assert_eq!(chunks[0].sequence, 14);
        assert_eq!(chunks[1].sequence, 15);
        assert_eq!(chunks[2].sequence, 1);
    }

    #[test]
    fn sequence_counter_cycles() {
        let mut counter = SequenceCounter::new();
        let values: Vec<u8> = (0..16).map(|_| counter.next()).collect();
        assert_eq!(values[0], 1);
        assert_eq!(values[14], 15);
        assert_eq!(values[15], 1);
    }
}
