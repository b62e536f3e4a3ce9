//! Fan-out of one rendered frame to its sink (§4.9 step 4). Gamma and color
//! order are applied by [`ledctl_local::LocalDriver`] itself, per channel, so
//! they are never part of the cached buffer (§4.1, §4.9).

use ledctl_core::Chipset;
use ledctl_config::{LocalSink, RemoteSink};
use ledctl_ddp::{DdpError, DdpTransmitter};
use ledctl_local::{DriverError, LocalDriver};

/// Initializes (idempotently) and writes one frame to a local strip's output
/// channel at its configured `start_index`/`length` window.
pub fn dispatch_local(local: &LocalDriver, sink: &LocalSink, frame: &[u8]) -> Result<(), DriverError> {
    dispatch_local_at(local, sink, frame, sink.start_index, sink.length)
}

/// Initializes (idempotently) and writes `length` pixels from `frame` at
/// `start_pixel` into a local strip's output channel. Used directly by
/// virtual composites, whose members address a sub-range of the underlying
/// sink rather than its own configured window.
pub fn dispatch_local_at(
    local: &LocalDriver,
    sink: &LocalSink,
    frame: &[u8],
    start_pixel: u32,
    length: u32,
) -> Result<(), DriverError> {
    let chipset = Chipset::parse_or_default(&sink.chipset);
    let channel_len = start_pixel + length;
    local.init(
        sink.pin,
        sink.channel,
        chipset,
        sink.color_order(),
        channel_len,
        sink.gamma_color,
        sink.gamma_brightness,
        sink.apply_gamma,
    )?;
    local.render(sink.pin, sink.channel, frame, start_pixel, length)
}

/// Sends one frame to a remote DDP node. `sequence` is the per-sink rolling
/// chunk-sequence counter the caller maintains across ticks.
pub fn dispatch_remote(ddp: &DdpTransmitter, sink: &RemoteSink, frame: &[u8], sequence: u8) -> Result<(), DdpError> {
    ddp.send_frame(&sink.address, sink.port, 0, frame, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::UdpSocket;
    use std::time::Duration;

    #[test]
    fn dispatch_local_initializes_and_renders_a_strip() {
        let local = LocalDriver::new();
        let sink = LocalSink {
            id: "s1".into(),
            name: "Strip".into(),
            start_index: 0,
            length: 4,
            render_order: 0,
            pin: 2,
            channel: 0,
            chipset: "WS2812B".into(),
            color_order: "GRB".into(),
            enabled: true,
            reverse: false,
            mirror: false,
            matrix: None,
            audio: ledctl_config::SinkAudioParams::default(),
            gamma_color: 2.2,
            gamma_brightness: 2.2,
            apply_gamma: true,
        };
        let frame = vec![10u8, 20, 30, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        dispatch_local(&local, &sink, &frame).unwrap();
        assert!(local.is_initialized(2, 0));
    }

    #[test]
    fn dispatch_remote_sends_a_ddp_frame() {
        let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        listener.set_read_timeout(Some(Duration::from_millis(500))).unwrap();

        let ddp = DdpTransmitter::new();
        let sink = RemoteSink {
            id: "r1".into(),
            name: "Porch".into(),
            address: "127.0.0.1".into(),
            port,
            led_count: 4,
            segment_count: 1,
            active: true,
            auto_discovered: false,
            matrix: None,
            last_seen_unix_ms: 0,
        };
        let frame = vec![0u8; 12];
        dispatch_remote(&ddp, &sink, &frame, 1).unwrap();

        let mut buf = [0u8; 64];
        let (n, _) = listener.recv_from(&mut buf).unwrap();
        assert_eq!(n, 14 + 12);
    }
}
