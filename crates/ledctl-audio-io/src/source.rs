//! PCM socket ingest (§4.6): blocking reads of fixed-size chunks from the
//! configured source, with 1.5 s reconnect backoff on failure.

use std::io::Read;
use std::net::{TcpStream, UdpSocket};
use std::time::Duration;

use ledctl_config::PcmSourceConfig;

use crate::error::{AudioIoError, AudioIoResult};

/// Socket read chunk size in samples (§4.6): 2048 `i16` samples per read.
pub const CHUNK_SAMPLES: usize = 2048;

/// The reconnect backoff after any transient socket failure (§4.6, §7).
pub const RECONNECT_BACKOFF: Duration = Duration::from_millis(1500);

enum Socket {
    Tcp(TcpStream),
    Udp(UdpSocket),
}

/// A connected PCM source. Reconnection is the caller's responsibility —
/// [`PcmSocketSource::connect`] is called again after the backoff on failure.
pub struct PcmSocketSource {
    socket: Socket,
    byte_buf: Vec<u8>,
}

impl PcmSocketSource {
    /// Connects to `config.host:config.port`, preferring UDP when
    /// `config.prefer_udp` is set.
    pub fn connect(config: &PcmSourceConfig) -> AudioIoResult<Self> {
        let addr = (config.host.as_str(), config.port);
        let socket = if config.prefer_udp {
            let udp = UdpSocket::bind("0.0.0.0:0").map_err(|source| AudioIoError::Connect {
                host: config.host.clone(),
                port: config.port,
                source,
            })?;
            udp.connect(addr).map_err(|source| AudioIoError::Connect {
                host: config.host.clone(),
                port: config.port,
                source,
            })?;
            Socket::Udp(udp)
        } else {
            let tcp = TcpStream::connect(addr).map_err(|source| AudioIoError::Connect {
                host: config.host.clone(),
                port: config.port,
                source,
            })?;
            tcp.set_nodelay(true).ok();
            Socket::Tcp(tcp)
        };

        Ok(Self { socket, byte_buf: vec![0u8; CHUNK_SAMPLES * 2] })
    }

    /// Blocks for one chunk of [`CHUNK_SAMPLES`] `i16` samples (interleaved if
    /// stereo), converting from little-endian wire bytes.
    pub fn read_chunk(&mut self) -> AudioIoResult<Vec<i16>> {
        let n = match &mut self.socket {
            Socket::Tcp(stream) => {
                stream.read_exact(&mut self.byte_buf).map_err(AudioIoError::Read)?;
                self.byte_buf.len()
            }
            Socket::Udp(udp) => {
                let n = udp.recv(&mut self.byte_buf).map_err(AudioIoError::Read)?;
                if n == 0 {
                    return Err(AudioIoError::Closed);
                }
                n
            }
        };

        Ok(self.byte_buf[..n]
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;

    #[test]
    fn reads_a_chunk_of_interleaved_samples_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let samples = vec![1000i16; CHUNK_SAMPLES];
            let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
            stream.write_all(&bytes).unwrap();
        });

        let config = PcmSourceConfig {
            enabled: true,
            host: addr.ip().to_string(),
            port: addr.port(),
            latency_ms: 100,
            prefer_udp: false,
        };
        let mut source = PcmSocketSource::connect(&config).unwrap();
        let chunk = source.read_chunk().unwrap();
        assert_eq!(chunk.len(), CHUNK_SAMPLES);
        assert!(chunk.iter().all(|&s| s == 1000));

        server.join().unwrap();
    }

    #[test]
    fn connect_failure_surfaces_as_typed_error() {
        let config = PcmSourceConfig {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 1,
            latency_ms: 100,
            prefer_udp: false,
        };
        assert!(PcmSocketSource::connect(&config).is_err());
    }
}
