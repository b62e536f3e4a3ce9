//! The fixed-rate output scheduler (§4.9, §5): one render+dispatch pass per
//! tick, with DDP session housekeeping and frame-cache garbage collection
//! running at their own slower cadences.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ledctl_audio_analysis::AudioMetricsStore;
use ledctl_config::{ConfigSnapshot, EffectBinding, Sink};
use ledctl_ddp::{DdpTransmitter, SessionManager};
use ledctl_effects::{EffectStateStore, EnvelopeStore};
use ledctl_local::LocalDriver;

use crate::bucket::bucket_key_for;
use crate::cache::{fingerprint, FrameCache};
use crate::dispatch::{dispatch_local, dispatch_local_at, dispatch_remote};

/// Session housekeeping (activation edges, stale-session cleanup) runs about
/// every 5 seconds of ticks at the configured FPS.
const SESSION_HOUSEKEEPING_TICKS: u64 = 5;
/// The frame cache is garbage-collected (cleared) every this many ticks, on
/// top of clearing itself once it hits [`crate::cache`]'s entry bound.
const CACHE_GC_TICKS: u64 = 10;

fn remote_base_url(address: &str) -> String {
    format!("http://{address}")
}

/// Owns every piece of long-lived scheduler state: the local driver's
/// channel table, the DDP transmitter and its session manager, per-effect
/// render state, per-binding audio envelopes, and the frame cache. A single
/// instance is shared by the renderer task for the process lifetime.
pub struct Scheduler {
    local: LocalDriver,
    ddp: DdpTransmitter,
    sessions: SessionManager,
    states: EffectStateStore,
    envelopes: EnvelopeStore,
    cache: FrameCache,
    ddp_sequence: HashMap<String, u8>,
    frame_index: u64,
    tick_count: u64,
    started_at: Instant,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            local: LocalDriver::new(),
            ddp: DdpTransmitter::new(),
            sessions: SessionManager::new(),
            states: EffectStateStore::new(),
            envelopes: EnvelopeStore::new(),
            cache: FrameCache::new(),
            ddp_sequence: HashMap::new(),
            frame_index: 0,
            tick_count: 0,
            started_at: Instant::now(),
        }
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    fn next_sequence(&mut self, sink_id: &str) -> u8 {
        let seq = self.ddp_sequence.entry(sink_id.to_string()).or_insert(0);
        let current = *seq;
        *seq = seq.wrapping_add(1);
        current
    }

    /// Renders and dispatches one frame for every enabled binding, then
    /// advances housekeeping counters. `config` is a read-only snapshot for
    /// this tick; `audio` is the live analyzer metrics store.
    pub fn tick(&mut self, config: &ConfigSnapshot, audio: &AudioMetricsStore) {
        let fps = config.hardware.effective_fps();
        let time_s = self.started_at.elapsed().as_secs_f32();
        let global_brightness = config.hardware.global_brightness;

        self.wait_for_audio_sync(config, audio);

        for (segment_index, binding) in config.enabled_bindings().enumerate() {
            let Some(sink) = config.sink(&binding.sink_id) else {
                tracing::debug!(sink_id = %binding.sink_id, "binding references unknown sink, skipping");
                continue;
            };
            if !sink.enabled() {
                continue;
            }
            self.render_and_dispatch(config, sink, binding, segment_index, audio, fps, time_s, global_brightness);
        }

        self.run_session_housekeeping(config);

        self.tick_count += 1;
        if self.tick_count % CACHE_GC_TICKS == 0 {
            self.cache.clear();
        }
        self.frame_index = self.frame_index.wrapping_add(1);
    }

    #[allow(clippy::too_many_arguments)]
    fn render_and_dispatch(
        &mut self,
        config: &ConfigSnapshot,
        sink: &Sink,
        binding: &EffectBinding,
        segment_index: usize,
        audio: &AudioMetricsStore,
        fps: u16,
        time_s: f32,
        global_brightness: u8,
    ) {
        match sink {
            Sink::Local(local_sink) => {
                let frame = self.render_binding(binding, segment_index, local_sink.length, audio, fps, time_s, global_brightness);
                if let Err(err) = dispatch_local(&self.local, local_sink, &frame) {
                    tracing::warn!(sink = %local_sink.id, error = %err, "local dispatch failed");
                }
            }
            Sink::Remote(remote_sink) => {
                let frame = self.render_binding(binding, segment_index, remote_sink.led_count, audio, fps, time_s, global_brightness);
                let sequence = self.next_sequence(&remote_sink.id);
                if let Err(err) = dispatch_remote(&self.ddp, remote_sink, &frame, sequence) {
                    tracing::warn!(sink = %remote_sink.id, error = %err, "remote dispatch failed");
                }
            }
            Sink::Virtual(composite) => {
                let total = composite.total_length();
                let frame = self.render_binding(binding, segment_index, total, audio, fps, time_s, global_brightness);
                let mut offset = 0usize;
                for member in &composite.members {
                    let len = member.length as usize;
                    let slice_start = offset * 3;
                    let slice = &frame[slice_start..slice_start + len * 3];
                    self.dispatch_virtual_member(config, member, slice);
                    offset += len;
                }
            }
        }
    }

    fn dispatch_virtual_member(&mut self, config: &ConfigSnapshot, member: &ledctl_config::VirtualSegmentMember, slice: &[u8]) {
        let Some(member_sink) = config.sink(&member.sink_id) else {
            tracing::debug!(sink_id = %member.sink_id, "virtual composite member references unknown sink");
            return;
        };
        match member_sink {
            Sink::Local(local_sink) => {
                if let Err(err) = dispatch_local_at(&self.local, local_sink, slice, member.start_offset, member.length) {
                    tracing::warn!(sink = %local_sink.id, error = %err, "virtual member local dispatch failed");
                }
            }
            Sink::Remote(remote_sink) => {
                let sequence = self.next_sequence(&remote_sink.id);
                if let Err(err) = dispatch_remote(&self.ddp, remote_sink, slice, sequence) {
                    tracing::warn!(sink = %remote_sink.id, error = %err, "virtual member remote dispatch failed");
                }
            }
            Sink::Virtual(_) => {
                tracing::debug!(sink_id = %member.sink_id, "nested virtual composites are not supported, skipping");
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_binding(
        &mut self,
        binding: &EffectBinding,
        segment_index: usize,
        led_count: u32,
        audio: &AudioMetricsStore,
        fps: u16,
        time_s: f32,
        global_brightness: u8,
    ) -> Vec<u8> {
        let key = bucket_key_for(binding, led_count);
        let print = fingerprint(&binding.assignment);

        if key.is_cacheable() {
            if let Some(cached) = self.cache.get(&key.effect_name, key.led_count, self.frame_index, print) {
                return cached.to_vec();
            }
        }

        let frame = ledctl_effects::render(
            &self.states,
            &self.envelopes,
            audio,
            binding,
            led_count as usize,
            self.frame_index,
            binding.fps_override.unwrap_or(fps),
            time_s,
            segment_index,
            global_brightness,
        );

        if key.is_cacheable() {
            self.cache.insert(&key.effect_name, key.led_count, self.frame_index, print, frame.clone());
        }

        frame
    }

    /// The §4.9 audio-sync wait: when an enabled LEDFx binding has
    /// `audio_link` set and the analyzer's latest frame carries a future
    /// render timestamp, sleep until shortly before that frame is due so the
    /// render stays close to the sound that produced it. Bounded to 50ms so a
    /// stale or bogus timestamp can't stall the scheduler.
    fn wait_for_audio_sync(&self, config: &ConfigSnapshot, audio: &AudioMetricsStore) {
        let has_audio_linked_ledfx = config.enabled_bindings().any(|binding| {
            binding.assignment.audio_link
                && ledctl_effects::select_engine(&binding.assignment.effect, binding.assignment.audio_link) == ledctl_effects::Engine::Ledfx
        });
        if !has_audio_linked_ledfx {
            return;
        }

        let metrics = audio.get_metrics();
        if metrics.timestamp_us == 0 {
            return;
        }

        let now_us = self.started_at.elapsed().as_micros() as u64;
        let Some(target_us) = metrics.timestamp_us.checked_sub(5_000) else {
            return;
        };
        if target_us <= now_us {
            return;
        }

        let wait = Duration::from_micros(target_us - now_us).min(Duration::from_millis(50));
        thread::sleep(wait);
    }

    /// Activates remote sinks newly referenced by an enabled, `direct_stream`
    /// binding, and deactivates ones no longer referenced by any (§4.10).
    /// Runs every [`SESSION_HOUSEKEEPING_TICKS`] ticks.
    fn run_session_housekeeping(&mut self, config: &ConfigSnapshot) {
        if self.tick_count % SESSION_HOUSEKEEPING_TICKS != 0 {
            return;
        }

        let mut wanted = std::collections::HashSet::new();
        for binding in config.enabled_bindings() {
            if !binding.direct_stream {
                continue;
            }
            if let Some(Sink::Remote(remote)) = config.sink(&binding.sink_id) {
                wanted.insert(remote.id.clone());
                if self.sessions.needs_activation(&remote.id) {
                    let base_url = remote_base_url(&remote.address);
                    if let Err(err) = self.sessions.activate(&remote.id, &base_url) {
                        tracing::warn!(sink = %remote.id, error = %err, "ddp session activation failed");
                    }
                }
            }
        }

        for active in self.sessions.active_sinks() {
            if !wanted.contains(&active) {
                if let Some(Sink::Remote(remote)) = config.sink(&active) {
                    let base_url = remote_base_url(&remote.address);
                    self.sessions.deactivate(&active, &base_url);
                } else {
                    self.sessions.deactivate(&active, &remote_base_url(&active));
                }
            }
        }
    }

    /// Restores every active DDP session, e.g. on shutdown (§5).
    pub fn shutdown(&self, config: &ConfigSnapshot) {
        self.sessions.deactivate_all(|sink_id| {
            config
                .sink(sink_id)
                .and_then(|s| if let Sink::Remote(r) = s { Some(remote_base_url(&r.address)) } else { None })
                .unwrap_or_else(|| remote_base_url(sink_id))
        });
    }
}

/// Runs the scheduler loop until `should_stop` returns `true`, sleeping the
/// remainder of each tick's frame budget. `config` is re-read from `config_source`
/// every tick so configuration changes take effect on the next frame.
pub fn run(
    scheduler: &mut Scheduler,
    config_source: impl Fn() -> Arc<ConfigSnapshot>,
    audio: &AudioMetricsStore,
    should_stop: &AtomicBool,
) {
    while !should_stop.load(Ordering::Relaxed) {
        let tick_start = Instant::now();
        let config = config_source();
        scheduler.tick(&config, audio);

        let fps = config.hardware.effective_fps().max(1);
        let budget = Duration::from_secs_f64(1.0 / f64::from(fps));
        let elapsed = tick_start.elapsed();
        if elapsed < budget {
            thread::sleep(budget - elapsed);
        }
    }

    let config = config_source();
    scheduler.shutdown(&config);
}
