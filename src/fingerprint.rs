use crate::{
    eval::FrameState,
    scale::Severity,
    timeline::PhaseKind,
};

/// 128-bit stable digest of a frame state. Two frames with equal states
/// produce equal fingerprints on every platform; used for determinism
/// snapshots and duplicate-frame detection (hold phases repeat states).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

pub fn fingerprint_frame(state: &FrameState) -> FrameFingerprint {
    let mut a = Fnv1a64::new(0xcbf29ce484222325);
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);

    write_u64_pair(&mut a, &mut b, state.frame.0);
    write_u8_pair(&mut a, &mut b, phase_tag(state.phase));
    write_u64_pair(&mut a, &mut b, state.phase_progress.to_bits());
    write_u64_pair(&mut a, &mut b, state.camera.elevation_deg.to_bits());
    write_u64_pair(&mut a, &mut b, state.camera.azimuth_deg.to_bits());

    write_u64_pair(&mut a, &mut b, state.rings.len() as u64);
    for ring in &state.rings {
        write_u64_pair(&mut a, &mut b, ring.index as u64);
        write_str_pair(&mut a, &mut b, &ring.label);
        write_u64_pair(&mut a, &mut b, ring.value.to_bits());
        write_u8_pair(&mut a, &mut b, severity_tag(ring.severity));
        write_u64_pair(&mut a, &mut b, ring.radius.to_bits());
        write_u64_pair(&mut a, &mut b, ring.sweep.to_bits());
        write_u64_pair(&mut a, &mut b, ring.height.to_bits());
        write_u64_pair(&mut a, &mut b, ring.alpha.to_bits());
        write_u64_pair(&mut a, &mut b, ring.width.to_bits());
        write_u8_pair(&mut a, &mut b, u8::from(ring.focus));
    }

    match &state.readout {
        Some(r) => {
            write_u8_pair(&mut a, &mut b, 1);
            write_str_pair(&mut a, &mut b, &r.value_text);
            write_u64_pair(&mut a, &mut b, r.value_alpha.to_bits());
            write_str_pair(&mut a, &mut b, &r.label_text);
            write_u64_pair(&mut a, &mut b, r.label_alpha.to_bits());
            write_u8_pair(&mut a, &mut b, severity_tag(r.severity));
        }
        None => write_u8_pair(&mut a, &mut b, 0),
    }

    write_u64_pair(&mut a, &mut b, state.side_labels.len() as u64);
    for label in &state.side_labels {
        write_u64_pair(&mut a, &mut b, label.index as u64);
        write_str_pair(&mut a, &mut b, &label.text);
        write_u64_pair(&mut a, &mut b, label.height.to_bits());
        write_u64_pair(&mut a, &mut b, label.alpha.to_bits());
    }

    FrameFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

/// Chain per-frame fingerprints into one order-sensitive stream digest.
pub fn fingerprint_frames<'a>(states: impl IntoIterator<Item = &'a FrameState>) -> FrameFingerprint {
    let mut a = Fnv1a64::new(0xcbf29ce484222325);
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);
    for state in states {
        let fp = fingerprint_frame(state);
        write_u64_pair(&mut a, &mut b, fp.hi);
        write_u64_pair(&mut a, &mut b, fp.lo);
    }
    FrameFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn phase_tag(kind: PhaseKind) -> u8 {
    match kind {
        PhaseKind::Draw => 0,
        PhaseKind::Lift => 1,
        PhaseKind::Orbit => 2,
        PhaseKind::Hold => 3,
    }
}

fn severity_tag(severity: Severity) -> u8 {
    match severity {
        Severity::Low => 0,
        Severity::Moderate => 1,
        Severity::Warning => 2,
        Severity::Critical => 3,
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

#[derive(Clone, Copy)]
struct Fnv1a64(u64);

impl Fnv1a64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.0 = h;
    }

    fn finish(self) -> u64 {
        self.0
    }
}
