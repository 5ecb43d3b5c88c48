//! Stream kind transitions.
//!
//! Changing a stream's kind canonicalizes the record once, at the moment of
//! the change. Later edits can still break these shapes; validation re-checks
//! them.

use crate::schema::{ScalarMode, Stream, StreamKind};

/// Return `stream` moved to `kind`, with fields forced into that kind's shape.
///
/// - `IsothermalFixed`: `Tin`/`Tout` fixed, `Tout` mirrors `Tin`.
/// - `IsothermalVariable`: `Tin`/`Tout` range, `Tout` mirrors `Tin`.
/// - `MVR`: `F` fixed, `Pin` range.
/// - `Common`, `MHP`, `RankineCycle`: no structural change.
pub fn canonicalize(mut stream: Stream, kind: StreamKind) -> Stream {
    stream.kind = kind;
    match kind {
        StreamKind::IsothermalFixed => force_isothermal(&mut stream, ScalarMode::Fixed),
        StreamKind::IsothermalVariable => force_isothermal(&mut stream, ScalarMode::Range),
        StreamKind::Mvr => {
            stream.f.set_mode(ScalarMode::Fixed);
            stream.p_in.set_mode(ScalarMode::Range);
        }
        StreamKind::Common | StreamKind::Mhp | StreamKind::RankineCycle => {}
    }
    stream
}

fn force_isothermal(stream: &mut Stream, mode: ScalarMode) {
    stream.t_in.set_mode(mode);
    stream.t_out.set_mode(mode);
    let t_in = stream.t_in.clone();
    stream.t_out.mirror_from(&t_in);
}

impl Stream {
    pub fn set_kind(&mut self, kind: StreamKind) {
        *self = canonicalize(self.clone(), kind);
    }
}
