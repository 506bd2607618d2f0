use rayon::prelude::*;

use crate::{
    eval::{Evaluator, FrameState},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{WhorlError, WhorlResult},
    model::Storyboard,
};

/// Threading configuration for batch evaluation. Sequential by default;
/// frames are independent, so parallel evaluation is purely an optimization
/// and the output order is the frame order either way.
#[derive(Clone, Debug, Default)]
pub struct EvalThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

/// The storyboard's full frame range, `[0, duration)`.
pub fn full_range(sb: &Storyboard) -> FrameRange {
    FrameRange {
        start: FrameIndex(0),
        end: sb.duration(),
    }
}

/// Evaluate a range of frames (inclusive start, exclusive end) in order.
#[tracing::instrument(skip(sb))]
pub fn eval_frames(
    sb: &Storyboard,
    range: FrameRange,
    threading: &EvalThreading,
) -> WhorlResult<Vec<FrameState>> {
    if range.is_empty() {
        return Err(WhorlError::validation("eval range must be non-empty"));
    }
    sb.validate()?;

    if !threading.parallel {
        let mut out = Vec::with_capacity(range.len_frames() as usize);
        for f in range.start.0..range.end.0 {
            out.push(Evaluator::eval_frame(sb, FrameIndex(f))?);
        }
        return Ok(out);
    }

    let pool = build_thread_pool(threading.threads)?;
    let frames: Vec<u64> = (range.start.0..range.end.0).collect();
    let results = pool.install(|| {
        frames
            .par_iter()
            .map(|&f| Evaluator::eval_frame(sb, FrameIndex(f)))
            .collect::<Vec<_>>()
    });

    let mut out = Vec::with_capacity(results.len());
    for item in results {
        out.push(item?);
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> WhorlResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WhorlError::validation(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WhorlError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foundation::core::Fps,
        series::{DataPoint, Series},
    };

    fn board() -> Storyboard {
        let series = Series::new(vec![
            DataPoint::new("d1", 5.0),
            DataPoint::new("d2", 10.0),
            DataPoint::new("d3", 20.0),
        ]);
        Storyboard::standard(Fps::new(30, 1).unwrap(), "t", "", series).unwrap()
    }

    #[test]
    fn empty_range_is_rejected() {
        let sb = board();
        let r = FrameRange::new(FrameIndex(5), FrameIndex(5)).unwrap();
        assert!(eval_frames(&sb, r, &EvalThreading::default()).is_err());
    }

    #[test]
    fn zero_threads_is_rejected() {
        let sb = board();
        let threading = EvalThreading {
            parallel: true,
            threads: Some(0),
        };
        assert!(eval_frames(&sb, full_range(&sb), &threading).is_err());
    }

    #[test]
    fn sequential_covers_the_range_in_order() {
        let sb = board();
        let r = FrameRange::new(FrameIndex(10), FrameIndex(20)).unwrap();
        let frames = eval_frames(&sb, r, &EvalThreading::default()).unwrap();
        assert_eq!(frames.len(), 10);
        for (i, s) in frames.iter().enumerate() {
            assert_eq!(s.frame, FrameIndex(10 + i as u64));
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let sb = board();
        let r = full_range(&sb);
        let seq = eval_frames(&sb, r, &EvalThreading::default()).unwrap();
        let par = eval_frames(
            &sb,
            r,
            &EvalThreading {
                parallel: true,
                threads: Some(2),
            },
        )
        .unwrap();
        assert_eq!(seq, par);
    }
}
