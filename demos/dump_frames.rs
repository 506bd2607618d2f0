use whorl::{Evaluator, FrameIndex, Storyboard};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/storyboard.json");
    let sb: Storyboard = serde_json::from_str(s)?;
    sb.validate()?;

    for f in [0u64, 39, 40, 1119, 1180, 1300, 1479] {
        let state = Evaluator::eval_frame(&sb, FrameIndex(f))?;
        println!(
            "frame {f}: {} ({} rings, {} labels)",
            state.phase.name(),
            state.rings.len(),
            state.side_labels.len(),
        );
    }

    Ok(())
}
