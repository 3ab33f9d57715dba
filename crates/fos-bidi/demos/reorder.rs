//! Example: resolve and reorder mixed-direction text
//!
//! Pass text as arguments, `--hex` followed by codepoints in hex, or run
//! without arguments for a few samples.
//! Set `RUST_LOG=fos_bidi=debug` to see the resolver's log output.

use anyhow::Context;
use fos_bidi::{mirror_char, BidiConfig, BidiParagraph};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = BidiConfig::new().auto_detect(true);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--hex") {
        return run_codepoints(&args[1..]);
    }

    let samples = if args.is_empty() {
        vec![
            "he said \u{201C}\u{05E7}\u{05E8}\u{05D0} [\u{05D6}\u{05D4}]\u{201D} twice".to_string(),
            "\u{05D0}\u{05D1}\u{05D2} 123 (abc)".to_string(),
            "car \u{2067}\u{05DE}\u{05DB}\u{05D5}\u{05E0}\u{05D9}\u{05EA}\u{2069} 2024".to_string(),
        ]
    } else {
        vec![args.join(" ")]
    };

    for sample in &samples {
        let paragraph = BidiParagraph::new(sample, &config);
        let text = paragraph.text();
        let levels = paragraph.levels();

        let visual: String = paragraph
            .reorder_line(0..paragraph.len(), true)
            .into_iter()
            .map(|i| match levels[i] {
                Some(level) if level.is_rtl() => mirror_char(text[i]),
                _ => text[i],
            })
            .collect();

        let levels: Vec<String> = levels
            .iter()
            .map(|level| level.map_or_else(|| "x".to_string(), |l| l.to_string()))
            .collect();

        println!("logical:  {}", sample);
        println!("level:    {} (paragraph)", paragraph.paragraph_level());
        println!("levels:   {}", levels.join(" "));
        println!("visual:   {}", visual);
        println!();
    }

    Ok(())
}

/// Resolve raw codepoints through the slice API.
fn run_codepoints(args: &[String]) -> anyhow::Result<()> {
    let codepoints = args
        .iter()
        .map(|arg| u32::from_str_radix(arg, 16).with_context(|| format!("not a hex codepoint: {arg}")))
        .collect::<anyhow::Result<Vec<u32>>>()?;

    let normalized = fos_bidi::nfc(&codepoints)?;
    let levels = fos_bidi::resolve(&codepoints, 0, true)?;
    let mirrored = fos_bidi::mirror(&normalized, &levels)?;
    let visual = fos_bidi::reorder(&mirrored, &levels, true)?;

    let hex: Vec<String> = visual.iter().map(|cp| format!("{cp:04X}")).collect();
    println!("order:    {:?}", fos_bidi::reorder_permutation(&levels, true));
    println!("visual:   {}", hex.join(" "));

    Ok(())
}
