//! Plain-text and JSON rendering of laboratory results.

use std::fmt::Write;

use serde::Serialize;

use germain_core::{ChainSummary, ComparisonReport, Ranked, TransitionAnalysis};
use germain_types::{Chain, Family, GenerationParams, SafePrimeSet, SearchRange};

pub fn print_one<T: Serialize>(
    json: bool,
    data: &T,
    text: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        print!("{}", text(data));
    }
    Ok(())
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn motif(values: &[i64]) -> String {
    format!("({})", join(values))
}

fn ranked_motifs(ranked: &[Ranked<Vec<i64>>]) -> String {
    if ranked.is_empty() {
        return "none".to_string();
    }
    ranked
        .iter()
        .map(|entry| format!("{} x{}", motif(&entry.value), entry.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

pub fn chain(chain: &Chain, params: &GenerationParams, seed: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Grammar chain ({}): {} of {} primes in [{}, {}], seed {seed}",
        params.flags,
        chain.len(),
        params.target_count,
        params.range.start,
        params.range.end
    );
    write_chain_body(&mut out, chain);
    out
}

pub fn baseline(chain: &Chain, range: &SearchRange, count: usize, seed: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Random baseline: {} of {count} primes in [{}, {}], seed {seed}",
        chain.len(),
        range.start,
        range.end
    );
    write_chain_body(&mut out, chain);
    out
}

fn write_chain_body(out: &mut String, chain: &Chain) {
    if chain.is_empty() {
        let _ = writeln!(out, "  (empty)");
        return;
    }
    let _ = writeln!(out, "  primes: {}", join(chain.primes()));
    let _ = writeln!(out, "  gaps k: {}", join(chain.gaps()));
}

pub fn safe_primes(set: &SafePrimeSet, params: &GenerationParams, seed: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Safe primes ({}): {} of {} pairs in [{}, {}], seed {seed}",
        params.flags,
        set.len(),
        params.target_count,
        params.range.start,
        params.range.end
    );
    for pair in set.pairs() {
        let _ = writeln!(out, "  p = {:>10}  ->  q = 2p + 1 = {}", pair.source, pair.safe);
    }
    out
}

fn write_summary(out: &mut String, label: &str, summary: &ChainSummary) {
    let _ = writeln!(out, "  {label}:");
    let _ = writeln!(out, "    mean gap k  : {}", fixed(summary.mean_gap, 3));
    let _ = writeln!(out, "    top bigrams : {}", ranked_motifs(&summary.top_bigrams));
    let _ = writeln!(out, "    top trigrams: {}", ranked_motifs(&summary.top_trigrams));
}

pub fn report(report: &ComparisonReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Comparative analysis ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Grammar SG : {}", report.grammar.len);
    let _ = writeln!(out, "Random SG  : {}", report.baseline.len);
    let _ = writeln!(out, "Safe primes: {}", report.safe_primes);
    let _ = writeln!(out);
    write_summary(&mut out, "Grammar", &report.grammar);
    write_summary(&mut out, "Random", &report.baseline);
    let _ = writeln!(out);

    let diff = &report.differences;
    if diff.grammar_only.is_empty() {
        let _ = writeln!(out, "Every grammar SG yields a safe prime.");
    } else {
        let _ = writeln!(
            out,
            "Grammar SG without a safe prime ({}): {}",
            diff.grammar_only.len(),
            join(&diff.grammar_only)
        );
    }
    if diff.safe_only.is_empty() {
        let _ = writeln!(out, "Every safe-prime source belongs to the grammar chain.");
    } else {
        let _ = writeln!(
            out,
            "Safe-prime sources outside the grammar chain ({}): {}",
            diff.safe_only.len(),
            join(&diff.safe_only)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "=== Grammar chain transitions ===");
    out.push_str(&transitions(&report.transitions));
    out
}

pub fn lab(range: &SearchRange, primes: &[i64], analysis: &TransitionAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Sophie Germain primes in [{}, {}]: {}",
        range.start,
        range.end,
        primes.len()
    );
    if let (Some(first), Some(last)) = (primes.first(), primes.last()) {
        let _ = writeln!(out, "First: {first} | Last: {last}");
    }
    let _ = writeln!(out);
    out.push_str(&transitions(analysis));
    out
}

pub fn transitions(analysis: &TransitionAnalysis) -> String {
    let mut out = String::new();
    let totals = analysis.totals;
    let _ = writeln!(
        out,
        "Classification over {} transitions: G1 {} | G2 {} | G3 {}",
        totals.rows, totals.g1, totals.g2, totals.g3
    );

    let deltas = &analysis.deltas;
    if let (Some(min), Some(max), Some(mean)) = (deltas.min, deltas.max, deltas.mean) {
        let _ = writeln!(out, "Delta min {min} | max {max} | mean {mean:.2}");
        let top: Vec<String> = deltas
            .top_deltas
            .iter()
            .map(|entry| format!("{} x{}", entry.value, entry.count))
            .collect();
        let _ = writeln!(out, "Top deltas: {}", top.join(", "));
    }
    if !deltas.departure_families.is_empty() {
        let shares: Vec<String> = deltas
            .departure_families
            .iter()
            .map(|entry| {
                let share = entry.count as f64 / totals.rows as f64 * 100.0;
                format!("{} {} ({share:.1}%)", entry.value, entry.count)
            })
            .collect();
        let _ = writeln!(out, "Departure families: {}", shares.join(", "));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Transition matrix (rows: departure, columns: arrival)");
    let _ = write!(out, "      ");
    for family in Family::KNOWN {
        let _ = write!(out, "{family:>8}");
    }
    let _ = writeln!(out);
    for (family, row) in Family::KNOWN.iter().zip(analysis.matrix) {
        let _ = write!(out, "  {family:>4}");
        for count in row {
            let _ = write!(out, "{count:>8}");
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Cells (mean delta | top motifs)");
    for cell in analysis.cells.iter().filter(|cell| cell.samples > 0) {
        let _ = writeln!(
            out,
            "  {}->{}: n={} | mean {} | {}",
            cell.departure,
            cell.arrival,
            cell.samples,
            cell.mean_delta.map_or_else(|| "n/a".to_string(), |m| fixed(m, 1)),
            ranked_motifs(&cell.ranks)
        );
    }

    let check = analysis.auto_inter;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Auto vs inter: auto {:.2} | inter {:.2} | auto > inter: {}",
        check.auto_mean, check.inter_mean, check.auto_exceeds_inter
    );
    if let Some(clockwise) = analysis.clockwise_mean {
        let _ = writeln!(out, "Clockwise cycle mean delta: {clockwise:.1}");
    }

    let _ = writeln!(out, "Inverse symmetry:");
    for check in &analysis.symmetry {
        let (p, q) = check.forward;
        let status = match check.matches {
            Some(true) => "match",
            Some(false) => "differ",
            None => "no data",
        };
        let forward = check.forward_motif.as_deref().map_or_else(|| "-".to_string(), motif);
        let reverse = check.reverse_motif.as_deref().map_or_else(|| "-".to_string(), motif);
        let _ = writeln!(out, "  {p}<->{q}: {forward} vs {reverse} | {status}");
    }

    let _ = writeln!(out, "Top trigrams: {}", ranked_motifs(&analysis.top_trigrams));
    out
}
