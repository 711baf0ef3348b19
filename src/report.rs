use std::io::Write;

use anyhow::Result;

use crate::collector_core::{OrgReport, SinkDescriptor};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const TIB: f64 = GIB * 1024.0;

pub fn gib(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

pub fn tib(bytes: u64) -> f64 {
    bytes as f64 / TIB
}

/// `12345678.9` -> `"12,345,678.9000"` (decimals fixed by the report layout).
pub fn fmt_grouped(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Inclusion filter as displayed: "(All Logs)" when empty, clipped to 80
/// rendered chars (77 + "...") when longer.
pub fn inclusion_display(filter: &str) -> String {
    let f = if filter.is_empty() { "(All Logs)" } else { filter };
    if f.chars().count() > 80 {
        let head: String = f.chars().take(77).collect();
        format!("{head}...")
    } else {
        f.to_string()
    }
}

fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

pub fn write_project_header(out: &mut dyn Write, project_id: &str) -> Result<()> {
    writeln!(out, "{}", rule('-', 80))?;
    writeln!(out, "PROJECT: {project_id}")?;
    writeln!(out, "{}", rule('-', 80))?;
    Ok(())
}

pub fn write_volume_lines(out: &mut dyn Write, total_bytes: u64, cai_bytes: u64) -> Result<()> {
    writeln!(out, "  VOLUME (Last 30 Days):")?;
    writeln!(out, "  Total Ingest:  {} GB", fmt_grouped(gib(total_bytes), 4))?;
    writeln!(
        out,
        "  CAI Metadata:  {} GB (included in total)",
        fmt_grouped(gib(cai_bytes), 4)
    )?;
    writeln!(out)?;
    Ok(())
}

pub fn write_skip_notice(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "  [!] API Disabled or Permission Denied. (SKIPPED)")?;
    Ok(())
}

pub fn write_sink_details(out: &mut dyn Write, sinks: &[SinkDescriptor]) -> Result<()> {
    if sinks.is_empty() {
        writeln!(out, "     [i] No Log Sinks configured.")?;
        return Ok(());
    }

    for sink in sinks {
        writeln!(out, "     > Sink Name:       {}", sink.name)?;
        writeln!(out, "       Resource Name:   {}", sink.writer_identity)?;
        writeln!(out, "       Destination:     {}", sink.destination)?;
        writeln!(
            out,
            "       Inclusion Filt:  {}",
            inclusion_display(&sink.inclusion_filter)
        )?;

        if sink.exclusions.is_empty() {
            writeln!(out, "       Exclusions:      None")?;
        } else {
            writeln!(out, "       Exclusions:      {} found", sink.exclusions.len())?;
            for ex in &sink.exclusions {
                let head: String = ex.filter.chars().take(60).collect();
                writeln!(out, "         - {}: {}...", ex.name, head)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_sink_error(out: &mut dyn Write, err: &anyhow::Error) -> Result<()> {
    writeln!(
        out,
        "     [!] Could not fetch sinks (Permission denied?): {err:#}"
    )?;
    Ok(())
}

pub fn write_summary(out: &mut dyn Write, report: &OrgReport) -> Result<()> {
    writeln!(out, "{}", rule('=', 80))?;
    writeln!(out, "ORGANIZATION TOTALS")?;
    writeln!(out, "{}", rule('=', 80))?;
    writeln!(out, "Projects Found:          {}", report.found)?;
    writeln!(out, "Projects Scanned:        {}", report.scanned)?;
    writeln!(out, "Projects Skipped:        {}", report.skipped)?;
    writeln!(out, "{}", rule('-', 40))?;
    writeln!(
        out,
        "TOTAL VOLUME (30 Days):  {} TB",
        fmt_grouped(tib(report.total_bytes), 4)
    )?;
    writeln!(
        out,
        "                         ({} GB)",
        fmt_grouped(gib(report.total_bytes), 2)
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "  └─ CAI Portion:        {} TB",
        fmt_grouped(tib(report.cai_bytes), 4)
    )?;
    writeln!(
        out,
        "                         ({} GB)",
        fmt_grouped(gib(report.cai_bytes), 2)
    )?;
    writeln!(out, "{}", rule('=', 80))?;
    Ok(())
}
