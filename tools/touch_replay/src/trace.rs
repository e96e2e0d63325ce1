use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{bail, Context, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracePhase {
    Start,
    Move,
    End,
    Cancel,
}

impl TracePhase {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "start" | "down" => Some(Self::Start),
            "move" => Some(Self::Move),
            "end" | "up" => Some(Self::End),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// One recorded host callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceSample {
    pub ms: u64,
    pub phase: TracePhase,
    pub x: f32,
    pub y: f32,
    /// Surface scroll offset when the callback fired; `0` when omitted.
    pub scroll_top: f32,
}

pub fn parse_trace(path: &Path) -> Result<Vec<TraceSample>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.with_context(|| format!("failed to read {}:{line_no}", path.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let sample = parse_line(trimmed).with_context(|| format!("{}:{line_no}", path.display()))?;
        if let Some(sample) = sample {
            out.push(sample);
        }
    }
    Ok(out)
}

/// Parses one trace row. Header rows (`touch,ms,...`, with or without the
/// `scroll_top` column) and rows tagged with anything other than `touch` are
/// skipped so traces can carry annotations.
pub fn parse_line(line: &str) -> Result<Option<TraceSample>> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.first() != Some(&"touch") || parts.get(1) == Some(&"ms") {
        return Ok(None);
    }
    if parts.len() < 5 {
        bail!("invalid trace line, expected at least 5 columns");
    }

    let ms = parts[1]
        .parse::<u64>()
        .with_context(|| format!("invalid ms '{}'", parts[1]))?;
    let Some(phase) = TracePhase::parse(parts[2]) else {
        bail!("invalid phase '{}'", parts[2]);
    };
    let x = parse_px(parts[3], "x")?;
    let y = parse_px(parts[4], "y")?;
    let scroll_top = match parts.get(5) {
        Some(raw) if !raw.is_empty() => parse_px(raw, "scroll_top")?,
        _ => 0.0,
    };

    Ok(Some(TraceSample {
        ms,
        phase,
        x,
        y,
        scroll_top,
    }))
}

fn parse_px(raw: &str, field: &str) -> Result<f32> {
    let value = raw
        .parse::<f32>()
        .with_context(|| format!("invalid {field} '{raw}'"))?;
    if !value.is_finite() {
        bail!("{field} must be a finite number");
    }
    Ok(value)
}

pub fn parse_expected_kinds(path: &Path) -> Result<Vec<&'static str>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut kinds = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.with_context(|| format!("failed to read {}:{line_no}", path.display()))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        let Some(kind) = normalize_kind(token) else {
            bail!(
                "{}:{line_no} invalid expected event kind: {token}",
                path.display()
            );
        };
        kinds.push(kind);
    }
    Ok(kinds)
}

fn normalize_kind(kind: &str) -> Option<&'static str> {
    match kind.to_ascii_lowercase().as_str() {
        "tap" => Some("tap"),
        "long_press" => Some("long_press"),
        "swipe_left" => Some("swipe_left"),
        "swipe_right" => Some("swipe_right"),
        "swipe_up" => Some("swipe_up"),
        "swipe_down" => Some("swipe_down"),
        "refresh" => Some("refresh"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_column_defaults_to_origin() {
        let sample = parse_line("touch,40,move,1.5,2").expect("valid line");
        assert_eq!(
            sample,
            Some(TraceSample {
                ms: 40,
                phase: TracePhase::Move,
                x: 1.5,
                y: 2.0,
                scroll_top: 0.0,
            })
        );
    }

    #[test]
    fn both_header_forms_are_skipped() {
        assert_eq!(parse_line("touch,ms,phase,x,y").expect("short header"), None);
        assert_eq!(
            parse_line("touch,ms,phase,x,y,scroll_top").expect("full header"),
            None
        );
    }

    #[test]
    fn annotation_rows_are_skipped() {
        assert_eq!(parse_line("note,refresh expected here").expect("skip"), None);
    }

    #[test]
    fn unknown_phase_is_rejected() {
        let err = parse_line("touch,0,hover,0,0").expect_err("hover is not a phase");
        assert!(err.to_string().contains("invalid phase 'hover'"));
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let err = parse_line("touch,0,start,NaN,0").expect_err("NaN x");
        assert!(err.to_string().contains("x must be a finite number"));
    }
}
