//! Rendering of job parameters into a single `--flag value` line.
//!
//! Rules per field kind:
//! - text: trimmed, skipped when empty or [`NOT_SELECTED`](crate::NOT_SELECTED), always double-quoted
//!   with inner quotes escaped; line breaks inside the value become spaces
//! - number: skipped when zero or not finite, integral values have no decimal point
//! - flag: `--name true` when set, omitted otherwise

use crate::choices::is_selected;
use crate::params::{JobParams, ParamKind, ParamName, ParamValue};

/// Render `params` as one line of space separated tokens in line order.
/// Returns an empty string when nothing is set.
pub fn build_line(params: &JobParams) -> String {
    ParamName::all()
        .into_iter()
        .filter_map(|name| token(name, params.get(name)))
        .collect::<Vec<_>>()
        .join(" ")
}

impl JobParams {
    pub fn to_line(&self) -> String {
        build_line(self)
    }
}

fn token(name: ParamName, value: &ParamValue) -> Option<String> {
    let rendered = match name.kind() {
        ParamKind::Text => text_value(value).map(|v| quote(&v)),
        ParamKind::Number => number_value(value),
        ParamKind::Flag => flag_value(value).then(|| "true".to_string()),
    }?;

    Some(format!("--{} {}", name.name(), rendered))
}

fn text_value(value: &ParamValue) -> Option<String> {
    let raw = match value {
        ParamValue::Absent => return None,
        ParamValue::Text(s) => s.clone(),
        ParamValue::Number(n) => format_number(*n)?,
        ParamValue::Bool(b) => b.to_string(),
    };

    is_selected(&raw).then(|| single_line(raw.trim()))
}

fn number_value(value: &ParamValue) -> Option<String> {
    match value {
        ParamValue::Number(n) if *n != 0.0 => format_number(*n),
        ParamValue::Text(s) => {
            let s = s.trim();
            (!s.is_empty() && s != "0").then(|| single_line(s))
        }
        ParamValue::Bool(true) => Some("1".to_string()),
        _ => None,
    }
}

fn flag_value(value: &ParamValue) -> bool {
    match value {
        ParamValue::Absent => false,
        ParamValue::Bool(b) => *b,
        ParamValue::Number(n) => *n != 0.0 && !n.is_nan(),
        ParamValue::Text(s) => !s.is_empty(),
    }
}

/// `Display` for `f64` already omits the fractional part of integral values
/// and prints the shortest representation that round-trips.
fn format_number(n: f64) -> Option<String> {
    n.is_finite().then(|| format!("{n}"))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

fn single_line(value: &str) -> String {
    if !value.contains(['\n', '\r']) {
        return value.to_string();
    }

    value
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::NOT_SELECTED;
    use ParamName::*;

    #[test]
    fn test_empty_params_give_empty_line() {
        assert_eq!(build_line(&JobParams::new()), "");
    }

    #[test]
    fn test_defaults_give_empty_line() {
        let params = JobParams::new()
            .with(Prompt, "   ")
            .with(SdModel, NOT_SELECTED)
            .with(SamplerName, NOT_SELECTED)
            .with(Seed, 0)
            .with(CfgScale, 0.0)
            .with(Width, ParamValue::Absent)
            .with(RestoreFaces, false)
            .with(Tiling, false);

        assert_eq!(params.to_line(), "");
    }

    #[test]
    fn test_example_line() {
        let params = JobParams::new()
            .with(Prompt, "a cat")
            .with(Steps, 20)
            .with(RestoreFaces, true);

        assert_eq!(params.to_line(), r#"--prompt "a cat" --steps 20 --restore_faces true"#);
    }

    #[test]
    fn test_fixed_order_regardless_of_insertion() {
        let params = JobParams::new()
            .with(DoNotSaveGrid, true)
            .with(Height, 768)
            .with(SamplerName, "Euler a")
            .with(SamplerIndex, 3)
            .with(NegativePrompt, "blurry")
            .with(Prompt, "castle");

        assert_eq!(
            params.to_line(),
            r#"--prompt "castle" --negative_prompt "blurry" --sampler_index 3 --sampler_name "Euler a" --height 768 --do_not_save_grid true"#
        );
    }

    #[test]
    fn test_text_is_trimmed_and_idempotent() {
        for name in ParamName::all().into_iter().filter(|n| n.kind() == ParamKind::Text) {
            let padded = JobParams::new().with(name, "  a cat \t");
            let trimmed = JobParams::new().with(name, "a cat");

            assert_eq!(padded.to_line(), trimmed.to_line(), "{name}");
            assert_eq!(padded.to_line(), format!("--{name} \"a cat\""));
            assert_eq!(padded.to_line(), padded.to_line());
        }
    }

    #[test]
    fn test_inner_quotes_escaped() {
        let params = JobParams::new().with(Prompt, r#"a "red" car"#);
        assert_eq!(params.to_line(), r#"--prompt "a \"red\" car""#);
    }

    #[test]
    fn test_line_breaks_in_text_become_spaces() {
        let params = JobParams::new().with(Prompt, "a cat,\n  sitting\r\n\non a mat");
        assert_eq!(params.to_line(), r#"--prompt "a cat, sitting on a mat""#);
    }

    #[test]
    fn test_number_rendering() {
        let params = JobParams::new()
            .with(Seed, -1)
            .with(SubseedStrength, 0.35)
            .with(CfgScale, 7.5)
            .with(Width, 512.0);

        assert_eq!(
            params.to_line(),
            "--seed -1 --subseed_strength 0.35 --cfg_scale 7.5 --width 512"
        );
    }

    #[test]
    fn test_large_seed_keeps_all_digits() {
        let params = JobParams::new().with(Seed, 4294967295_i64);
        assert_eq!(params.to_line(), "--seed 4294967295");
    }

    #[test]
    fn test_non_finite_numbers_omitted() {
        let params = JobParams::new()
            .with(CfgScale, f64::NAN)
            .with(Steps, f64::INFINITY);
        assert_eq!(params.to_line(), "");
    }

    #[test]
    fn test_text_in_number_field() {
        let params = JobParams::new()
            .with(Steps, " 30 ")
            .with(Seed, "0")
            .with(Width, "");
        assert_eq!(params.to_line(), "--steps 30");
    }

    #[test]
    fn test_number_in_text_field_is_quoted() {
        let params = JobParams::new().with(Styles, 42);
        assert_eq!(params.to_line(), r#"--styles "42""#);
    }

    #[test]
    fn test_false_flags_omitted() {
        let params = JobParams::new()
            .with(RestoreFaces, false)
            .with(Tiling, true)
            .with(DoNotSaveSamples, false);
        assert_eq!(params.to_line(), "--tiling true");
    }

    #[test]
    fn test_every_parameter() {
        let mut params = JobParams::new();
        for name in ParamName::all() {
            match name.kind() {
                ParamKind::Text => params.set(name, "x"),
                ParamKind::Number => params.set(name, 1),
                ParamKind::Flag => params.set(name, true),
            }
        }

        let line = params.to_line();
        let flags: Vec<&str> = line.split(' ').filter(|t| t.starts_with("--")).collect();
        let expected: Vec<String> = ParamName::all().iter().map(|n| format!("--{n}")).collect();
        assert_eq!(flags, expected);
    }
}
