//! Command handlers
//!
//! Each handler turns parsed arguments into a serializable report and
//! hands it to the output writer together with its human rendering.

use crate::cli::{DecodeArgs, InspectArgs, NextArgs, RangeSyntax, SatisfiesArgs, TranslateArgs};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use csemver_core::{CSVersion, ParseResult, SVersion, SVersionBound};
use serde::Serialize;

#[derive(Serialize)]
struct InspectReport {
    version: String,
    is_csemver: bool,
    quality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ordinal: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    long_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_version: Option<FileVersionReport>,
}

#[derive(Serialize)]
struct FileVersionReport {
    release: String,
    ci: String,
}

/// Show a version's ordinal, quality and both textual forms.
///
/// Versions outside the CSemVer grammar still report their quality; the
/// ordinal and the two forms only exist for CSemVer versions.
pub fn handle_inspect(args: InspectArgs, output: &mut OutputWriter) -> Result<()> {
    let version: SVersion = args.version.parse()?;
    tracing::debug!(version = %version, "inspecting");

    let report = match CSVersion::try_from(&version) {
        Ok(cs) => InspectReport {
            version: version.to_string(),
            is_csemver: true,
            quality: cs.quality().to_string(),
            ordinal: Some(cs.ordinal()),
            long_form: Some(cs.to_long_string()),
            short_form: Some(cs.to_normalized_string()),
            file_version: args.file_version.then(|| FileVersionReport {
                release: cs.file_version(false).to_string(),
                ci: cs.file_version(true).to_string(),
            }),
        },
        Err(reason) => {
            output.note(&format!("not a CSemVer version: {}", reason))?;
            InspectReport {
                version: version.to_string(),
                is_csemver: false,
                quality: version.quality().to_string(),
                ordinal: None,
                long_form: None,
                short_form: None,
                file_version: None,
            }
        }
    };

    let mut lines = vec![
        output.field("version", &report.version),
        output.field("csemver", report.is_csemver),
        output.field("quality", &report.quality),
    ];
    if let Some(ordinal) = report.ordinal {
        lines.push(output.field("ordinal", ordinal));
    }
    if let (Some(long), Some(short)) = (&report.long_form, &report.short_form) {
        lines.push(output.field("long form", long));
        lines.push(output.field("short form", short));
    }
    if let Some(fv) = &report.file_version {
        lines.push(output.field("file version", &fv.release));
        lines.push(output.field("file (CI)", &fv.ci));
    }
    output.report(&report, &lines)
}

#[derive(Serialize)]
struct DecodeReport {
    ordinal: u64,
    version: String,
    quality: String,
}

/// Decode an ordinal back into its version.
pub fn handle_decode(args: DecodeArgs, output: &mut OutputWriter) -> Result<()> {
    let version = CSVersion::from_ordinal(args.ordinal)?;
    let report = DecodeReport {
        ordinal: args.ordinal,
        version: if args.short {
            version.to_normalized_string()
        } else {
            version.to_long_string()
        },
        quality: version.quality().to_string(),
    };
    let lines = vec![
        output.field("ordinal", report.ordinal),
        output.field("version", &report.version),
        output.field("quality", &report.quality),
    ];
    output.report(&report, &lines)
}

#[derive(Serialize)]
struct NextReport {
    version: String,
    closest_only: bool,
    successors: Vec<SuccessorReport>,
}

#[derive(Serialize)]
struct SuccessorReport {
    version: String,
    ordinal: u64,
}

/// Enumerate the direct successors of a version.
pub fn handle_next(args: NextArgs, output: &mut OutputWriter) -> Result<()> {
    let version: CSVersion = args.version.parse()?;
    let successors: Vec<SuccessorReport> = version
        .direct_successors(args.closest)
        .into_iter()
        .map(|s| SuccessorReport {
            ordinal: s.ordinal(),
            version: s.to_string(),
        })
        .collect();
    if successors.is_empty() {
        output.note("this version has no successors")?;
    }
    let lines: Vec<String> = successors
        .iter()
        .map(|s| output.field(&s.ordinal.to_string(), &s.version))
        .collect();
    let report = NextReport {
        version: version.to_string(),
        closest_only: args.closest,
        successors,
    };
    output.report(&report, &lines)
}

#[derive(Serialize)]
struct SatisfiesReport {
    range: String,
    bound: String,
    is_approximated: bool,
    results: Vec<SatisfactionReport>,
}

#[derive(Serialize)]
struct SatisfactionReport {
    version: String,
    satisfied: bool,
}

/// Test versions against a bound; exits non-zero when any fails.
pub fn handle_satisfies(args: SatisfiesArgs, output: &mut OutputWriter) -> Result<()> {
    let parsed = parse_range(args.syntax, &args.range, args.include_prerelease);
    let is_approximated = parsed.is_approximated;
    let bound = unwrap_range(parsed, output)?;

    let mut results = Vec::with_capacity(args.versions.len());
    let mut lines = Vec::with_capacity(args.versions.len());
    for text in &args.versions {
        let version: SVersion = text.parse()?;
        let satisfied = bound.satisfies(&version);
        lines.push(format!("{}  {}", output.verdict(satisfied), version));
        results.push(SatisfactionReport {
            version: version.to_string(),
            satisfied,
        });
    }
    let failed = results.iter().filter(|r| !r.satisfied).count();
    let report = SatisfiesReport {
        range: args.range.clone(),
        bound: bound.to_native_string(),
        is_approximated,
        results,
    };
    output.report(&report, &lines)?;
    if failed > 0 {
        return Err(Error::Unsatisfied { count: failed });
    }
    Ok(())
}

#[derive(Serialize)]
struct TranslateReport {
    input: String,
    bound: String,
    output: String,
    is_approximated: bool,
    fourth_part_lost: bool,
}

/// Translate a range expression between syntaxes.
pub fn handle_translate(args: TranslateArgs, output: &mut OutputWriter) -> Result<()> {
    let parsed = parse_range(args.from, &args.range, args.include_prerelease);
    let is_approximated = parsed.is_approximated;
    let fourth_part_lost = parsed.fourth_part_lost;
    let bound = unwrap_range(parsed, output)?;

    let rendered = match args.to {
        RangeSyntax::Native => bound.to_native_string(),
        RangeSyntax::Npm => bound.to_npm_string(),
        RangeSyntax::Nuget => bound.to_nuget_string(),
    };
    let report = TranslateReport {
        input: args.range.clone(),
        bound: bound.to_native_string(),
        output: rendered,
        is_approximated,
        fourth_part_lost,
    };
    let lines = vec![report.output.clone()];
    output.report(&report, &lines)
}

/// Parse a range in the requested syntax.
fn parse_range(
    syntax: RangeSyntax,
    text: &str,
    include_prerelease: bool,
) -> ParseResult<SVersionBound> {
    match syntax {
        RangeSyntax::Native => SVersionBound::native_try_parse(text),
        RangeSyntax::Npm => SVersionBound::npm_try_parse(text, include_prerelease),
        RangeSyntax::Nuget => SVersionBound::nuget_try_parse(text),
    }
}

/// Surface the fidelity flags as notes, then unwrap or fail.
fn unwrap_range(
    parsed: ParseResult<SVersionBound>,
    output: &mut OutputWriter,
) -> Result<SVersionBound> {
    if parsed.is_approximated {
        output.note("the range could not be translated exactly; using its lower-bound approximation")?;
    }
    if parsed.fourth_part_lost {
        output.note("a legacy 4th version component was discarded")?;
    }
    parsed.into_value().map_err(|e| Error::invalid_range(e.to_string()))
}
