use crate::page_range::{parse_ranges, validate_bounds, Coverage, PageRange};
use crate::pdf::PdfDocument;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct SplitOptions {
    /// Range text, one `<start>-<end>` per line.
    pub ranges_text: String,
    pub output_dir: PathBuf,
    /// Skip the confirmation prompt on coverage warnings.
    pub assume_yes: bool,
    pub dry_run: bool,
    /// With `dry_run`, emit the plan as JSON.
    pub json: bool,
}

pub fn run<P: AsRef<Path>>(input: P, options: &SplitOptions) -> Result<()> {
    let input = input.as_ref();

    let ranges = parse_ranges(&options.ranges_text)?;
    if ranges.is_empty() {
        anyhow::bail!("No page ranges given");
    }

    let doc = PdfDocument::open(input)?;
    let coverage = Coverage::of(&ranges, doc.page_count());
    let stem = file_stem(input);

    if options.dry_run {
        return report_plan(&doc, &ranges, &coverage, &options.output_dir, stem, options.json);
    }

    warn_about(&coverage);
    if !coverage.is_clean() && !options.assume_yes && !confirm("Split anyway?")? {
        println!("Aborted; nothing written.");
        return Ok(());
    }

    let written = write_parts(&doc, &ranges, &options.output_dir, stem)?;
    println!(
        "Split {} into {} part(s) in {}",
        input.display(),
        written,
        options.output_dir.display()
    );

    Ok(())
}

/// Materialize each range into its own PDF under `output_dir`.
///
/// Every range passes the strict bounds gate immediately before extraction;
/// a rejected range aborts the remainder but parts already written stay.
pub(crate) fn write_parts(
    doc: &PdfDocument,
    ranges: &[PageRange],
    output_dir: &Path,
    stem: &str,
) -> Result<usize> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let total_pages = doc.page_count();
    for range in ranges {
        validate_bounds(*range, total_pages)?;

        let pages: Vec<u32> = range.pages().collect();
        let mut part = doc.extract_pages(&pages)?;
        let output_path = part_path(output_dir, stem, range);
        PdfDocument::save(&mut part, &output_path)?;
        println!("Wrote {}", output_path.display());
    }

    Ok(ranges.len())
}

pub(crate) fn file_stem(input: &Path) -> &str {
    input.file_stem().and_then(|s| s.to_str()).unwrap_or("page")
}

fn part_path(output_dir: &Path, stem: &str, range: &PageRange) -> PathBuf {
    output_dir.join(format!("{}_pages_{}.pdf", stem, range))
}

fn warn_about(coverage: &Coverage) {
    if !coverage.duplicate_pages.is_empty() {
        eprintln!(
            "Warning: pages covered by more than one range: {}",
            join_pages(&coverage.duplicate_pages)
        );
    }
    if !coverage.missing_pages.is_empty() {
        eprintln!(
            "Warning: pages covered by no range: {}",
            join_pages(&coverage.missing_pages)
        );
    }
}

fn join_pages(pages: &[u32]) -> String {
    pages
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

#[derive(Serialize)]
struct SplitPlan<'a> {
    input: &'a Path,
    total_pages: u32,
    coverage: &'a Coverage,
    parts: Vec<PlannedPart>,
}

#[derive(Serialize)]
struct PlannedPart {
    range: PageRange,
    output: PathBuf,
}

fn report_plan(
    doc: &PdfDocument,
    ranges: &[PageRange],
    coverage: &Coverage,
    output_dir: &Path,
    stem: &str,
    json: bool,
) -> Result<()> {
    let parts: Vec<PlannedPart> = ranges
        .iter()
        .map(|r| PlannedPart {
            range: *r,
            output: part_path(output_dir, stem, r),
        })
        .collect();

    if json {
        let plan = SplitPlan {
            input: &doc.path,
            total_pages: doc.page_count(),
            coverage,
            parts,
        };
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    warn_about(coverage);
    for part in &parts {
        println!("Would write {} (pages {})", part.output.display(), part.range);
    }
    for range in &coverage.invalid_ranges {
        println!(
            "Range {} would be rejected (document has {} page(s))",
            range,
            doc.page_count()
        );
    }

    Ok(())
}
