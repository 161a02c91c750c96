use crate::commands::split;
use crate::page_range::{even_split, EvenSplit};
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(input: P, pages_per_part: u32, output_dir: &Path) -> Result<()> {
    let input = input.as_ref();
    let doc = PdfDocument::open(input)?;
    let total_pages = doc.page_count();

    // The generated partition is gap-free and disjoint, so the advisory
    // coverage pass of `split` has nothing to say here.
    match even_split(total_pages, pages_per_part)? {
        EvenSplit::Single => {
            println!(
                "{} has {} page(s), which fits in a single part of {}; nothing to split",
                input.display(),
                total_pages,
                pages_per_part
            );
        }
        EvenSplit::Parts(ranges) => {
            let written =
                split::write_parts(&doc, &ranges, output_dir, split::file_stem(input))?;
            println!(
                "Split {} pages into {} part(s) in {}",
                total_pages,
                written,
                output_dir.display()
            );
        }
    }

    Ok(())
}
