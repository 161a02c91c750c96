use anyhow::{Context, Result};
use lopdf::{Document, Object, ObjectId};
use std::path::Path;

pub fn run<P: AsRef<Path>>(inputs: &[P], output: &Path) -> Result<()> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }

    if inputs.len() == 1 {
        // Just copy the single file
        std::fs::copy(&inputs[0], output).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                inputs[0].as_ref().display(),
                output.display()
            )
        })?;
        println!("Copied 1 file to {}", output.display());
        return Ok(());
    }

    let mut merged = Document::load(&inputs[0])
        .with_context(|| format!("Failed to load PDF: {}", inputs[0].as_ref().display()))?;

    let mut total_pages = merged.get_pages().len();
    let mut max_id = merged.max_id;

    for input in &inputs[1..] {
        let mut doc = Document::load(input)
            .with_context(|| format!("Failed to load PDF: {}", input.as_ref().display()))?;

        // Move the document into an id space disjoint from everything
        // merged so far, then pull its whole object table across.
        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        let new_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        total_pages += new_pages.len();

        merged.objects.extend(doc.objects);
        append_pages(&mut merged, &new_pages)?;
    }

    merged.renumber_objects();
    merged.compress();
    merged
        .save(output)
        .with_context(|| format!("Failed to save merged PDF: {}", output.display()))?;

    println!(
        "Merged {} files ({} pages) into {}",
        inputs.len(),
        total_pages,
        output.display()
    );

    Ok(())
}

/// Hang the given page objects off the merged document's page tree.
fn append_pages(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let pages_id = merged
        .catalog()?
        .get(b"Pages")?
        .as_reference()
        .context("Pages entry is not a reference")?;
    let pages_dict = merged.get_dictionary_mut(pages_id)?;

    match pages_dict.get_mut(b"Kids")? {
        Object::Array(kids) => {
            for &page_id in page_ids {
                kids.push(Object::Reference(page_id));
            }
        }
        _ => anyhow::bail!("Pages Kids is not an array"),
    }

    let count = pages_dict
        .get(b"Count")
        .and_then(|c| c.as_i64())
        .unwrap_or(0);
    pages_dict.set("Count", Object::Integer(count + page_ids.len() as i64));

    Ok(())
}
