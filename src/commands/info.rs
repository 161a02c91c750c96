use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, json: bool) -> Result<()> {
    let doc = PdfDocument::open(&path)?;
    let summary = doc.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("File: {}", summary.path.display());
    println!("Pages: {}", summary.page_count);
    println!("Size: {}", format_file_size(summary.file_size));

    if let Some(title) = &summary.title {
        println!("Title: {}", title);
    }
    if let Some(author) = &summary.author {
        println!("Author: {}", author);
    }
    if let Some(subject) = &summary.subject {
        println!("Subject: {}", subject);
    }
    if let Some(keywords) = &summary.keywords {
        println!("Keywords: {}", keywords);
    }
    if let Some(creator) = &summary.creator {
        println!("Creator: {}", creator);
    }
    if let Some(producer) = &summary.producer {
        println!("Producer: {}", producer);
    }
    if let Some(creation_date) = &summary.creation_date {
        println!("Created: {}", format_pdf_date(creation_date));
    }
    if let Some(mod_date) = &summary.mod_date {
        println!("Modified: {}", format_pdf_date(mod_date));
    }

    Ok(())
}

fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

fn format_pdf_date(date: &str) -> String {
    // PDF date format: D:YYYYMMDDHHmmSSOHH'mm
    if let Some(d) = date.strip_prefix("D:") {
        if d.len() >= 8 && d[..8].bytes().all(|b| b.is_ascii_digit()) {
            let time = if d.len() >= 14 {
                format!(" {}:{}:{}", &d[8..10], &d[10..12], &d[12..14])
            } else {
                String::new()
            };
            return format!("{}-{}-{}{}", &d[0..4], &d[4..6], &d[6..8], time);
        }
    }
    date.to_string()
}
