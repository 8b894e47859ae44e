// src/output.rs
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Write;

use crate::types::Opportunity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

const CSV_HEADERS: [&str; 8] = [
    "id",
    "title",
    "organization",
    "type",
    "location",
    "deadline",
    "link",
    "tags",
];

pub fn render<W: Write>(opportunities: &[Opportunity], format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Table => render_table(opportunities, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, opportunities)
                .context("Failed to serialize opportunities")?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => render_csv(opportunities, out),
    }
}

/// Full record, for the detail view
pub fn render_detail<W: Write>(opp: &Opportunity, format: OutputFormat, out: &mut W) -> Result<()> {
    if format != OutputFormat::Table {
        return render(std::slice::from_ref(opp), format, out);
    }

    writeln!(out, "{}", opp.title)?;
    writeln!(out, "{}", "=".repeat(opp.title.chars().count()))?;
    writeln!(out, "Organization: {}", opp.organization)?;
    writeln!(out, "Type:         {}", opp.kind)?;
    writeln!(out, "Category:     {}", opp.category)?;
    writeln!(out, "Location:     {}", opp.location.as_deref().unwrap_or("-"))?;
    writeln!(out, "Deadline:     {}", opp.deadline)?;
    if let Some(posted) = &opp.posted {
        writeln!(out, "Posted:       {}", posted)?;
    }
    writeln!(out, "Eligibility:  {}", opp.eligibility)?;
    writeln!(out, "Source:       {}", opp.source)?;
    writeln!(out, "Apply:        {}", opp.link)?;
    if !opp.tags.is_empty() {
        writeln!(out, "Tags:         {}", opp.tags.join(", "))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", opp.description)?;
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn render_table<W: Write>(opportunities: &[Opportunity], out: &mut W) -> Result<()> {
    if opportunities.is_empty() {
        writeln!(out, "No opportunities found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<14} {:<36} {:<22} {:<18} {:<20} {:<12}",
        "ID", "Title", "Organization", "Type", "Location", "Deadline"
    )?;
    writeln!(out, "{}", "-".repeat(127))?;

    for opp in opportunities {
        writeln!(
            out,
            "{:<14} {:<36} {:<22} {:<18} {:<20} {:<12}",
            truncate(&opp.id, 14),
            truncate(&opp.title, 36),
            truncate(&opp.organization, 22),
            truncate(&opp.kind, 18),
            truncate(opp.location.as_deref().unwrap_or("-"), 20),
            truncate(&opp.deadline, 12),
        )?;
    }

    writeln!(out, "\n{} opportunities", opportunities.len())?;
    Ok(())
}

fn render_csv<W: Write>(opportunities: &[Opportunity], out: &mut W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(CSV_HEADERS)
        .context("Failed to write CSV header")?;

    for opp in opportunities {
        writer
            .write_record([
                opp.id.as_str(),
                opp.title.as_str(),
                opp.organization.as_str(),
                opp.kind.as_str(),
                opp.location.as_deref().unwrap_or(""),
                opp.deadline.as_str(),
                opp.link.as_str(),
                opp.tags.join(";").as_str(),
            ])
            .with_context(|| format!("Failed to write CSV row for {}", opp.id))?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}
