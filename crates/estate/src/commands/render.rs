//! `estate render` command implementation.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use estate_api::Page;
use estate_shortcode::{RenderOutput, Segment, ShortcodeRenderer, compose, scan};
use serde::{Deserialize, Serialize};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Page JSON as served by the content API (`-` reads stdin).
    file: PathBuf,

    /// Print the segment list and warnings as JSON instead of HTML.
    #[arg(long)]
    json: bool,
}

/// A page, bare or inside the API `data` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageDocument {
    Envelope { data: Page },
    Bare(Page),
}

/// `--json` output: composed segments in document order plus warnings.
#[derive(Debug, Serialize)]
struct SegmentReport {
    segments: Vec<Segment>,
    warnings: Vec<String>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a page document.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let text = if self.file.as_os_str() == "-" {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        } else {
            std::fs::read_to_string(&self.file)?
        };

        let page = parse_document(&text)?;
        let rendered = render_page(&page);
        tracing::info!(
            slug = %page.slug,
            nodes = rendered.nodes.len(),
            warnings = rendered.warnings.len(),
            "Rendered page"
        );

        if self.json {
            let report = segment_report(&page, rendered.warnings);
            output.result(&serde_json::to_string_pretty(&report)?)?;
        } else {
            output.result(&rendered.html())?;
            for warning in &rendered.warnings {
                output.warning(&format!("warning: {warning}"));
            }
        }
        Ok(())
    }
}

fn parse_document(text: &str) -> Result<Page, CliError> {
    let document: PageDocument = serde_json::from_str(text)?;
    Ok(match document {
        PageDocument::Envelope { data } | PageDocument::Bare(data) => data,
    })
}

fn render_page(page: &Page) -> RenderOutput {
    let occurrences = page.occurrences();
    ShortcodeRenderer::new().render(&page.content, Some(&occurrences))
}

fn segment_report(page: &Page, warnings: Vec<String>) -> SegmentReport {
    let occurrences = page.occurrences();
    let scanned = scan(&page.content, Some(&occurrences));
    SegmentReport {
        segments: compose(&page.content, &scanned.occurrences),
        warnings,
    }
}
