//! HTML coverage report generation.
//!
//! Renders `index.html` in the output directory: a total-percentage
//! heading and one row per module linking to that module's detail page at
//! `<module>.COVER.html`. Detail pages themselves come from the coverage
//! engine.

use crate::adapters::CoverageEngine;
use crate::coverage::{percentage, CoverageStat};
use crate::result::{CubrirError, CubrirResult};
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name of the coverage index page
pub const INDEX_FILE: &str = "index.html";

/// Suffix of per-module detail pages
pub const DETAIL_SUFFIX: &str = ".COVER.html";

/// HTML coverage report over a set of module stats.
#[derive(Debug)]
pub struct HtmlReport<'a> {
    stats: &'a [CoverageStat],
}

impl<'a> HtmlReport<'a> {
    /// Create a report over the given stats
    #[must_use]
    pub fn new(stats: &'a [CoverageStat]) -> Self {
        Self { stats }
    }

    /// Total covered/uncovered sums across all modules
    #[must_use]
    pub fn totals(&self) -> (u64, u64) {
        self.stats
            .iter()
            .fold((0, 0), |(c, u), s| (c + s.covered, u + s.uncovered))
    }

    /// Truncated total percentage; 0 when no lines were seen at all
    #[must_use]
    pub fn total_percentage(&self) -> u64 {
        let (covered, uncovered) = self.totals();
        percentage(covered, uncovered)
    }

    /// Render the index page as a string.
    ///
    /// Module rows are sorted by module name ascending.
    #[must_use]
    pub fn generate(&self) -> String {
        use std::fmt::Write;

        let mut rows: Vec<&CoverageStat> = self.stats.iter().collect();
        rows.sort_by(|a, b| a.module.cmp(&b.module));

        let mut html = String::new();
        html.push_str("<html>\n<head><title>Coverage Summary</title></head>\n<body>\n");
        let _ = writeln!(html, "<h1>Total: {}%</h1>", self.total_percentage());
        html.push_str("<table>\n");
        for stat in rows {
            let module = escape(stat.module.as_str());
            let _ = writeln!(
                html,
                "<tr><td><a href=\"{module}{DETAIL_SUFFIX}\">{module}</a></td><td>{}%</td></tr>",
                stat.percentage()
            );
        }
        html.push_str("</table>\n</body>\n</html>\n");
        html
    }

    /// Path of a module's detail page inside `out_dir`
    #[must_use]
    pub fn detail_path(out_dir: &Path, stat: &CoverageStat) -> PathBuf {
        out_dir.join(format!("{}{DETAIL_SUFFIX}", stat.module))
    }

    /// Write the index page and request per-module detail pages.
    ///
    /// A detail page the engine cannot render is logged and skipped; only
    /// an unwritable index page is an error.
    ///
    /// # Errors
    ///
    /// Returns `CubrirError::Report` if the index page cannot be written.
    pub fn write<E: CoverageEngine>(&self, out_dir: &Path, engine: &E) -> CubrirResult<PathBuf> {
        let index = out_dir.join(INDEX_FILE);
        std::fs::write(&index, self.generate()).map_err(|e| {
            CubrirError::report(format!("failed to write {}: {e}", index.display()))
        })?;

        for stat in self.stats {
            let path = Self::detail_path(out_dir, stat);
            if let Err(e) = engine.render_detail(&stat.module, &path) {
                warn!(module = %stat.module, error = %e, "detail report skipped");
            }
        }
        Ok(index)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
