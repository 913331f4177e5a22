//! HTML rendering.
//!
//! Output is a single line of markup with no styling:
//!
//! ```text
//! <table>
//!   <tr><td corner/> column headers, depth 0 </tr>
//!   <tr>             column headers, depth 1 </tr>
//!   <tr> row headers ... <td> data slice </td> </tr>   one per row leaf
//! </table>
//! ```
//!
//! The same table always renders to the same bytes.

use std::fmt::Write as _;

use crate::accessor::{Cell, Cells};
use crate::geometry::{depth, final_length};
use crate::iter::{self, Span};
use crate::tree::Table;

/// Default text for cells without data.
pub const DEFAULT_PLACEHOLDER: &str = "-";

/// Rendering knobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Text written into absent cells.
    pub placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

/// Turns a [`Table`] into an HTML `<table>` string.
#[derive(Clone, Debug, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, table: &Table) -> String {
        let column_headers = table.column_headers();
        let row_headers = table.row_headers();
        let row_length = final_length(column_headers).max(1);
        let mut cells = table.cells();

        let mut out = String::from("<table>");

        if !column_headers.is_empty() {
            out.push_str("<tr>");
            if !row_headers.is_empty() {
                let corner = Span {
                    colspan: depth(row_headers),
                    rowspan: depth(column_headers),
                };
                push_tag(&mut out, "td", corner, "");
            }
            let mut previous_depth = 0;
            for cell in iter::column_headers(column_headers) {
                if cell.depth != previous_depth {
                    out.push_str("</tr><tr>");
                    previous_depth = cell.depth;
                }
                push_tag(&mut out, "th", cell.span, &escape(&cell.key.to_string()));
            }
            out.push_str("</tr>");
        }

        if row_headers.is_empty() {
            out.push_str("<tr>");
            self.push_data(&mut out, &mut cells, row_length);
            out.push_str("</tr>");
        } else {
            let mut row_open = false;
            for cell in iter::row_headers(row_headers) {
                if !row_open {
                    out.push_str("<tr>");
                    row_open = true;
                }
                push_tag(&mut out, "th", cell.span, &escape(&cell.key.to_string()));
                if cell.is_leaf {
                    self.push_data(&mut out, &mut cells, row_length);
                    out.push_str("</tr>");
                    row_open = false;
                }
            }
        }

        out.push_str("</table>");
        out
    }

    /// Write the next `count` data cells.
    fn push_data(&self, out: &mut String, cells: &mut Cells<'_>, count: usize) {
        for cell in cells.by_ref().take(count) {
            let text = match cell {
                Cell::Value(scalar) => scalar.to_string(),
                Cell::Absent => self.options.placeholder.clone(),
            };
            push_tag(out, "td", Span::UNIT, &escape(&text));
        }
    }
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// `content` must already be escaped.
fn push_tag(out: &mut String, name: &str, span: Span, content: &str) {
    out.push('<');
    out.push_str(name);
    if span.colspan > 1 {
        let _ = write!(out, " colspan=\"{}\"", span.colspan);
    }
    if span.rowspan > 1 {
        let _ = write!(out, " rowspan=\"{}\"", span.rowspan);
    }
    out.push('>');
    out.push_str(content);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

impl Table {
    /// Render with default options.
    pub fn generate_html(&self) -> String {
        HtmlRenderer::default().render(self)
    }
}
