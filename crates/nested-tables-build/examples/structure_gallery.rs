//! Render a TOML document as a gallery page: the optimal table, then every
//! layout the data accepts with its ugliness.
//!
//! Usage: `cargo run -p nested-tables-build --example structure_gallery [INPUT] [OUTPUT]`
//!
//! Without `INPUT`, a small built-in document is used. `OUTPUT` defaults to
//! `gallery.html`.

use nested_tables_build::{render_gallery, render_gallery_file, write_page, TableDocument};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = r#"
[table]
title = "Two levels"
placeholder = ""

[data]
a = { aa = 11, ab = 12 }
b = { ba = 21, bb = 22, bc = 23 }
c = { ca = 31 }
"#;

fn main() -> nested_tables_build::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next();
    let output = args.next().unwrap_or_else(|| "gallery.html".to_string());

    match input {
        Some(input) => render_gallery_file(&input, &output)?,
        None => {
            let doc = TableDocument::from_str(SAMPLE)?;
            println!("Optimal: {}", doc.build()?.structure());
            let page = render_gallery(&doc)?;
            write_page(&output, &page)?;
        }
    }

    println!("Wrote {}", output);
    Ok(())
}
