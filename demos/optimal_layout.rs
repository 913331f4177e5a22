//! Score every layout of a prison census and keep the least ugly one.
//!
//! The data mixes depths: some categories stop at the sex level, others
//! split by age. Layouts that change axis below such a category are skipped.
//!
//! Run with `RUST_LOG=debug` to see each candidate as it is scored.

use nested_tables::*;
use tracing_subscriber::EnvFilter;

fn census() -> Data {
    nested! {
        "1901" {
            "remand prison" {
                "men" => 50;
                "women" => 30;
            }
            "detention wing" {
                "boys" {
                    "under 13" => 1;
                    "over 13" => 7;
                }
                "girls" => 0;
            }
        }
        "1902" {
            "remand prison" {
                "men" => 80;
                "women" => 40;
            }
            "correctional wing" {
                "men" => 12;
                "boys" {
                    "under 13" => 1;
                    "over 13" => 2;
                }
            }
        }
        "1903" {
            "remand prison" {
                "men" => 70;
                "women" => 38;
                "girls" => 2;
            }
            "correctional wing" {
                "men" => 5;
                "boys" {
                    "under 13" => 1;
                    "over 13" => 3;
                }
            }
            "detention wing" {
                "men" => 6;
                "boys" {
                    "under 13" => 0;
                    "over 13" => 2;
                }
                "girls" => 1;
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data = census();
    println!("=== Optimal Layout Example ===\n");
    println!("Depth: {} ({} structures)\n", data.depth(), 1usize << data.depth());

    println!("Candidates:");
    for candidate in rank(&data)? {
        println!(
            "  {:<4} {:<40} ugliness {}",
            candidate.table.structure().symbols(),
            candidate.table.structure().to_string(),
            candidate.ugliness
        );
    }
    println!();

    let best = build_optimal_table(&data)?;
    println!("Optimal: {} (ugliness {})\n", best.structure(), best.ugliness());
    println!("{}", best.generate_html());
    Ok(())
}
