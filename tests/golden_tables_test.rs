//! Rendered markup for fixed data and structures.
//!
//! Output must be byte-stable: these snapshots double as golden files.

use insta::assert_snapshot;
use nested_tables::Axis::{Column, Row};
use nested_tables::{build_optimal_table, build_table, nested, Data};

fn level_1() -> Data {
    nested! {
        "a" => 1;
        "b" => 2;
        "c" => 3;
    }
}

fn level_2() -> Data {
    nested! {
        "a" { "aa" => 11; "ab" => 12; }
        "b" { "ba" => 21; "bb" => 22; "bc" => 23; }
        "c" { "ca" => 31; }
    }
}

fn mixed_levels() -> Data {
    nested! {
        "a" { "aa" => 11; "ab" => 12; }
        "b" => 2;
    }
}

#[test]
fn level_1_rows() {
    let html = build_table(&level_1(), [Row]).unwrap().generate_html();
    assert_snapshot!(html, @r#"<table><tr><th>a</th><td>1</td></tr><tr><th>b</th><td>2</td></tr><tr><th>c</th><td>3</td></tr></table>"#);
}

#[test]
fn level_1_columns() {
    let html = build_table(&level_1(), [Column]).unwrap().generate_html();
    assert_snapshot!(html, @r#"<table><tr><th>a</th><th>b</th><th>c</th></tr><tr><td>1</td><td>2</td><td>3</td></tr></table>"#);
}

#[test]
fn level_1_optimal_is_rows() {
    let optimal = build_optimal_table(&level_1()).unwrap().generate_html();
    let rows = build_table(&level_1(), [Row]).unwrap().generate_html();
    assert_eq!(optimal, rows);
}

#[test]
fn level_2_columns_columns() {
    let html = build_table(&level_2(), [Column, Column]).unwrap().generate_html();
    assert_snapshot!(html, @r#"<table><tr><th colspan="2">a</th><th colspan="3">b</th><th>c</th></tr><tr><th>aa</th><th>ab</th><th>ba</th><th>bb</th><th>bc</th><th>ca</th></tr><tr><td>11</td><td>12</td><td>21</td><td>22</td><td>23</td><td>31</td></tr></table>"#);
}

#[test]
fn level_2_rows_rows() {
    let html = build_table(&level_2(), [Row, Row]).unwrap().generate_html();
    assert_snapshot!(html, @r#"<table><tr><th rowspan="2">a</th><th>aa</th><td>11</td></tr><tr><th>ab</th><td>12</td></tr><tr><th rowspan="3">b</th><th>ba</th><td>21</td></tr><tr><th>bb</th><td>22</td></tr><tr><th>bc</th><td>23</td></tr><tr><th>c</th><th>ca</th><td>31</td></tr></table>"#);
}

#[test]
fn level_2_columns_rows() {
    let html = build_table(&level_2(), [Column, Row]).unwrap().generate_html();
    assert_snapshot!(html, @r#"<table><tr><td></td><th>a</th><th>b</th><th>c</th></tr><tr><th>aa</th><td>11</td><td>-</td><td>-</td></tr><tr><th>ab</th><td>12</td><td>-</td><td>-</td></tr><tr><th>ba</th><td>-</td><td>21</td><td>-</td></tr><tr><th>bb</th><td>-</td><td>22</td><td>-</td></tr><tr><th>bc</th><td>-</td><td>23</td><td>-</td></tr><tr><th>ca</th><td>-</td><td>-</td><td>31</td></tr></table>"#);
}

#[test]
fn level_2_rows_columns() {
    let html = build_table(&level_2(), [Row, Column]).unwrap().generate_html();
    assert_snapshot!(html, @r#"<table><tr><td></td><th>aa</th><th>ab</th><th>ba</th><th>bb</th><th>bc</th><th>ca</th></tr><tr><th>a</th><td>11</td><td>12</td><td>-</td><td>-</td><td>-</td><td>-</td></tr><tr><th>b</th><td>-</td><td>-</td><td>21</td><td>22</td><td>23</td><td>-</td></tr><tr><th>c</th><td>-</td><td>-</td><td>-</td><td>-</td><td>-</td><td>31</td></tr></table>"#);
}

#[test]
fn level_2_optimal_is_rows_rows() {
    // All four layouts score 12; the first one wins.
    let optimal = build_optimal_table(&level_2()).unwrap();
    assert_eq!(optimal.ugliness(), 12);
    assert_eq!(
        optimal.generate_html(),
        build_table(&level_2(), [Row, Row]).unwrap().generate_html()
    );
}

#[test]
fn mixed_levels_columns() {
    let html = build_table(&mixed_levels(), [Column, Column]).unwrap().generate_html();
    assert_snapshot!(html, @r#"<table><tr><th colspan="2">a</th><th rowspan="2">b</th></tr><tr><th>aa</th><th>ab</th></tr><tr><td>11</td><td>12</td><td>2</td></tr></table>"#);
}

#[test]
fn mixed_levels_rows() {
    let html = build_table(&mixed_levels(), [Row, Row]).unwrap().generate_html();
    assert_snapshot!(html, @r#"<table><tr><th rowspan="2">a</th><th>aa</th><td>11</td></tr><tr><th>ab</th><td>12</td></tr><tr><th colspan="2">b</th><td>2</td></tr></table>"#);
}

#[test]
fn mixed_levels_split_axes_are_rejected() {
    assert!(build_table(&mixed_levels(), [Row, Column]).is_err());
    assert!(build_table(&mixed_levels(), [Column, Row]).is_err());
}

#[test]
fn three_levels_with_corner_span() {
    let data = nested! {
        "x" {
            "a" { "p" => 1; "q" => 2; }
            "b" { "p" => 3; }
        }
        "y" {
            "a" { "p" => 4; }
        }
    };
    let html = build_table(&data, [Row, Row, Column]).unwrap().generate_html();
    assert_snapshot!(html, @r#"<table><tr><td colspan="2"></td><th>p</th><th>q</th></tr><tr><th rowspan="2">x</th><th>a</th><td>1</td><td>2</td></tr><tr><th>b</th><td>3</td><td>-</td></tr><tr><th>y</th><th>a</th><td>4</td><td>-</td></tr></table>"#);
}

#[test]
fn shared_groups_merge_under_one_header() {
    let data = nested! {
        "a" { "men" { "adults" => 1; "minors" => 2; } }
        "b" { "men" { "adults" => 3; "elderly" => 4; } }
    };
    let html = build_table(&data, [Row, Column, Column]).unwrap().generate_html();
    assert_snapshot!(html, @r#"<table><tr><td rowspan="2"></td><th colspan="3">men</th></tr><tr><th>adults</th><th>minors</th><th>elderly</th></tr><tr><th>a</th><td>1</td><td>2</td><td>-</td></tr><tr><th>b</th><td>3</td><td>-</td><td>4</td></tr></table>"#);
}

#[test]
fn rendering_is_deterministic() {
    for structure in [[Row, Row], [Row, Column], [Column, Row], [Column, Column]] {
        let first = build_table(&level_2(), structure).unwrap().generate_html();
        let second = build_table(&level_2(), structure).unwrap().generate_html();
        assert_eq!(first, second);
    }
}
