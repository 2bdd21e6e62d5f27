//! Browser tests for the exported functions. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use site_tint::{parse_query_json, rewrite_url};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_parse_query_json_in_browser() {
    assert_eq!(parse_query_json("a[0]=x&a[1]=y"), r#"{"a":["x","y"]}"#);
}

#[wasm_bindgen_test]
fn test_rewrite_url_in_browser() {
    let rewritten = rewrite_url(
        "https://www.booking.com/searchresults.html?ss=Budapest&checkin_year=2017&checkin_month=11\
         &checkin_monthday=28&checkout_year=2017&checkout_month=11&checkout_monthday=30",
    );

    assert!(rewritten.contains("destination=budapest&startDate=11/28/2017&endDate=11/30/2017"));
    assert_eq!(rewrite_url("https://www.expedia.com/"), "");
}
