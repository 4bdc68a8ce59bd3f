use super::*;

#[test]
fn parse_hex_rgb_supports_short_and_long_forms() {
    assert_eq!(parse_hex_rgb("#ABC"), Some((170, 187, 204)));
    assert_eq!(parse_hex_rgb("  #ffFF88 "), Some((255, 255, 136)));
}

#[test]
fn parse_hex_rgb_rejects_invalid_inputs() {
    assert_eq!(parse_hex_rgb("ffff88"), None);
    assert_eq!(parse_hex_rgb("#12"), None);
    assert_eq!(parse_hex_rgb("#abcd"), None);
    assert_eq!(parse_hex_rgb("#12GG34"), None);
    assert_eq!(parse_hex_rgb("#ééé"), None);
}

#[test]
fn parse_rgb_function_reads_rgb_and_rgba() {
    assert_eq!(parse_rgb_function("rgb(255, 255, 136)"), Some((255, 255, 136)));
    assert_eq!(parse_rgb_function("RGB(0,128,255)"), Some((0, 128, 255)));
    assert_eq!(parse_rgb_function("rgba(1, 2, 3, 0.5)"), Some((1, 2, 3)));
}

#[test]
fn parse_rgb_function_rejects_malformed() {
    assert_eq!(parse_rgb_function("rgb(256, 0, 0)"), None);
    assert_eq!(parse_rgb_function("rgb(1, 2)"), None);
    assert_eq!(parse_rgb_function("rgb(1, 2, 3"), None);
    assert_eq!(parse_rgb_function("rgba(1, 2, 3, x)"), None);
    assert_eq!(parse_rgb_function("hsl(1, 2%, 3%)"), None);
}

#[test]
fn css_color_to_hex_converts_computed_background() {
    assert_eq!(css_color_to_hex("rgb(255, 255, 136)").as_deref(), Some("#ffff88"));
}

#[test]
fn css_color_to_hex_round_trips_its_own_output() {
    let hex = css_color_to_hex("rgb(255, 255, 136)").unwrap();
    assert_eq!(css_color_to_hex(&hex), Some(hex));
}

#[test]
fn normalize_hex_color_uses_canonical_lowercase() {
    assert_eq!(normalize_hex_color("#ABC", "#000000"), "#aabbcc");
    assert_eq!(normalize_hex_color("rgb(122, 252, 255)", "#000000"), "#7afcff");
}

#[test]
fn normalize_hex_color_falls_back_to_input_fallback_or_default() {
    assert_eq!(normalize_hex_color("blue", "#ff0000"), "#ff0000");
    assert_eq!(normalize_hex_color("blue", "invalid"), "#ffff88");
}
