use super::*;

#[test]
fn parses_named_colors() {
    assert_eq!(parse_color("white").unwrap(), Rgba8::WHITE);
    assert_eq!(parse_color("Black").unwrap(), Rgba8::BLACK);
    assert_eq!(parse_color(" red ").unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(parse_color("green").unwrap(), Rgba8::rgb(0, 128, 0));
    assert_eq!(parse_color("transparent").unwrap(), Rgba8::TRANSPARENT);
}

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_color("#f00").unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(parse_color("#0f08").unwrap(), Rgba8::new(0, 255, 0, 136));
    assert_eq!(parse_color("#336699").unwrap(), Rgba8::rgb(0x33, 0x66, 0x99));
    assert_eq!(parse_color("#0000ff80").unwrap(), Rgba8::new(0, 0, 255, 128));
    assert!(parse_color("#12345").is_err());
    assert!(parse_color("#zzzzzz").is_err());
}

#[test]
fn parses_functional_forms() {
    assert_eq!(parse_color("rgb( 0, 255, 0 )").unwrap(), Rgba8::rgb(0, 255, 0));
    assert_eq!(
        parse_color("rgba(10, 20, 30, 0.5)").unwrap(),
        Rgba8::new(10, 20, 30, 128)
    );
    assert_eq!(parse_color("rgb(100% 0% 0%)").unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(parse_color("hsl(0, 100%, 50%)").unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(
        parse_color("hsla(240deg 100% 50% / 50%)").unwrap(),
        Rgba8::new(0, 0, 255, 128)
    );
}

#[test]
fn rejects_unknown_and_empty() {
    let err = parse_color("not-a-color").unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert!(err.to_string().contains("not-a-color"));
    assert!(parse_color("").is_err());
    assert!(parse_color("rgb(1, 2)").is_err());
    assert!(parse_color("hsl(0, 1, 1)").is_err());
}
