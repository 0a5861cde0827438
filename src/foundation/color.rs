//! Clear-color parsing.
//!
//! Accepts the CSS forms that show up in practice for a background fill: named colors,
//! hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()` and `hsl()`/`hsla()`.

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};

/// Parse a CSS-style color string into straight-alpha RGBA8.
pub fn parse_color(spec: &str) -> ReelResult<Rgba8> {
    let s = spec.trim().to_ascii_lowercase();
    if s.is_empty() {
        return Err(ReelError::validation("color must not be empty"));
    }

    let parsed = if let Some(hex) = s.strip_prefix('#') {
        parse_hex(hex)
    } else if let Some(args) = functional_args(&s, &["rgba", "rgb"]) {
        parse_rgb_args(args)
    } else if let Some(args) = functional_args(&s, &["hsla", "hsl"]) {
        parse_hsl_args(args)
    } else {
        named(&s).ok_or_else(|| "unknown color name".to_owned())
    };

    parsed.map_err(|e| ReelError::validation(format!("invalid color \"{spec}\": {e}")))
}

fn functional_args<'a>(s: &'a str, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        s.strip_prefix(name)?
            .trim_start()
            .strip_prefix('(')?
            .strip_suffix(')')
    })
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }

    let b = s.as_bytes();
    let digits = b.iter().map(|&c| nibble(c)).collect::<Result<Vec<_>, _>>()?;
    let c = match digits.len() {
        3 | 4 => {
            let a = digits.get(3).map_or(255, |&d| d * 17);
            Rgba8::new(digits[0] * 17, digits[1] * 17, digits[2] * 17, a)
        }
        6 | 8 => {
            let byte = |i: usize| digits[i] * 16 + digits[i + 1];
            let a = if digits.len() == 8 { byte(6) } else { 255 };
            Rgba8::new(byte(0), byte(2), byte(4), a)
        }
        _ => return Err("hex color must have 3, 4, 6 or 8 digits".to_owned()),
    };
    Ok(c)
}

fn split_args(args: &str) -> Vec<&str> {
    args.split([',', ' ', '/'])
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect()
}

fn parse_alpha(arg: Option<&&str>) -> Result<u8, String> {
    let Some(arg) = arg else {
        return Ok(255);
    };
    let a = if let Some(pct) = arg.strip_suffix('%') {
        parse_number(pct)? / 100.0
    } else {
        parse_number(arg)?
    };
    Ok(unit_to_u8(a))
}

fn parse_number(s: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("invalid number \"{s}\""))?;
    if !v.is_finite() {
        return Err(format!("invalid number \"{s}\""));
    }
    Ok(v)
}

fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_rgb_args(args: &str) -> Result<Rgba8, String> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err("rgb() takes 3 or 4 arguments".to_owned());
    }
    let channel = |s: &str| -> Result<u8, String> {
        if let Some(pct) = s.strip_suffix('%') {
            Ok(unit_to_u8(parse_number(pct)? / 100.0))
        } else {
            Ok(parse_number(s)?.clamp(0.0, 255.0).round() as u8)
        }
    };
    Ok(Rgba8::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        parse_alpha(parts.get(3))?,
    ))
}

fn parse_hsl_args(args: &str) -> Result<Rgba8, String> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err("hsl() takes 3 or 4 arguments".to_owned());
    }
    let h = parse_number(parts[0].trim_end_matches("deg"))?;
    let pct = |s: &str| -> Result<f64, String> {
        let v = s
            .strip_suffix('%')
            .ok_or_else(|| format!("expected percentage, got \"{s}\""))?;
        Ok(parse_number(v)? / 100.0)
    };
    let (r, g, b) = hsl_to_rgb(h, pct(parts[1])?, pct(parts[2])?);
    Ok(Rgba8::new(
        unit_to_u8(r),
        unit_to_u8(g),
        unit_to_u8(b),
        parse_alpha(parts.get(3))?,
    ))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return (l, l, l);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn named(name: &str) -> Option<Rgba8> {
    let c = match name {
        "transparent" => Rgba8::TRANSPARENT,
        "black" => Rgba8::BLACK,
        "white" => Rgba8::WHITE,
        "red" => Rgba8::rgb(255, 0, 0),
        "lime" => Rgba8::rgb(0, 255, 0),
        "green" => Rgba8::rgb(0, 128, 0),
        "blue" => Rgba8::rgb(0, 0, 255),
        "yellow" => Rgba8::rgb(255, 255, 0),
        "cyan" | "aqua" => Rgba8::rgb(0, 255, 255),
        "magenta" | "fuchsia" => Rgba8::rgb(255, 0, 255),
        "silver" => Rgba8::rgb(192, 192, 192),
        "gray" | "grey" => Rgba8::rgb(128, 128, 128),
        "darkgray" | "darkgrey" => Rgba8::rgb(169, 169, 169),
        "lightgray" | "lightgrey" => Rgba8::rgb(211, 211, 211),
        "maroon" => Rgba8::rgb(128, 0, 0),
        "olive" => Rgba8::rgb(128, 128, 0),
        "navy" => Rgba8::rgb(0, 0, 128),
        "purple" => Rgba8::rgb(128, 0, 128),
        "teal" => Rgba8::rgb(0, 128, 128),
        "orange" => Rgba8::rgb(255, 165, 0),
        "pink" => Rgba8::rgb(255, 192, 203),
        "brown" => Rgba8::rgb(165, 42, 42),
        "gold" => Rgba8::rgb(255, 215, 0),
        "indigo" => Rgba8::rgb(75, 0, 130),
        "violet" => Rgba8::rgb(238, 130, 238),
        "coral" => Rgba8::rgb(255, 127, 80),
        "salmon" => Rgba8::rgb(250, 128, 114),
        "tomato" => Rgba8::rgb(255, 99, 71),
        "crimson" => Rgba8::rgb(220, 20, 60),
        "skyblue" => Rgba8::rgb(135, 206, 235),
        "steelblue" => Rgba8::rgb(70, 130, 180),
        "rebeccapurple" => Rgba8::rgb(102, 51, 153),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
