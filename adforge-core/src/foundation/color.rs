/// Parse a `#RRGGBB` hex color, returning `None` when malformed.
pub fn parse_hex_rgb(value: &str) -> Option<[u8; 3]> {
    let trimmed = value.trim().trim_start_matches('#');
    if trimmed.len() != 6 {
        return None;
    }
    let bytes = hex::decode(trimmed).ok()?;
    Some([bytes[0], bytes[1], bytes[2]])
}

/// Parse a `#RRGGBB` hex color, falling back to white when malformed.
pub fn hex_rgb_or_white(value: &str) -> [u8; 3] {
    parse_hex_rgb(value).unwrap_or([255, 255, 255])
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
