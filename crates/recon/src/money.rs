//! Fixed-point money. Prices are integer cents everywhere in the engine;
//! floating point never enters a sum.

/// Parse a price spelling into cents.
///
/// Accepts the spellings storefronts and exported CSVs actually use:
/// optional `$`, thousands commas, surrounding whitespace, parenthesized or
/// leading-minus negatives, bare integers, and fraction digits. Fractions
/// past two digits round half-up at the cent. Returns `None` for anything
/// non-numeric.
pub fn parse_price(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Parenthesized negatives: (123.45) → -123.45
    let (paren_negative, inner) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
        (true, &trimmed[1..trimmed.len() - 1])
    } else {
        (false, trimmed)
    };

    // Strip allowed non-numeric characters: $, commas, whitespace
    let cleaned: String = inner
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let mut negative = paren_negative;
    let rest = match cleaned.as_bytes()[0] {
        b'-' if !paren_negative => {
            negative = true;
            &cleaned[1..]
        }
        b'+' if !paren_negative => &cleaned[1..],
        _ => cleaned.as_str(),
    };

    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, fr)) => (i, fr),
        None => (rest, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    // A second '.' ends up inside frac_part and fails the digit check.
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let whole: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };

    let digits: Vec<i64> = frac_part
        .bytes()
        .map(|b| i64::from(b - b'0'))
        .collect();
    let frac_cents = match digits.len() {
        0 => 0,
        1 => digits[0] * 10,
        _ => {
            let base = digits[0] * 10 + digits[1];
            // Third digit decides half-up rounding: remainder >= 0.005 iff it is >= 5
            if digits[2] >= 5 {
                base + 1
            } else {
                base
            }
        }
    };

    let cents = whole.checked_mul(100)?.checked_add(frac_cents)?;
    Some(if negative { -cents } else { cents })
}

/// Render cents as `-?\d+\.\d\d` for reports and summaries.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
