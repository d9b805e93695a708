pub fn format_number(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{}M", fixed_one(value / 1_000_000.0))
    } else if value >= 1_000.0 {
        format!("{}K", fixed_one(value / 1_000.0))
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

// Exact halves (x.25, x.75) round away from zero, everything else uses the
// nearest representable decimal.
fn fixed_one(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}", (value * 10.0).round() / 10.0);
    }
    format!("{:.1}", value)
}
