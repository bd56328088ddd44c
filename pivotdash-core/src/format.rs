use serde::{Deserialize, Serialize};

/// Number display settings for matrix cells, detail tables and chart labels.
///
/// Defaults follow the Spanish convention the dashboards were built for:
/// `.` groups thousands, `,` separates decimals, no decimals shown, and
/// four-digit numbers stay ungrouped (`1000`, but `10.000`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub decimals: usize,
    pub decimal_separator: String,
    pub group_separator: String,
    /// Digits required in front of the first separator before grouping starts
    pub min_grouping_digits: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimals: 0,
            decimal_separator: ",".to_string(),
            group_separator: ".".to_string(),
            min_grouping_digits: 2,
        }
    }
}

impl NumberFormat {
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn format(&self, value: f64) -> String {
        self.render(value, self.decimals)
    }

    /// Percentage with one decimal, e.g. `62,5%`.
    pub fn format_percent(&self, value: f64) -> String {
        format!("{}%", self.render(value, 1))
    }

    fn render(&self, value: f64, decimals: usize) -> String {
        render(
            value,
            decimals,
            &self.decimal_separator,
            &self.group_separator,
            self.min_grouping_digits,
        )
    }
}

/// Format a number with thousands separators and a fixed number of decimals.
/// Every number of four digits or more is grouped.
pub fn format_number(
    value: f64,
    decimals: usize,
    decimal_separator: &str,
    group_separator: &str,
) -> String {
    render(value, decimals, decimal_separator, group_separator, 1)
}

fn render(
    value: f64,
    decimals: usize,
    decimal_separator: &str,
    group_separator: &str,
    min_grouping_digits: usize,
) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    // Round once on the scaled value so 9.999 with 2 decimals carries to 10,00
    let factor = 10_f64.powi(decimals as i32);
    let scaled = (value.abs() * factor).round();
    let integer_part = (scaled / factor).trunc();
    let fraction_part = (scaled - integer_part * factor).round() as u64;

    let integer_str = format!("{:.0}", integer_part);
    let group = integer_str.len() >= 3 + min_grouping_digits.max(1);
    let mut grouped = String::with_capacity(integer_str.len() + integer_str.len() / 3);
    for (i, c) in integer_str.chars().enumerate() {
        if group && i > 0 && (integer_str.len() - i) % 3 == 0 {
            grouped.push_str(group_separator);
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && scaled != 0.0 { "-" } else { "" };

    if decimals > 0 {
        format!(
            "{sign}{grouped}{decimal_separator}{fraction_part:0width$}",
            width = decimals
        )
    } else {
        format!("{sign}{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_groups_thousands() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.format(1234567.0), "1.234.567");
        assert_eq!(fmt.format(999.0), "999");
        assert_eq!(fmt.format(0.0), "0");
    }

    #[test]
    fn test_negative_values() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.format(-15000.0), "-15.000");
        // Rounds to zero, so no sign
        assert_eq!(fmt.format(-0.2), "0");
    }

    #[test]
    fn test_decimals_and_rounding_carry() {
        let fmt = NumberFormat::default().with_decimals(2);
        assert_eq!(fmt.format(12345.5), "12.345,50");
        assert_eq!(fmt.format(9.999), "10,00");
    }

    #[test]
    fn test_four_digits_stay_ungrouped_by_default() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.format(1000.0), "1000");
        assert_eq!(fmt.format(-9999.0), "-9999");
        assert_eq!(fmt.format(10000.0), "10.000");
        assert_eq!(fmt.with_decimals(2).format(1234.5), "1234,50");
    }

    #[test]
    fn test_min_grouping_of_one_groups_thousands() {
        let fmt = NumberFormat {
            min_grouping_digits: 1,
            ..Default::default()
        };
        assert_eq!(fmt.format(1000.0), "1.000");
    }

    #[test]
    fn test_custom_separators() {
        assert_eq!(format_number(1234.5, 1, ".", ","), "1,234.5");
    }

    #[test]
    fn test_percent() {
        assert_eq!(NumberFormat::default().format_percent(62.5), "62,5%");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(NumberFormat::default().format(f64::NAN), "-");
    }
}
