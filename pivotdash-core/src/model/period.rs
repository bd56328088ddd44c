use std::cmp::Ordering;
use std::collections::HashMap;

/// Order of periods on the time axis.
///
/// Periods declared by the payload keep their declared position. Anything
/// else sorts after them, numerically when both labels are numbers and
/// by string otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodOrder {
    rank: HashMap<String, usize>,
}

impl PeriodOrder {
    pub fn new(periods: &[String]) -> Self {
        let mut rank = HashMap::with_capacity(periods.len());
        for (i, period) in periods.iter().enumerate() {
            rank.entry(period.clone()).or_insert(i);
        }
        Self { rank }
    }

    /// Order without a declared axis
    pub fn natural() -> Self {
        Self::default()
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank.get(a), self.rank.get(b)) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => natural_cmp(a, b),
        }
    }
}

/// Numeric comparison when both labels parse as numbers, string otherwise.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_declared_order_wins_over_string_order() {
        let order = PeriodOrder::new(&labels(&["Jan", "Feb", "Mar"]));
        assert_eq!(order.compare("Jan", "Feb"), Ordering::Less);
        assert_eq!(order.compare("Mar", "Feb"), Ordering::Greater);
    }

    #[test]
    fn test_undeclared_periods_sort_last() {
        let order = PeriodOrder::new(&labels(&["9", "10"]));
        assert_eq!(order.compare("10", "2"), Ordering::Less);
        assert_eq!(order.compare("11", "9"), Ordering::Greater);
    }

    #[test]
    fn test_natural_cmp_numbers() {
        assert_eq!(natural_cmp("9", "10"), Ordering::Less);
        assert_eq!(natural_cmp("2023-Q2", "2023-Q10"), Ordering::Greater);
        assert_eq!(natural_cmp("1.5", "1.25"), Ordering::Greater);
    }
}
