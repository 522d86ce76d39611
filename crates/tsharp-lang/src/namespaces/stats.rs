use crate::error::{Arity, RunError};
use crate::Value;
use super::{Export, NamespaceInfo, NamespaceProvider, RuntimeState, as_numbers, f, finite};

pub struct StatsNamespace;

impl NamespaceInfo for StatsNamespace {
    fn name(&self) -> &'static str { "stats" }

    fn exports(&self) -> Vec<Export> {
        ["mean", "median", "mode", "variance", "stddev"]
            .into_iter()
            .map(|name| f(name, Arity::AtLeast(1)))
            .collect()
    }
}

impl NamespaceProvider for StatsNamespace {
    fn call(
        &self,
        name: &str,
        args: &[Value],
        _state: &mut RuntimeState,
        line: usize,
    ) -> Result<Option<Value>, RunError> {
        let data = as_numbers(args, name, line)?;
        let v = match name {
            "mean"     => mean(&data),
            "median"   => median(&data),
            "mode"     => mode(&data),
            "variance" => variance(&data),
            "stddev"   => variance(&data).sqrt(),
            _ => return Ok(None),
        };
        finite(v, name, line).map(Some)
    }
}

fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

fn median(data: &[f64]) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Most frequent value; ties go to the one seen first.
fn mode(data: &[f64]) -> f64 {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &x in data {
        match counts.iter_mut().find(|(v, _)| *v == x) {
            Some((_, n)) => *n += 1,
            None => counts.push((x, 1)),
        }
    }
    let mut best = counts[0];
    for &(v, n) in &counts[1..] {
        if n > best.1 { best = (v, n); }
    }
    best.0
}

/// Population variance.
fn variance(data: &[f64]) -> f64 {
    let m = mean(data);
    data.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64
}

#[cfg(test)]
mod tests {
    use super::super::test_support::num;

    #[test]
    fn central_tendency() {
        assert_eq!(num("mean", &[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(num("median", &[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(num("median", &[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(num("mode", &[1.0, 2.0, 2.0, 3.0]), 2.0);
        assert_eq!(num("mode", &[5.0, 7.0]), 5.0);
    }

    #[test]
    fn spread() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(num("variance", &data), 4.0);
        assert_eq!(num("stddev", &data), 2.0);
        assert_eq!(num("variance", &[3.0]), 0.0);
    }

    #[test]
    fn overflowing_sums_fail() {
        use super::super::test_support::err_name;
        assert_eq!(err_name("mean", &[1e308, 1e308]), "MathDomainError");
        assert_eq!(err_name("variance", &[-1e200, 1e200]), "MathDomainError");
    }

    #[test]
    fn needs_at_least_one_value() {
        let err = super::super::test_support::call("mean", &[]).unwrap_err();
        assert_eq!(err.message(), "`mean` expects at least 1 argument(s), got 0");
    }
}
