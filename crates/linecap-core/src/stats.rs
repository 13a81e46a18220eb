//! 集中度統計

/// Herfindahl-Hirschman 指數：Σ(占比)²
///
/// 總量為 0（或負值）時回傳 0。接近 0 表示機種組合分散，接近 1 表示由單一機種主導。
pub fn herfindahl_index<I>(quantities: I) -> f64
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let iter = quantities.into_iter();
    let total: f64 = iter.clone().sum();
    if total <= 0.0 {
        return 0.0;
    }

    iter.map(|q| {
        let share = q / total;
        share * share
    })
    .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![100.0], 1.0)]
    #[case(vec![50.0, 50.0], 0.5)]
    #[case(vec![25.0, 25.0, 25.0, 25.0], 0.25)]
    #[case(vec![], 0.0)]
    #[case(vec![0.0, 0.0], 0.0)]
    fn test_hhi(#[case] quantities: Vec<f64>, #[case] expected: f64) {
        assert!((herfindahl_index(quantities) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_hhi_bounds() {
        let quantities = vec![10.0, 30.0, 60.0];
        let hhi = herfindahl_index(quantities.iter().copied());
        assert!(hhi >= 1.0 / 3.0 && hhi <= 1.0);
        // 0.01 + 0.09 + 0.36
        assert!((hhi - 0.46).abs() < 1e-12);
    }
}
