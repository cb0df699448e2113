//! Rate stats derived from lineup totals.
//!
//! A rate with a zero denominator is `None` ("no data"), never `0.0`: a
//! lineup that took no threes did not shoot 0% from three.

use super::aggregate::LineupAggregate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineupMetrics {
    pub possessions: u32,
    /// Points per shot.
    pub ppp: Option<f64>,
    pub fg_pct: Option<f64>,
    pub three_pct: Option<f64>,
    pub ft_pct: Option<f64>,
    pub turnover_pct: Option<f64>,
    pub off_reb_pct: Option<f64>,
}

/// `num / den` rounded to 3 decimals.
pub fn ratio(num: u32, den: u32) -> Option<f64> {
    if den == 0 {
        return None;
    }
    Some((num as f64 / den as f64 * 1000.0).round() / 1000.0)
}

/// `num / den` rounded to 3 decimals, as a percentage (0.333 -> 33.3).
pub fn percentage(num: u32, den: u32) -> Option<f64> {
    if den == 0 {
        return None;
    }
    Some((num as f64 / den as f64 * 1000.0).round() / 10.0)
}

impl LineupMetrics {
    pub fn compute(agg: &LineupAggregate) -> Self {
        let t = &agg.totals;
        let possessions = agg.possessions();
        Self {
            possessions,
            ppp: ratio(t.points, t.shots),
            fg_pct: percentage(t.fg_made, t.fg_attempted),
            three_pct: percentage(t.three_made, t.three_attempted),
            ft_pct: percentage(t.ft_made, t.ft_attempted),
            turnover_pct: percentage(t.turnovers, possessions),
            off_reb_pct: percentage(agg.off_rebounds(), possessions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::Role;
    use crate::stats::aggregate::LineupTotals;

    fn agg(role: Role, totals: LineupTotals) -> LineupAggregate {
        LineupAggregate {
            lineup: None,
            role,
            events: 0,
            totals,
        }
    }

    #[test]
    fn test_zero_denominators_are_undefined() {
        let m = LineupMetrics::compute(&agg(Role::Offense, LineupTotals::default()));
        assert_eq!(m.possessions, 0);
        assert!(m.ppp.is_none());
        assert!(m.fg_pct.is_none());
        assert!(m.three_pct.is_none());
        assert!(m.ft_pct.is_none());
        assert!(m.turnover_pct.is_none());
        assert!(m.off_reb_pct.is_none());
    }

    #[test]
    fn test_no_threes_is_not_zero_percent() {
        let totals = LineupTotals {
            points: 4,
            shots: 3,
            fg_made: 2,
            fg_attempted: 3,
            ..Default::default()
        };
        let m = LineupMetrics::compute(&agg(Role::Offense, totals));
        assert_eq!(m.fg_pct, Some(66.7));
        assert_eq!(m.three_pct, None);
    }

    #[test]
    fn test_rates_round_to_three_places() {
        assert_eq!(ratio(1, 3), Some(0.333));
        assert_eq!(ratio(2, 3), Some(0.667));
        assert_eq!(percentage(1, 3), Some(33.3));
        assert_eq!(percentage(1, 8), Some(12.5));
        assert_eq!(percentage(0, 5), Some(0.0));
        assert_eq!(ratio(5, 0), None);
    }

    #[test]
    fn test_full_offense_line() {
        let totals = LineupTotals {
            points: 12,
            shots: 10,
            fg_made: 4,
            fg_attempted: 8,
            three_made: 1,
            three_attempted: 4,
            ft_made: 2,
            ft_attempted: 3,
            turnovers: 2,
            own_off_rebounds: 2,
            opp_off_rebounds: 5,
        };
        let m = LineupMetrics::compute(&agg(Role::Offense, totals));
        assert_eq!(m.possessions, 8);
        assert_eq!(m.ppp, Some(1.2));
        assert_eq!(m.fg_pct, Some(50.0));
        assert_eq!(m.three_pct, Some(25.0));
        assert_eq!(m.ft_pct, Some(66.7));
        assert_eq!(m.turnover_pct, Some(25.0));
        assert_eq!(m.off_reb_pct, Some(25.0));
    }

    #[test]
    fn test_defense_uses_opponent_rebounds() {
        let totals = LineupTotals {
            shots: 10,
            own_off_rebounds: 1,
            opp_off_rebounds: 2,
            ..Default::default()
        };
        let m = LineupMetrics::compute(&agg(Role::Defense, totals));
        assert_eq!(m.possessions, 8);
        assert_eq!(m.off_reb_pct, Some(25.0));
    }
}
