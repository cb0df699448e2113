//! Result-code vocabulary and per-event stat flags.

use std::fmt;

/// Closed set of result codes a scorer can enter. Anything else is kept as
/// `Unknown` and contributes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultCode {
    /// `O3`
    MadeThree,
    /// `O3F`, made three with a foul
    MadeThreeFouled,
    /// `O2`
    MadeTwo,
    /// `O2F`
    MadeTwoFouled,
    /// `X2`
    MissedTwo,
    /// `X3`
    MissedThree,
    /// `X2F`, missed two with a foul
    MissedTwoFouled,
    /// `X3F`
    MissedThreeFouled,
    /// `TO`
    Turnover,
    /// `FT - MK`
    FreeThrowMade,
    /// `FT - MI`
    FreeThrowMissed,
    /// `GT Off Reb`
    OwnOffensiveRebound,
    /// `Opp Off Reb`
    OpponentOffensiveRebound,
    Unknown(String),
}

impl ResultCode {
    pub fn parse(raw: &str) -> ResultCode {
        match raw.trim() {
            "O3" => ResultCode::MadeThree,
            "O3F" => ResultCode::MadeThreeFouled,
            "O2" => ResultCode::MadeTwo,
            "O2F" => ResultCode::MadeTwoFouled,
            "X2" => ResultCode::MissedTwo,
            "X3" => ResultCode::MissedThree,
            "X2F" => ResultCode::MissedTwoFouled,
            "X3F" => ResultCode::MissedThreeFouled,
            "TO" => ResultCode::Turnover,
            "FT - MK" => ResultCode::FreeThrowMade,
            "FT - MI" => ResultCode::FreeThrowMissed,
            "GT Off Reb" => ResultCode::OwnOffensiveRebound,
            "Opp Off Reb" => ResultCode::OpponentOffensiveRebound,
            other => ResultCode::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            ResultCode::MadeThree => "O3",
            ResultCode::MadeThreeFouled => "O3F",
            ResultCode::MadeTwo => "O2",
            ResultCode::MadeTwoFouled => "O2F",
            ResultCode::MissedTwo => "X2",
            ResultCode::MissedThree => "X3",
            ResultCode::MissedTwoFouled => "X2F",
            ResultCode::MissedThreeFouled => "X3F",
            ResultCode::Turnover => "TO",
            ResultCode::FreeThrowMade => "FT - MK",
            ResultCode::FreeThrowMissed => "FT - MI",
            ResultCode::OwnOffensiveRebound => "GT Off Reb",
            ResultCode::OpponentOffensiveRebound => "Opp Off Reb",
            ResultCode::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ResultCode::Unknown(_))
    }

    /// Derive the stat flags for this code. Context-free: the neighbouring
    /// events never matter.
    pub fn flags(&self) -> EventFlags {
        use ResultCode::*;

        let bit = |hit: bool| u32::from(hit);
        EventFlags {
            points: match self {
                MadeThree | MadeThreeFouled => 3,
                MadeTwo | MadeTwoFouled => 2,
                FreeThrowMade => 1,
                _ => 0,
            },
            // Fouled makes continue to the line, so they do not end the trip.
            shots: bit(matches!(
                self,
                MadeTwo
                    | MadeThree
                    | MissedTwo
                    | MissedThree
                    | MissedThreeFouled
                    | MissedTwoFouled
                    | Turnover
            )),
            fg_made: bit(matches!(
                self,
                MadeTwo | MadeThree | MadeTwoFouled | MadeThreeFouled
            )),
            fg_attempted: bit(matches!(
                self,
                MadeTwo | MadeThree | MissedTwo | MissedThree | MadeTwoFouled | MadeThreeFouled
            )),
            three_made: bit(matches!(self, MadeThree | MadeThreeFouled)),
            three_attempted: bit(matches!(self, MadeThree | MissedThree | MadeThreeFouled)),
            ft_made: bit(matches!(self, FreeThrowMade)),
            ft_attempted: bit(matches!(self, FreeThrowMade | FreeThrowMissed)),
            turnovers: bit(matches!(self, Turnover)),
            own_off_rebounds: bit(matches!(self, OwnOffensiveRebound)),
            opp_off_rebounds: bit(matches!(self, OpponentOffensiveRebound)),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Stat contributions of a single event. Each field is 0 or 1 except
/// `points`, which carries the point value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFlags {
    pub points: u32,
    pub shots: u32,
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub three_made: u32,
    pub three_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
    pub turnovers: u32,
    pub own_off_rebounds: u32,
    pub opp_off_rebounds: u32,
}

pub fn classify(raw: &str) -> EventFlags {
    ResultCode::parse(raw).flags()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOCABULARY: [&str; 13] = [
        "O3", "O3F", "O2", "O2F", "X2", "X3", "X2F", "X3F", "TO", "FT - MK", "FT - MI",
        "GT Off Reb", "Opp Off Reb",
    ];

    #[test]
    fn test_points_and_shots_sequence() {
        let codes = ["O3", "O2", "TO", "FT - MK", "X2"];
        let flags: Vec<EventFlags> = codes.iter().map(|c| classify(c)).collect();
        let points: Vec<u32> = flags.iter().map(|f| f.points).collect();
        let shots: Vec<u32> = flags.iter().map(|f| f.shots).collect();
        assert_eq!(points, vec![3, 2, 0, 1, 0]);
        assert_eq!(shots, vec![1, 1, 1, 0, 1]);
        assert_eq!(points.iter().sum::<u32>(), 6);
        assert_eq!(shots.iter().sum::<u32>(), 4);
    }

    #[test]
    fn test_vocabulary_round_trips_through_code() {
        for raw in VOCABULARY {
            let code = ResultCode::parse(raw);
            assert!(code.is_known(), "{raw} should be known");
            assert_eq!(code.code(), raw);
        }
    }

    #[test]
    fn test_fouled_makes() {
        let f = classify("O3F");
        assert_eq!(f.points, 3);
        assert_eq!(f.shots, 0);
        assert_eq!((f.fg_made, f.fg_attempted), (1, 1));
        assert_eq!((f.three_made, f.three_attempted), (1, 1));

        let f = classify("O2F");
        assert_eq!(f.points, 2);
        assert_eq!(f.shots, 0);
        assert_eq!((f.fg_made, f.fg_attempted), (1, 1));
        assert_eq!(f.three_attempted, 0);
    }

    #[test]
    fn test_fouled_misses_are_shots_but_not_attempts() {
        for raw in ["X2F", "X3F"] {
            let f = classify(raw);
            assert_eq!(f.shots, 1, "{raw}");
            assert_eq!(f.fg_attempted, 0, "{raw}");
            assert_eq!(f.three_attempted, 0, "{raw}");
        }
    }

    #[test]
    fn test_missed_three_is_a_three_attempt() {
        let f = classify("X3");
        assert_eq!(f.points, 0);
        assert_eq!((f.fg_made, f.fg_attempted), (0, 1));
        assert_eq!((f.three_made, f.three_attempted), (0, 1));
    }

    #[test]
    fn test_free_throws() {
        let made = classify("FT - MK");
        assert_eq!((made.points, made.ft_made, made.ft_attempted), (1, 1, 1));
        let missed = classify("FT - MI");
        assert_eq!((missed.points, missed.ft_made, missed.ft_attempted), (0, 0, 1));
        assert_eq!(missed.shots, 0);
    }

    #[test]
    fn test_turnover_and_rebounds() {
        let to = classify("TO");
        assert_eq!((to.turnovers, to.shots, to.fg_attempted), (1, 1, 0));
        assert_eq!(classify("GT Off Reb").own_off_rebounds, 1);
        assert_eq!(classify("GT Off Reb").opp_off_rebounds, 0);
        assert_eq!(classify("Opp Off Reb").opp_off_rebounds, 1);
        assert_eq!(classify("Opp Off Reb").shots, 0);
    }

    #[test]
    fn test_unknown_codes_are_all_zero() {
        for raw in ["", "o3", "Foul", "FT-MK", "DEF REB"] {
            let code = ResultCode::parse(raw);
            assert!(!code.is_known());
            assert_eq!(code.flags(), EventFlags::default(), "{raw:?}");
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(ResultCode::parse(" O2 "), ResultCode::MadeTwo);
        assert_eq!(ResultCode::parse("FT - MK\t"), ResultCode::FreeThrowMade);
    }
}
