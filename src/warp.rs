#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Discrete time-warp multipliers.
///
/// Warp never changes the tick rate, only how far along the precomputed
/// trajectory each tick moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WarpLevel {
    #[default]
    RealTime,
    X5,
    X10,
    X50,
    X100,
    X500,
    X1000,
    X10000,
    X100000,
}

impl WarpLevel {
    pub const ALL: [WarpLevel; 9] = [
        WarpLevel::RealTime,
        WarpLevel::X5,
        WarpLevel::X10,
        WarpLevel::X50,
        WarpLevel::X100,
        WarpLevel::X500,
        WarpLevel::X1000,
        WarpLevel::X10000,
        WarpLevel::X100000,
    ];

    pub fn multiplier(self) -> u32 {
        match self {
            WarpLevel::RealTime => 1,
            WarpLevel::X5 => 5,
            WarpLevel::X10 => 10,
            WarpLevel::X50 => 50,
            WarpLevel::X100 => 100,
            WarpLevel::X500 => 500,
            WarpLevel::X1000 => 1_000,
            WarpLevel::X10000 => 10_000,
            WarpLevel::X100000 => 100_000,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Next faster level, saturating at the top.
    pub fn up(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Next slower level, saturating at real time.
    pub fn down(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    /// Burns are sampled per tick, which is only meaningful at real time.
    pub fn allows_burns(self) -> bool {
        self == WarpLevel::RealTime
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(WarpLevel::RealTime, WarpLevel::X5)]
    #[test_case(WarpLevel::X10000, WarpLevel::X100000)]
    #[test_case(WarpLevel::X100000, WarpLevel::X100000 ; "saturates at the top")]
    fn up(from: WarpLevel, expected: WarpLevel) {
        assert_eq!(from.up(), expected);
    }

    #[test_case(WarpLevel::X5, WarpLevel::RealTime)]
    #[test_case(WarpLevel::RealTime, WarpLevel::RealTime ; "saturates at real time")]
    fn down(from: WarpLevel, expected: WarpLevel) {
        assert_eq!(from.down(), expected);
    }

    #[test]
    fn multipliers_increase() {
        let multipliers: Vec<_> = WarpLevel::ALL.iter().map(|w| w.multiplier()).collect();

        assert!(multipliers.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(multipliers[0], 1);
    }

    #[test]
    fn only_real_time_allows_burns() {
        assert!(WarpLevel::RealTime.allows_burns());
        assert!(WarpLevel::ALL[1..].iter().all(|w| !w.allows_burns()));
    }
}
