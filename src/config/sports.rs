/// Sport the default run reports on
pub const DEFAULT_SPORT: &str = "swimming";

/// Sports whose results are recorded as times, as they appear in the
/// results URL: `{base}/{games}/olympic-games/en/results/{sport}/...`
pub fn timed_sports() -> Vec<&'static str> {
    vec![
        "swimming",
        "canoe-sprint",
        "marathon-swimming",
        "triathlon",
        "modern-pentathlon",
        "athletics",
        "cycling-mountain-bike",
        "cycling-road",
        "cycling-bmx-racing",
        "canoe-slalom",
        "rowing",
        "sailing",
    ]
}

pub fn is_timed_sport(sport: &str) -> bool {
    timed_sports().contains(&sport)
}
