use crate::decimal::Money;
use crate::snapshot::Division;

/// expected weekly dues for one team in a division
///
/// `dues_per_player_per_match * players_per_week`, doubled for double-play
/// divisions. Pure and total: defaulted fields decay the product to zero, so
/// the result never errs and never overstates.
pub fn expected_weekly_dues(division: &Division) -> Money {
    let base = division
        .dues_per_player_per_match
        .times(division.players_per_week);
    if division.is_double_play {
        base.times(2)
    } else {
        base
    }
}
