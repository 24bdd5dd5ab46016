use sale_types::SaleError;

/// Amount of `total` vested at `now` on a linear schedule with a cliff
///
/// Nothing vests before `start + cliff`; everything has vested from
/// `start + duration`. A zero duration vests everything at the cliff.
pub fn vested_amount(
    total: i128,
    start: u64,
    cliff: u64,
    duration: u64,
    now: u64,
) -> Result<i128, SaleError> {
    if total < 0 {
        return Err(SaleError::InvalidAmount);
    }
    if now < start.saturating_add(cliff) {
        return Ok(0);
    }

    let elapsed = now - start;
    if elapsed >= duration {
        return Ok(total);
    }

    total
        .checked_mul(elapsed as i128)
        .map(|scaled| scaled / duration as i128)
        .ok_or(SaleError::Overflow)
}
