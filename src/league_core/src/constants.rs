/// Points awarded for a win
pub const POINTS_FOR_WIN: u32 = 3;

/// Points awarded for a draw
pub const POINTS_FOR_DRAW: u32 = 1;

/// Highest number of goals a side can score in a simulated match (inclusive)
pub const MAX_GOALS: u32 = 5;

/// Decimal places kept on a probability share
pub const SHARE_DECIMALS: i32 = 2;

/// Round a percentage to `SHARE_DECIMALS` places.
pub fn round_share(value: f64) -> f64 {
    let scale = 10f64.powi(SHARE_DECIMALS);
    (value * scale).round() / scale
}
