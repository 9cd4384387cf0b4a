use crate::error::IndicatorError;

/// Сколько значений усредняет [`trailing_volume_average`]
pub const VOLUME_WINDOW: usize = 5;

/// Сколько последних значений не входит в базу (формирующийся бар и бар,
/// который с ней сравниваем)
pub const VOLUME_SKIP: usize = 2;

/// Среднее пяти объёмов `volumes[n-7 .. n-2]`
pub fn trailing_volume_average(volumes: &[f64]) -> Result<f64, IndicatorError> {
    let required = VOLUME_WINDOW + VOLUME_SKIP;
    let n = volumes.len();

    if n < required {
        return Err(IndicatorError::InsufficientData {
            indicator: "volume average",
            required,
            actual: n,
        });
    }

    let window = &volumes[n - required..n - VOLUME_SKIP];
    Ok(window.iter().sum::<f64>() / VOLUME_WINDOW as f64)
}
