use crate::error::CurveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanAtTemp {
    pub temp_c: i32,
    pub fan_pct: u32,
}

/// Step curve: no interpolation between points
#[derive(Debug, Clone)]
pub struct FanCurve {
    points: Vec<FanAtTemp>,
}

impl FanCurve {
    pub fn new(points: &[FanAtTemp]) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints);
        }

        for (index, p) in points.iter().enumerate() {
            if p.fan_pct > 100 {
                return Err(CurveError::SpeedOutOfRange {
                    index,
                    fan_pct: p.fan_pct,
                });
            }
            if index > 0 && p.temp_c <= points[index - 1].temp_c {
                return Err(CurveError::NotIncreasing { index });
            }
        }

        Ok(Self {
            points: points.to_vec(),
        })
    }
}

/* FAN CURVE */
/// Temperatures below the first point clamp to its speed, the first threshold is never compared
pub fn tmp_to_fan(curve: &FanCurve, cur_temp: i32) -> u32 {
    curve
        .points
        .windows(2)
        .find(|w| cur_temp < w[1].temp_c)
        .map(|w| &w[0])
        .or_else(|| curve.points.last())
        .map_or(0, |p| p.fan_pct)
}
