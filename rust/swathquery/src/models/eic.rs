use serde::Serialize;

/// An extracted ion chromatogram: summed intensity of one target mass as a
/// function of time.
///
/// The two arrays are index-aligned and `rts` is strictly ascending (it is
/// a subsequence of the run's MS1 times).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Chromatogram {
    pub rts: Vec<f32>,
    pub intensities: Vec<f32>,
}

impl Chromatogram {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rts: Vec::with_capacity(capacity),
            intensities: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, rt_seconds: f32, intensity: f32) {
        self.rts.push(rt_seconds);
        self.intensities.push(intensity);
    }

    pub fn len(&self) -> usize {
        self.rts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rts.is_empty()
    }

    /// Index and value of the most intense sample, if any. The earliest
    /// of equal maxima wins.
    pub fn max_intensity(&self) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &v) in self.intensities.iter().enumerate() {
            match best {
                Some((_, best_val)) if v <= best_val => {}
                _ => best = Some((i, v)),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_intensity() {
        let mut chrom = Chromatogram::default();
        assert_eq!(chrom.max_intensity(), None);
        chrom.push(0.0, 1.0);
        chrom.push(1.0, 5.0);
        chrom.push(2.0, 5.0);
        chrom.push(3.0, 2.0);
        // First of equal maxima wins.
        assert_eq!(chrom.max_intensity(), Some((1, 5.0)));
    }
}
