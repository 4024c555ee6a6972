//! Wavelength to display color mapping
//!
//! The visible spectrum (plus a margin of infrared and ultraviolet) is split
//! into seven sub-bands. Inside each band one RGB channel is interpolated
//! linearly while the other two stay fixed, which gives a qualitative rainbow
//! rather than a colorimetrically correct one.

use crate::constants::to_nanometres;

/// 8-bit RGB triple
pub type Rgb = [u8; 3];

/// Sub-band boundaries in nanometres, infrared to ultraviolet
pub const BAND_BOUNDARIES_NM: [f64; 8] = [850.0, 750.0, 620.0, 570.0, 495.0, 450.0, 380.0, 0.0];

/// Highest alpha the light beam reaches at full intensity
pub const MAX_BEAM_ALPHA: f64 = 100.0;

/// One of the seven color sub-bands, named by the colors at its two ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralBand {
    InfraredToRed = 0,
    RedToYellow = 1,
    YellowToGreen = 2,
    GreenToCyan = 3,
    CyanToBlue = 4,
    BlueToPurple = 5,
    PurpleToUltraviolet = 6,
}

impl SpectralBand {
    pub const ALL: [SpectralBand; 7] = [
        SpectralBand::InfraredToRed,
        SpectralBand::RedToYellow,
        SpectralBand::YellowToGreen,
        SpectralBand::GreenToCyan,
        SpectralBand::CyanToBlue,
        SpectralBand::BlueToPurple,
        SpectralBand::PurpleToUltraviolet,
    ];

    /// Long-wavelength edge of the band (nm)
    pub fn upper_nm(self) -> f64 {
        BAND_BOUNDARIES_NM[self as usize]
    }

    /// Short-wavelength edge of the band (nm)
    pub fn lower_nm(self) -> f64 {
        BAND_BOUNDARIES_NM[self as usize + 1]
    }

    /// Find the band containing `wavelength_nm`.
    ///
    /// Every band whose upper edge is at or above the wavelength matches and
    /// the scan keeps going, so the last (shortest) match wins. A wavelength
    /// sitting exactly on a boundary therefore belongs to the band below it.
    /// Returns `None` above 850 nm.
    pub fn locate(wavelength_nm: f64) -> Option<Self> {
        let mut found = None;
        for band in Self::ALL {
            if wavelength_nm <= band.upper_nm() {
                found = Some(band);
            }
        }
        found
    }

    /// Interpolated channel value: 0 at the upper edge, 255 at the lower edge
    fn variable_channel(self, wavelength_nm: f64) -> f64 {
        let width = self.lower_nm() - self.upper_nm();
        if width == 0.0 {
            return 0.0;
        }
        ((wavelength_nm - self.upper_nm()) / width * 255.0).round_ties_even()
    }

    fn compose(self, var: f64) -> Rgb {
        let var = var.clamp(0.0, 255.0);
        let v = var as u8;
        match self {
            SpectralBand::InfraredToRed => [255, 0, 0],
            SpectralBand::RedToYellow => [255, v, 0],
            SpectralBand::YellowToGreen => [255 - v, 255, 0],
            SpectralBand::GreenToCyan => [0, 255, v],
            SpectralBand::CyanToBlue => [0, 255 - v, 255],
            SpectralBand::BlueToPurple => [(var / 255.0 * 180.0).round_ties_even() as u8, 0, 255],
            SpectralBand::PurpleToUltraviolet => [180, 0, 255],
        }
    }
}

/// Display color of light with the given wavelength (metres).
/// Black above 850 nm.
pub fn color_for(wavelength: f64) -> Rgb {
    let wavelength_nm = to_nanometres(wavelength);
    match SpectralBand::locate(wavelength_nm) {
        Some(band) => band.compose(band.variable_channel(wavelength_nm)),
        None => [0, 0, 0],
    }
}

/// Visibility factor: 1 across 350-750 nm, fading linearly to 0 at 300 and 800 nm
fn rolloff(wavelength_nm: f64) -> f64 {
    if wavelength_nm < 350.0 {
        if wavelength_nm > 300.0 {
            1.0 - (350.0 - wavelength_nm) / 50.0
        } else {
            0.0
        }
    } else if wavelength_nm > 750.0 {
        if wavelength_nm < 800.0 {
            (800.0 - wavelength_nm) / 50.0
        } else {
            0.0
        }
    } else {
        1.0
    }
}

/// Opacity of the light beam, 0..=100 for intensities in 0..=100 %
pub fn alpha_for(wavelength: f64, intensity: f64) -> u8 {
    if intensity == 0.0 {
        return 0;
    }
    let alpha = MAX_BEAM_ALPHA * (intensity / 100.0) * rolloff(to_nanometres(wavelength));
    alpha.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Beam color with its alpha appended
pub fn beam_rgba(wavelength: f64, intensity: f64) -> [u8; 4] {
    let [r, g, b] = color_for(wavelength);
    [r, g, b, alpha_for(wavelength, intensity)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::from_nanometres;

    fn nm(w: f64) -> f64 {
        from_nanometres(w)
    }

    fn max_channel_step(a: Rgb, b: Rgb) -> u8 {
        a.iter().zip(b.iter()).map(|(x, y)| x.abs_diff(*y)).max().unwrap_or(0)
    }

    #[test]
    fn band_edges_resolve_to_the_lower_band() {
        assert_eq!(SpectralBand::locate(800.0), Some(SpectralBand::InfraredToRed));
        assert_eq!(SpectralBand::locate(750.0), Some(SpectralBand::RedToYellow));
        assert_eq!(SpectralBand::locate(500.0), Some(SpectralBand::GreenToCyan));
        assert_eq!(SpectralBand::locate(380.0), Some(SpectralBand::PurpleToUltraviolet));
        assert_eq!(SpectralBand::locate(100.0), Some(SpectralBand::PurpleToUltraviolet));
        assert_eq!(SpectralBand::locate(851.0), None);
    }

    #[test]
    fn known_colors() {
        assert_eq!(color_for(nm(800.0)), [255, 0, 0]);
        assert_eq!(color_for(nm(200.0)), [180, 0, 255]);
        // 500 nm sits 70/75 of the way from 570 to 495
        assert_eq!(color_for(nm(500.0)), [0, 255, 238]);
        // Yellow midway through red->yellow
        assert_eq!(color_for(nm(685.0)), [255, 128, 0]);
    }

    #[test]
    fn beyond_infrared_is_black() {
        assert_eq!(color_for(nm(900.0)), [0, 0, 0]);
    }

    #[test]
    fn continuous_across_boundaries() {
        for boundary in [750.0, 620.0, 570.0, 495.0, 450.0, 380.0] {
            let at = color_for(nm(boundary));
            let above = color_for(nm(boundary + 0.01));
            assert!(
                max_channel_step(at, above) <= 1,
                "jump at {boundary} nm: {at:?} vs {above:?}"
            );
        }
    }

    #[test]
    fn variable_channel_is_monotonic_within_bands() {
        // (band, channel index, rising as wavelength shrinks)
        let cases = [
            (SpectralBand::RedToYellow, 1, true),
            (SpectralBand::YellowToGreen, 0, false),
            (SpectralBand::GreenToCyan, 2, true),
            (SpectralBand::CyanToBlue, 1, false),
            (SpectralBand::BlueToPurple, 0, true),
        ];
        for (band, channel, rising) in cases {
            let upper = band.upper_nm();
            let lower = band.lower_nm();
            let mut previous = color_for(nm(upper - 0.5))[channel];
            let steps = 40;
            for i in 1..steps {
                let w = upper - 0.5 - (upper - lower - 1.0) * i as f64 / steps as f64;
                let value = color_for(nm(w))[channel];
                if rising {
                    assert!(value >= previous, "{band:?} at {w} nm");
                } else {
                    assert!(value <= previous, "{band:?} at {w} nm");
                }
                previous = value;
            }
        }
    }

    #[test]
    fn zero_intensity_is_transparent() {
        for w in [100.0, 320.0, 500.0, 760.0, 850.0] {
            assert_eq!(alpha_for(nm(w), 0.0), 0);
        }
    }

    #[test]
    fn alpha_grows_with_intensity_in_the_visible_core() {
        for w in [350.0, 450.0, 600.0, 750.0] {
            let mut previous = 0;
            for intensity in 0..=100 {
                let alpha = alpha_for(nm(w), intensity as f64);
                assert!(alpha >= previous);
                previous = alpha;
            }
            assert_eq!(previous, 100);
        }
    }

    #[test]
    fn alpha_fades_outside_the_visible_core() {
        assert_eq!(alpha_for(nm(325.0), 100.0), 50);
        assert_eq!(alpha_for(nm(775.0), 100.0), 50);
        assert_eq!(alpha_for(nm(300.0), 100.0), 0);
        assert_eq!(alpha_for(nm(820.0), 100.0), 0);
    }

    #[test]
    fn beam_carries_color_and_alpha() {
        assert_eq!(beam_rgba(nm(600.0), 50.0)[3], 50);
        assert_eq!(&beam_rgba(nm(800.0), 10.0)[..3], &[255, 0, 0]);
    }
}
