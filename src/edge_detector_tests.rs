#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::error::EdgeError;
    use clap::ValueEnum;
    use crate::convolution::{HORIZONTAL_GRADIENT, VERTICAL_GRADIENT, convolve, extract_window};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn create_noise_image(width: u32, height: u32, seed: u64) -> Vec<u8> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..width * height).map(|_| rng.r#gen::<u8>()).collect()
    }

    fn create_step_image(width: u32, height: u32, left: u8, right: u8, split: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for _y in 0..height {
            for x in 0..width {
                pixels.push(if x < split { left } else { right });
            }
        }
        pixels
    }

    #[test]
    fn test_direction_default_is_both() {
        assert_eq!(Direction::default(), Direction::Both);
        assert_eq!(EdgeParams::default().direction, Direction::Both);
    }

    #[test]
    fn test_direction_from_code() {
        assert_eq!(Direction::from_code(0), Direction::HorizontalOnly);
        assert_eq!(Direction::from_code(1), Direction::VerticalOnly);
        assert_eq!(Direction::from_code(2), Direction::Both);
        assert_eq!(Direction::from_code(-1), Direction::Both);
        assert_eq!(Direction::from_code(42), Direction::Both);
    }

    #[test]
    fn test_direction_parses_from_text() {
        assert_eq!(Direction::from_str("horizontal", true), Ok(Direction::HorizontalOnly));
        assert_eq!(Direction::from_str("VERTICAL", true), Ok(Direction::VerticalOnly));
        assert_eq!(Direction::from_str("both", false), Ok(Direction::Both));
        assert!(Direction::from_str("diagonal", true).is_err());
    }

    #[test]
    fn test_edge_params_default() {
        let params = EdgeParams::default();
        assert_eq!(params.threshold, 100);
        assert_eq!(params.strength_ratio, 0.3);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_adjust_strength_amplifies_above_threshold() {
        // 100 * 1.5 = 150
        assert_eq!(adjust_strength(100, 50, 0.5), 150);
        // 200 * 1.3 = 260 -> saturates
        assert_eq!(adjust_strength(200, 100, 0.3), 255);
    }

    #[test]
    fn test_adjust_strength_suppresses_at_or_below_threshold() {
        // 100 * 0.5 = 50
        assert_eq!(adjust_strength(100, 100, 0.5), 50);
        // 99 * 0.7 = 69.3 -> 69
        assert_eq!(adjust_strength(99, 100, 0.3), 69);
        assert_eq!(adjust_strength(0, 0, 0.3), 0);
    }

    #[test]
    fn test_adjust_strength_zero_ratio_is_identity_below_saturation() {
        for m in 0..=255i64 {
            assert_eq!(adjust_strength(m, 128, 0.0), m as u8);
        }
        assert_eq!(adjust_strength(360, 128, 0.0), 255);
    }

    #[test]
    fn test_adjust_strength_monotonic_above_threshold() {
        let threshold = 50;
        for magnitude in [51i64, 80, 120, 200, 255, 360] {
            let mut previous = 0u8;
            for step in 0..=100 {
                let ratio = step as f64 / 100.0;
                let out = adjust_strength(magnitude, threshold, ratio);
                assert!(out >= previous, "magnitude {} ratio {}: {} < {}", magnitude, ratio, out, previous);
                previous = out;
            }
        }
    }

    #[test]
    fn test_adjust_strength_monotonic_below_threshold() {
        let threshold = 200;
        for magnitude in [0i64, 1, 37, 150, 200] {
            let mut previous = u8::MAX;
            for step in 0..=100 {
                let ratio = step as f64 / 100.0;
                let out = adjust_strength(magnitude, threshold, ratio);
                assert!(out <= previous, "magnitude {} ratio {}: {} > {}", magnitude, ratio, out, previous);
                previous = out;
            }
            assert_eq!(adjust_strength(magnitude, threshold, 1.0), 0);
        }
    }

    #[test]
    fn test_gradient_magnitude_uses_clipped_partials() {
        // gx = 80, gy = 0
        let window = [0, 20, 20, 0, 20, 20, 0, 20, 20];
        assert_eq!(gradient_magnitude(&window), 80);

        // Both partials saturate before combination: hypot(255, 255) = 360.6
        let corner = [0, 0, 0, 0, 255, 255, 0, 255, 255];
        assert_eq!(gradient_magnitude(&corner), 360);
    }

    #[test]
    fn test_gradient_magnitude_pythagorean() {
        // Neither partial saturates here
        let window = [0, 0, 3, 0, 0, 3, 4, 4, 7];
        let gx = convolve(&window, &HORIZONTAL_GRADIENT) as f64;
        let gy = convolve(&window, &VERTICAL_GRADIENT) as f64;
        assert_eq!(gradient_magnitude(&window), gx.hypot(gy) as i64);
    }

    #[test]
    fn test_sobel_flat_window_is_zero() {
        let window = [77u8; 9];
        for threshold in [0u8, 1, 100, 255] {
            assert_eq!(sobel(&window, threshold, 0.3), 0);
        }
    }

    #[test]
    fn test_sobel_applies_threshold() {
        let window = [0, 20, 20, 0, 20, 20, 0, 20, 20];
        // magnitude 80 > 50 -> 80 * 1.5 = 120
        assert_eq!(sobel(&window, 50, 0.5), 120);
        // magnitude 80 <= 100 -> 80 * 0.5 = 40
        assert_eq!(sobel(&window, 100, 0.5), 40);
    }

    #[test]
    fn test_detect_edges_shape_preservation() {
        for (w, h) in [(1u32, 1u32), (2, 2), (3, 7), (16, 9), (31, 1)] {
            let image = create_noise_image(w, h, 7);
            for direction in [Direction::HorizontalOnly, Direction::VerticalOnly, Direction::Both] {
                let out = detect_edges(&image, w, h, 100, 0.3, direction).unwrap();
                assert_eq!(out.len(), (w * h) as usize);
            }
        }
    }

    #[test]
    fn test_detect_edges_flat_field_interior_is_zero() {
        let image = vec![100u8; 25];
        for threshold in [0u8, 50, 100, 200, 255] {
            let out = detect_edges(&image, 5, 5, threshold, 0.3, Direction::Both).unwrap();
            for row in 1..4 {
                for col in 1..4 {
                    assert_eq!(out[row * 5 + col], 0, "threshold {} at ({}, {})", threshold, row, col);
                }
            }
        }
    }

    #[test]
    fn test_detect_edges_flat_field_border_sees_zero_padding() {
        let image = vec![100u8; 25];
        let out = detect_edges(&image, 5, 5, 100, 0.3, Direction::Both).unwrap();
        // Corner window: gx = gy = 300 -> both clip to 255 -> magnitude 360 -> amplified
        assert_eq!(out[0], 255);
        assert_eq!(out[24], 255);
    }

    #[test]
    fn test_detect_edges_step_edge_center() {
        let image = create_step_image(3, 3, 0, 255, 1);
        let out = detect_edges(&image, 3, 3, 0, 0.0, Direction::HorizontalOnly).unwrap();
        let window = [0, 255, 255, 0, 255, 255, 0, 255, 255];
        // 255 + 510 + 255 = 1020 -> 255
        assert_eq!(out[4], convolve(&window, &HORIZONTAL_GRADIENT));
        assert_eq!(out[4], 255);

        // Threshold has no effect in a single-direction mode
        let other = detect_edges(&image, 3, 3, 255, 1.0, Direction::HorizontalOnly).unwrap();
        assert_eq!(out, other);
    }

    #[test]
    fn test_detect_edges_small_step_is_not_saturated() {
        let image = create_step_image(3, 3, 0, 20, 1);
        let out = detect_edges(&image, 3, 3, 100, 0.3, Direction::HorizontalOnly).unwrap();
        assert_eq!(out[4], 80);
        let vertical = detect_edges(&image, 3, 3, 100, 0.3, Direction::VerticalOnly).unwrap();
        // Interior of a purely horizontal step has no vertical gradient
        assert_eq!(vertical[4], 0);
    }

    #[test]
    fn test_detect_edges_horizontal_matches_direct_convolution() {
        let (w, h) = (17u32, 11u32);
        let image = create_noise_image(w, h, 42);
        let out = detect_edges(&image, w, h, 10, 0.9, Direction::HorizontalOnly).unwrap();
        for row in 0..h as usize {
            for col in 0..w as usize {
                let window = extract_window(&image, w as usize, h as usize, row, col);
                assert_eq!(out[row * w as usize + col], convolve(&window, &HORIZONTAL_GRADIENT));
            }
        }
    }

    #[test]
    fn test_detect_edges_vertical_matches_direct_convolution() {
        let (w, h) = (9u32, 14u32);
        let image = create_noise_image(w, h, 3);
        let out = detect_edges(&image, w, h, 10, 0.9, Direction::VerticalOnly).unwrap();
        for row in 0..h as usize {
            for col in 0..w as usize {
                let window = extract_window(&image, w as usize, h as usize, row, col);
                assert_eq!(out[row * w as usize + col], convolve(&window, &VERTICAL_GRADIENT));
            }
        }
    }

    #[test]
    fn test_detect_edges_matches_sequential_evaluation() {
        let (w, h) = (23u32, 19u32);
        let image = create_noise_image(w, h, 1234);
        let params = EdgeParams {
            threshold: 120,
            strength_ratio: 0.4,
            direction: Direction::Both,
        };
        let out = detect_edges_with(&image, w, h, &params).unwrap();

        let mut expected = Vec::with_capacity((w * h) as usize);
        for row in 0..h as usize {
            for col in 0..w as usize {
                expected.push(edge_pixel(&image, w as usize, h as usize, row, col, &params));
            }
        }
        assert_eq!(out, expected);
    }

    #[test]
    fn test_detect_edges_is_deterministic() {
        let (w, h) = (64u32, 48u32);
        let image = create_noise_image(w, h, 99);
        let first = detect_edges(&image, w, h, 100, 0.3, Direction::Both).unwrap();
        let second = detect_edges(&image, w, h, 100, 0.3, Direction::Both).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_detect_edges_rejects_empty_image() {
        let result = detect_edges(&[], 0, 0, 100, 0.3, Direction::Both);
        assert!(matches!(result, Err(EdgeError::InvalidInput(_))));
    }

    #[test]
    fn test_detect_edges_rejects_zero_dimension() {
        let image = vec![0u8; 4];
        assert!(matches!(
            detect_edges(&image, 0, 4, 100, 0.3, Direction::Both),
            Err(EdgeError::InvalidInput(_))
        ));
        assert!(matches!(
            detect_edges(&image, 4, 0, 100, 0.3, Direction::Both),
            Err(EdgeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_detect_edges_rejects_size_mismatch() {
        let image = vec![0u8; 10];
        let result = detect_edges(&image, 3, 3, 100, 0.3, Direction::Both);
        assert!(matches!(result, Err(EdgeError::InvalidInput(_))));
    }

    #[test]
    fn test_detect_edges_rejects_bad_strength_ratio() {
        let image = vec![0u8; 9];
        for ratio in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            let result = detect_edges(&image, 3, 3, 100, ratio, Direction::Both);
            assert!(matches!(result, Err(EdgeError::InvalidParameter(_))), "ratio {}", ratio);
        }
        assert!(detect_edges(&image, 3, 3, 100, 0.0, Direction::Both).is_ok());
        assert!(detect_edges(&image, 3, 3, 100, 1.0, Direction::Both).is_ok());
    }

    #[test]
    fn test_detect_edges_validates_ratio_even_without_threshold_step() {
        let image = vec![0u8; 9];
        let result = detect_edges(&image, 3, 3, 100, 2.0, Direction::HorizontalOnly);
        assert!(matches!(result, Err(EdgeError::InvalidParameter(_))));
    }

    #[test]
    fn test_detect_edges_full_threshold_range_is_valid() {
        let image = create_noise_image(4, 4, 5);
        for threshold in [0u8, 1, 127, 254, 255] {
            assert!(detect_edges(&image, 4, 4, threshold, 0.5, Direction::Both).is_ok());
        }
    }

    #[test]
    fn test_detect_edges_does_not_mutate_source() {
        let image = create_noise_image(8, 8, 11);
        let copy = image.clone();
        let _ = detect_edges(&image, 8, 8, 100, 0.3, Direction::Both).unwrap();
        assert_eq!(image, copy);
    }
}
