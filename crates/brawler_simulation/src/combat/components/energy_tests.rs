//! Tests for EnergyMeter.

#[cfg(test)]
mod tests {
    use super::super::energy::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_gain_and_lose() {
        let mut meter = EnergyMeter::new(100.0);
        assert!(meter.gain(17.5));
        assert_eq!(meter.value(), 17.5);

        assert!(meter.lose(10.0));
        assert_eq!(meter.value(), 7.5);

        assert!(meter.lose(10.0));
        assert_eq!(meter.value(), 0.0); // clamp снизу
        assert!(!meter.lose(10.0));
    }

    #[test]
    fn test_six_hits_fill_the_meter() {
        let mut meter = EnergyMeter::new(100.0);
        for _ in 0..5 {
            meter.gain(17.5);
        }
        assert_eq!(meter.value(), 87.5);
        assert!(!meter.is_full());

        meter.gain(17.5);
        assert_eq!(meter.value(), 100.0);
        assert!(meter.is_full());
        assert_eq!(meter.fraction(), 1.0);

        // Full → gain is a no-op
        assert!(!meter.gain(17.5));
        assert_eq!(meter.value(), 100.0);
    }

    #[test]
    fn test_spend_requires_full() {
        let mut meter = EnergyMeter::with_value(100.0, 99.0);
        assert!(!meter.spend());
        assert_eq!(meter.value(), 99.0);

        meter.set(250.0);
        assert_eq!(meter.value(), 100.0);
        assert!(meter.spend());
        assert_eq!(meter.value(), 0.0);
    }

    #[test]
    fn test_value_stays_in_range_for_random_sequences() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let mut meter = EnergyMeter::new(100.0);
            for _ in 0..100 {
                let before = meter.value();
                let delta: f32 = rng.gen_range(-60.0..60.0);
                if delta >= 0.0 {
                    meter.gain(delta);
                    if before < 100.0 {
                        assert_eq!(meter.value(), (before + delta).clamp(0.0, 100.0));
                    }
                } else {
                    meter.lose(-delta);
                    assert_eq!(meter.value(), (before + delta).clamp(0.0, 100.0));
                }
                assert!(meter.value() >= 0.0 && meter.value() <= 100.0);
            }
        }
    }
}
