use std::f64::consts::TAU;

use shared::protocol::PredictRequest;

use crate::error::VerifyError;

pub const DEFAULT_SFREQ: f64 = 100.0;
pub const SYNTHETIC_CHANNELS: usize = 129;
pub const SYNTHETIC_SAMPLES: usize = 200;

/// Two-second multichannel window mixing alpha (10 Hz) and beta (20 Hz)
/// rhythms, with a per-channel phase shift. Amplitudes are in volts.
pub fn synthetic_signal(channels: usize, samples: usize, sfreq: f64) -> PredictRequest {
    let eeg_raw = (0..channels)
        .map(|ch| {
            let phase = ch as f64 * 0.1;
            (0..samples)
                .map(|n| {
                    let t = n as f64 / sfreq;
                    20e-6 * (TAU * 10.0 * t + phase).sin()
                        + 5e-6 * (TAU * 20.0 * t + 2.0 * phase).sin()
                })
                .collect()
        })
        .collect();
    PredictRequest { eeg_raw, sfreq }
}

/// Resolves the playground payload: blank or missing input gets a synthetic
/// window, anything else must be a well-formed `{eeg_raw, sfreq}` document.
pub fn resolve_payload(raw: Option<&str>) -> Result<(PredictRequest, bool), VerifyError> {
    match raw.map(str::trim) {
        None | Some("") => Ok((
            synthetic_signal(SYNTHETIC_CHANNELS, SYNTHETIC_SAMPLES, DEFAULT_SFREQ),
            true,
        )),
        Some(text) => {
            let request: PredictRequest = serde_json::from_str(text)?;
            validate(&request)?;
            Ok((request, false))
        }
    }
}

fn validate(request: &PredictRequest) -> Result<(), VerifyError> {
    if !(request.sfreq.is_finite() && request.sfreq > 0.0) {
        return Err(VerifyError::InvalidInput(format!(
            "sfreq must be a positive number, got {}",
            request.sfreq
        )));
    }
    let samples = request.sample_count();
    if request.eeg_raw.is_empty() || samples == 0 {
        return Err(VerifyError::InvalidInput(
            "eeg_raw must contain at least one non-empty channel".into(),
        ));
    }
    if let Some(idx) = request
        .eeg_raw
        .iter()
        .position(|channel| channel.len() != samples)
    {
        return Err(VerifyError::InvalidInput(format!(
            "channel {idx} has {} samples, expected {samples}",
            request.eeg_raw[idx].len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_payload_generates_signal() {
        for raw in [None, Some(""), Some("   \n")] {
            let (request, generated) = resolve_payload(raw).expect("payload");
            assert!(generated);
            assert_eq!(request.channel_count(), SYNTHETIC_CHANNELS);
            assert_eq!(request.sample_count(), SYNTHETIC_SAMPLES);
            assert_eq!(request.sfreq, DEFAULT_SFREQ);
        }
    }

    #[test]
    fn synthetic_signal_stays_in_physiological_range() {
        let request = synthetic_signal(3, 50, 100.0);
        assert!(request
            .eeg_raw
            .iter()
            .flatten()
            .all(|value| value.abs() <= 26e-6));
    }

    #[test]
    fn hand_written_payload_is_used_verbatim() {
        let (request, generated) =
            resolve_payload(Some(r#"{"eeg_raw": [[0.1, 0.2], [0.3, 0.4]], "sfreq": 250}"#))
                .expect("payload");
        assert!(!generated);
        assert_eq!(request.eeg_raw, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
        assert_eq!(request.sfreq, 250.0);
    }

    #[test]
    fn malformed_json_is_invalid_input() {
        let err = resolve_payload(Some("{\"eeg_raw\": [[0.1,")).expect_err("malformed");
        assert!(matches!(err, VerifyError::InvalidInput(_)));
    }

    #[test]
    fn ragged_channels_are_rejected() {
        let err = resolve_payload(Some(r#"{"eeg_raw": [[0.1, 0.2], [0.3]], "sfreq": 100}"#))
            .expect_err("ragged");
        assert!(err.to_string().contains("channel 1"));
    }

    #[test]
    fn non_positive_sfreq_is_rejected() {
        let err = resolve_payload(Some(r#"{"eeg_raw": [[0.1]], "sfreq": 0}"#)).expect_err("sfreq");
        assert!(matches!(err, VerifyError::InvalidInput(_)));
    }
}
