//! Integration tests for sfera-io: WAV files through the encoding engine.

use sfera_core::{
    CHANNEL_COUNT, Channel, Direction, EncoderSession, HarmonicEncoder, SessionConfig, WaveTable,
};
use sfera_io::{
    EncodingEngine, Error, WavFormat, WavSpec, read_wav, read_wav_info, read_wav_interleaved,
    write_wav, write_wav_interleaved,
};
use tempfile::{NamedTempFile, tempdir};

/// Generate a sine wave.
fn sine_wave(sample_rate: u32, freq_hz: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * std::f32::consts::PI * freq_hz * i as f32 / sample_rate as f32).sin())
        .collect()
}

fn settled_session(direction: Direction) -> EncoderSession {
    let mut session = EncoderSession::new();
    session.set_direction(direction).unwrap();
    session.reset().unwrap();
    session
}

fn weights(direction: Direction) -> [f64; CHANNEL_COUNT] {
    let (theta, phi) = direction.to_turns();
    let mut enc = HarmonicEncoder::new(WaveTable::DEFAULT_LENGTH).unwrap();
    enc.init_coordinates(theta, phi).unwrap();
    enc.weights()
}

// ---------------------------------------------------------------------------
// File pipeline
// ---------------------------------------------------------------------------

#[test]
fn mono_file_to_bformat_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("mono.wav");
    let output_path = dir.path().join("ambi.wav");

    let sr = 48000;
    let source = sine_wave(sr, 440.0, 4800);
    write_wav(&input_path, &source, WavSpec::default()).unwrap();

    let (samples, spec) = read_wav(&input_path).unwrap();
    let direction = Direction::new(60.0, 20.0);
    let mut engine = EncodingEngine::new(settled_session(direction), 256);
    let encoded = engine.process_buffer(&samples).unwrap();

    let out_spec = WavSpec {
        channels: CHANNEL_COUNT as u16,
        ..spec
    };
    write_wav_interleaved(&output_path, &encoded, out_spec).unwrap();

    let info = read_wav_info(&output_path).unwrap();
    assert_eq!(info.channels, 16);
    assert_eq!(info.num_frames, 4800);
    assert_eq!(info.sample_rate, sr);
    assert_eq!(info.format, WavFormat::IeeeFloat);

    let (loaded, _) = read_wav_interleaved(&output_path).unwrap();
    let w = weights(direction);
    for (n, frame) in loaded.chunks_exact(CHANNEL_COUNT).enumerate() {
        for ch in Channel::ALL {
            let want = (f64::from(source[n]) * w[ch.index()]) as f32;
            assert_eq!(frame[ch.index()], want, "{ch} frame {n}");
        }
    }
}

#[test]
fn stereo_source_is_mixed_before_encoding() {
    let file = NamedTempFile::new().unwrap();
    let spec = WavSpec {
        channels: 2,
        ..WavSpec::default()
    };
    // left = 1.0, right = 0.0 -> mono 0.5
    let interleaved: Vec<f32> = (0..200).map(|i| if i % 2 == 0 { 1.0 } else { 0.0 }).collect();
    write_wav_interleaved(file.path(), &interleaved, spec).unwrap();

    let (mono, _) = read_wav(file.path()).unwrap();
    assert_eq!(mono.len(), 100);

    let mut engine = EncodingEngine::new(settled_session(Direction::FRONT), 64);
    let out = engine.process_buffer(&mono).unwrap();
    let w = out[Channel::W.index()];
    assert!((w - 0.5 * std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-7);
}

#[test]
fn sixteen_bit_output_quantizes_within_one_lsb() {
    let file = NamedTempFile::new().unwrap();
    let source = sine_wave(44100, 220.0, 1000);
    let mut engine = EncodingEngine::new(settled_session(Direction::new(-30.0, 0.0)), 128);
    let encoded: Vec<f32> = engine
        .process_buffer(&source)
        .unwrap()
        .iter()
        .map(|s| s * 0.5)
        .collect();

    let spec = WavSpec {
        channels: 16,
        sample_rate: 44100,
        bits_per_sample: 16,
    };
    write_wav_interleaved(file.path(), &encoded, spec).unwrap();

    let (loaded, _) = read_wav_interleaved(file.path()).unwrap();
    assert_eq!(loaded.len(), encoded.len());
    for (a, b) in encoded.iter().zip(&loaded) {
        assert!((a - b).abs() <= 1.0 / 32768.0 + 1e-7);
    }
}

// ---------------------------------------------------------------------------
// Automation
// ---------------------------------------------------------------------------

#[test]
fn circular_trajectory_moves_energy_between_x_and_y() {
    let block = 480;
    let frames = block * 40;
    let config = SessionConfig::new(WaveTable::DEFAULT_LENGTH, 64).unwrap();
    let mut engine = EncodingEngine::new(EncoderSession::with_config(config), block);

    // one revolution, 9° per block
    let out = engine
        .process_with_automation(&vec![1.0; frames], |offset| {
            let azimuth = (offset / block) as f64 * 9.0;
            let azimuth = if azimuth > 180.0 { azimuth - 360.0 } else { azimuth };
            Some(Direction::new(azimuth, 0.0))
        })
        .unwrap();

    let sample = |frame: usize, ch: Channel| out[frame * CHANNEL_COUNT + ch.index()];
    // block 10 -> 90°: all Y, no X
    let f = 10 * block + block - 1;
    assert!((sample(f, Channel::Y) - 1.0).abs() < 1e-4);
    assert!(sample(f, Channel::X).abs() < 1e-4);
    // block 20 -> 180°: X = -1
    let f = 20 * block + block - 1;
    assert!((sample(f, Channel::X) + 1.0).abs() < 1e-4);

    // horizontal plane: X² + Y² stays 1 throughout
    for frame in out.chunks_exact(CHANNEL_COUNT) {
        let x = frame[Channel::X.index()];
        let y = frame[Channel::Y.index()];
        assert!(((x * x + y * y) - 1.0).abs() < 0.05);
    }
}

#[test]
fn engine_surfaces_encoder_errors() {
    let mut engine = EncodingEngine::new(EncoderSession::new(), 32);
    let err = engine
        .process_with_automation(&[0.0; 64], |offset| {
            (offset == 32).then_some(Direction::new(f64::NAN, 0.0))
        })
        .unwrap_err();
    assert!(matches!(err, Error::Encode(_)));
    assert!(err.to_string().contains("azimuth"), "{err}");
}
